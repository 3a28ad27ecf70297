use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// One JSON array rewritten on every change.
    Json,
    /// Embedded RocksDB.
    Rocks,
}

#[derive(Parser, Debug)]
#[clap(name = "inventory-server", about = "Inventory records and image uploads over HTTP")]
pub struct Args {
    #[clap(long, env = "INVENTORY_HTTP_ADDR", default_value = "127.0.0.1:8000")]
    pub(crate) http_addr: String,
    #[clap(long, env = "INVENTORY_BACKEND", value_enum, default_value_t = Backend::Json)]
    pub(crate) backend: Backend,
    #[clap(long, env = "INVENTORY_DATA_FILE", default_value = "inventory.json")]
    pub(crate) data_file: PathBuf,
    #[clap(long, env = "INVENTORY_ROCKS_PATH", default_value = "inventory.db")]
    pub(crate) rocks_path: PathBuf,
    #[clap(long, env = "INVENTORY_IMAGE_DIR", default_value = "images")]
    pub(crate) image_dir: PathBuf,
    #[clap(long, env = "INVENTORY_DOCS_DIR", default_value = "docs")]
    pub(crate) docs_dir: PathBuf,
    /// Public base URL, used for absolute image URLs and integration documents.
    #[clap(long, env = "INVENTORY_BASE_URL")]
    pub(crate) base_url: Option<Url>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flags() {
        let args = Args::try_parse_from([
            "inventory-server",
            "--http-addr", "0.0.0.0:9000",
            "--backend", "rocks",
            "--rocks-path", "/var/lib/inventory.db",
            "--image-dir", "/var/lib/images",
            "--base-url", "https://inventory.example.com",
        ])
        .unwrap();
        assert_eq!(args.http_addr, "0.0.0.0:9000");
        assert_eq!(args.backend, Backend::Rocks);
        assert_eq!(args.rocks_path, PathBuf::from("/var/lib/inventory.db"));
        assert_eq!(args.image_dir, PathBuf::from("/var/lib/images"));
        assert_eq!(args.base_url.unwrap().host_str(), Some("inventory.example.com"));
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let res = Args::try_parse_from(["inventory-server", "--base-url", "not a url"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let res = Args::try_parse_from(["inventory-server", "--backend", "postgres"]);
        assert!(res.is_err());
    }
}
