use std::path::PathBuf;
use std::sync::Arc;
use actix_web::web;
use blob_store::ImageStore;
use inventory_store::Inventory;
use url::Url;
use crate::errors::InventoryErr;

pub mod image_service;
pub mod integration_service;
pub mod inventory_service;

pub const APP_TYPE_JSON: &str = "application/json";

pub struct AppState {
    pub(crate) inventory: Inventory,
    pub(crate) images: Arc<dyn ImageStore>,
    pub(crate) base_url: Option<Url>,
    pub(crate) docs_dir: PathBuf,
}

/// Registers every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        InventoryErr::BadRequest(format!("Invalid form data: {}", err)).into()
    }))
    .service(integration_service::hello)
    .service(integration_service::openapi_spec)
    .service(integration_service::plugin_manifest)
    .service(inventory_service::list_items)
    .service(inventory_service::get_item)
    .service(inventory_service::create_item)
    .service(inventory_service::update_item)
    .service(inventory_service::delete_item)
    .service(image_service::upload_image)
    .service(image_service::serve_image);
}

/// Resolves a reference path such as `/images/x.png` against the public base
/// URL, keeping any path prefix the base URL carries.
pub(crate) fn absolute_url(base: &Url, reference: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(reference.trim_start_matches('/'))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        let base = Url::parse("https://inventory.example.com").unwrap();
        assert_eq!(
            absolute_url(&base, "/images/abc_hammer.png").unwrap().as_str(),
            "https://inventory.example.com/images/abc_hammer.png"
        );

        let nested = Url::parse("https://example.com/shop").unwrap();
        assert_eq!(
            absolute_url(&nested, "/images/abc_hammer.png").unwrap().as_str(),
            "https://example.com/shop/images/abc_hammer.png"
        );
    }
}
