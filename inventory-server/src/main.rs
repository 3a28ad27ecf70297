mod errors;
mod params;
mod services;

use std::io;
use std::sync::Arc;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use blob_store::LocalImageStore;
use clap::Parser;
use inventory_store::{Inventory, InventoryStore, JsonFileStore, RocksInventoryStore};
use tracing_subscriber::EnvFilter;
use crate::params::{Args, Backend};
use crate::services::AppState;

fn open_store(args: &Args) -> io::Result<Arc<dyn InventoryStore>> {
    match args.backend {
        Backend::Json => {
            tracing::info!("Using JSON inventory document {}", args.data_file.display());
            Ok(Arc::new(JsonFileStore::new(args.data_file.clone())))
        }
        Backend::Rocks => {
            tracing::info!("Using RocksDB inventory at {}", args.rocks_path.display());
            let store = RocksInventoryStore::open(&args.rocks_path)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
            Ok(Arc::new(store))
        }
    }
}

fn build_state(args: &Args) -> io::Result<AppState> {
    let images = LocalImageStore::new(args.image_dir.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{}: {}", args.image_dir.display(), e)))?;

    Ok(AppState {
        inventory: Inventory::new(open_store(args)?),
        images: Arc::new(images),
        base_url: args.base_url.clone(),
        docs_dir: args.docs_dir.clone(),
    })
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = match build_state(&args) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            tracing::error!("Failed to initialise storage: {}", e);
            return Err(e);
        }
    };

    tracing::info!("Inventory server listening on {}", args.http_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(services::configure)
    })
        .bind(args.http_addr.clone())?
        .run()
        .await
}
