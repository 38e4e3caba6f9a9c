use std::fs;

use crate::catalog::CatalogClient;
use crate::config::AppConfig;
use crate::store::assets::AssetStore;
use crate::store::BookStore;

/// Handles shared by every request handler, cloned into the actix app data.
#[derive(Clone)]
pub struct AppState {
    pub store: BookStore,
    pub assets: AssetStore,
    pub catalog: CatalogClient,
}

impl AppState {
    /// Wires the stores and the remote client from the startup configuration,
    /// provisioning the database schema and the upload directory.
    pub fn build(config: &AppConfig) -> Result<Self, String> {
        let store = BookStore::new(&config.database_path);
        store.init().map_err(|e| e.to_string())?;

        let upload_dir = config.upload_dir();
        fs::create_dir_all(&upload_dir).map_err(|e| e.to_string())?;
        let assets = AssetStore::new(upload_dir, &config.public_base_url);

        let catalog = CatalogClient::new(&config.openlibrary_url).map_err(|e| e.to_string())?;

        Ok(AppState {
            store,
            assets,
            catalog,
        })
    }
}
