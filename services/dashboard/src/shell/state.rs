//! services/dashboard/src/shell/state.rs
//!
//! Defines the application's shared state: the two stores plus configuration,
//! constructed once at startup and handed to the shell by reference.

use crate::{
    adapters::{FileStoreAdapter, TokioLatencyAdapter},
    config::{Config, StorageBackend},
    error::DashboardError,
};
use learning_dashboard_core::{
    ports::KeyValueStore, CatalogStore, IdentityStore, LatencyService, MemoryStore,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityStore>,
    pub catalog: Arc<CatalogStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the configured adapters into both stores and restores them from storage.
    pub fn build(config: Arc<Config>) -> Result<Self, DashboardError> {
        let storage: Arc<dyn KeyValueStore> = match config.storage_backend {
            StorageBackend::File => {
                info!("Using file storage in {}", config.data_dir.display());
                Arc::new(FileStoreAdapter::new(&config.data_dir))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage; nothing will be kept on exit");
                Arc::new(MemoryStore::new())
            }
        };
        let latency: Arc<dyn LatencyService> =
            Arc::new(TokioLatencyAdapter::new(config.auth_latency));

        Self::with_ports(storage, latency, config)
    }

    /// Builds the state over explicit ports.
    pub fn with_ports(
        storage: Arc<dyn KeyValueStore>,
        latency: Arc<dyn LatencyService>,
        config: Arc<Config>,
    ) -> Result<Self, DashboardError> {
        let identity = IdentityStore::new(storage.clone(), latency);
        identity.restore();
        let catalog = CatalogStore::load(storage)?;

        Ok(Self {
            identity: Arc::new(identity),
            catalog: Arc::new(catalog),
            config,
        })
    }
}
