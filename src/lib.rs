pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use crate::services::identity::IdentityClient;
use crate::store::Store;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub identity: IdentityClient,
    pub store: Store,
}

impl AppState {
    /// State over a freshly seeded catalog.
    pub fn new(config: config::AppConfig) -> Result<Self, errors::AppError> {
        let identity = IdentityClient::new(&config)?;
        Ok(Self {
            config,
            identity,
            store: store::create_store(store::seed::catalog()),
        })
    }
}
