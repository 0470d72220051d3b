//! Asset inventory
//!
//! Data access, filtering and view models for tracking physical assets kept
//! in a hosted PostgREST backend.

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod repository;
pub mod services;
pub mod telemetry;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use auth::AuthProvider;
use repository::{AssetStore, PostgrestStore};

/// Application state shared with the embedding front end
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire services over any store
    pub fn new(config: AppConfig, store: Arc<dyn AssetStore>, auth: Arc<dyn AuthProvider>) -> Self {
        let services = services::Services::new(store, auth, &config.notifications);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }

    /// Wire services over the hosted backend named in `config`
    pub fn connect(config: AppConfig, auth: Arc<dyn AuthProvider>) -> AppResult<Self> {
        let store = PostgrestStore::new(&config.backend, auth.clone())?;
        tracing::info!("Using asset store at {}", config.backend.url);
        Ok(Self::new(config, Arc::new(store), auth))
    }
}
