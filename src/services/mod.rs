//! Application services

pub mod assets;
pub mod notifications;

use std::sync::Arc;

use crate::{auth::AuthProvider, config::NotificationConfig, repository::AssetStore};

pub use assets::{AssetCache, AssetService, CacheView};
pub use notifications::{Toast, ToastKind, ToastOptions, ToastQueue};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: AssetService,
    pub notifications: ToastQueue,
}

impl Services {
    /// Create all services over the given store and auth collaborator
    pub fn new(
        store: Arc<dyn AssetStore>,
        auth: Arc<dyn AuthProvider>,
        notification_config: &NotificationConfig,
    ) -> Self {
        Self {
            assets: AssetService::new(store, auth),
            notifications: ToastQueue::new(notification_config),
        }
    }
}
