//! Asset access layer
//!
//! Single point of contact between the application and persisted asset data.
//! The service owns the cache of the last listing and is its only writer;
//! views read it through [`AssetService::subscribe`] or
//! [`AssetService::snapshot`].

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use serde_json::Value;
use tokio::sync::watch;
use validator::Validate;

use crate::{
    auth::AuthProvider,
    error::{AppError, AppResult},
    models::{Asset, AssetCategory, AssetDetails, AssetFilters, AssetPatch, NewAsset},
    repository::{sanitize_date_fields, to_row, AssetQuery, AssetStore},
};

/// Local mirror of the last successful operations. Not a source of truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetCache {
    /// Last listing, newest first, adjusted by later create/update/delete
    pub assets: Vec<Asset>,
    pub categories: Vec<AssetCategory>,
    /// A listing is in flight
    pub loading: bool,
    /// Message of the last failed listing
    pub error: Option<String>,
}

/// Read-only handle on the cache
pub type CacheView = watch::Receiver<AssetCache>;

#[derive(Clone)]
pub struct AssetService {
    store: Arc<dyn AssetStore>,
    auth: Arc<dyn AuthProvider>,
    cache: Arc<watch::Sender<AssetCache>>,
    in_flight: Arc<AtomicUsize>,
}

/// Keeps `loading` set while at least one listing is outstanding, including
/// listings whose future is dropped before completion.
struct LoadingGuard<'a> {
    service: &'a AssetService,
}

impl<'a> LoadingGuard<'a> {
    fn start(service: &'a AssetService) -> Self {
        service.in_flight.fetch_add(1, Ordering::SeqCst);
        service.cache.send_modify(|cache| cache.loading = true);
        Self { service }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let remaining = self.service.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        self.service.cache.send_if_modified(|cache| {
            let loading = remaining > 0;
            let changed = cache.loading != loading;
            cache.loading = loading;
            changed
        });
    }
}

impl AssetService {
    pub fn new(store: Arc<dyn AssetStore>, auth: Arc<dyn AuthProvider>) -> Self {
        let (cache, _) = watch::channel(AssetCache::default());
        Self {
            store,
            auth,
            cache: Arc::new(cache),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn subscribe(&self) -> CacheView {
        self.cache.subscribe()
    }

    pub fn snapshot(&self) -> AssetCache {
        self.cache.borrow().clone()
    }

    pub fn assets(&self) -> Vec<Asset> {
        self.cache.borrow().assets.clone()
    }

    pub fn categories(&self) -> Vec<AssetCategory> {
        self.cache.borrow().categories.clone()
    }

    /// List assets matching every supplied filter, newest first.
    /// Replaces the cached list on success; keeps it on failure.
    pub async fn list(&self, filters: &AssetFilters) -> AppResult<Vec<Asset>> {
        let query = AssetQuery::from_filters(filters);
        tracing::debug!("Listing assets with {} predicate(s)", query.predicates.len());

        let _loading = LoadingGuard::start(self);
        self.cache.send_if_modified(|cache| cache.error.take().is_some());

        match self.store.fetch_assets(&query).await {
            Ok(assets) => {
                tracing::info!("Fetched {} assets", assets.len());
                self.cache.send_modify(|cache| cache.assets = assets.clone());
                Ok(assets)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch assets: {}", e);
                self.cache.send_modify(|cache| cache.error = Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// List categories by name. A failure is logged and left out of the
    /// cache's listing error.
    pub async fn list_categories(&self) -> AppResult<Vec<AssetCategory>> {
        match self.store.fetch_categories().await {
            Ok(categories) => {
                self.cache.send_modify(|cache| cache.categories = categories.clone());
                Ok(categories)
            }
            Err(e) => {
                tracing::error!("Failed to fetch categories: {}", e);
                Err(e)
            }
        }
    }

    /// Unfiltered asset listing together with the category list
    pub async fn refresh(&self) -> AppResult<Vec<Asset>> {
        let unfiltered = AssetFilters::default();
        let (assets, _categories) = tokio::join!(self.list(&unfiltered), self.list_categories());
        assets
    }

    /// Create an asset stamped with the current user. The stored record is
    /// prepended to the cached list.
    pub async fn create(&self, asset: &NewAsset) -> AppResult<Asset> {
        asset.validate()?;

        let session = self.auth.session().await?.ok_or(AppError::NotAuthenticated)?;

        let mut row = sanitize_date_fields(to_row(asset)?);
        row.insert("created_by".to_string(), Value::String(session.user_id));

        let created = self.store.insert_asset(row).await.map_err(|e| {
            tracing::warn!("Failed to create asset '{}': {}", asset.name, e);
            e
        })?;

        tracing::info!("Created asset id={}", created.id);
        self.cache.send_modify(|cache| cache.assets.insert(0, created.clone()));
        Ok(created)
    }

    /// Update only the supplied fields. The cached entry is replaced in place.
    pub async fn update(&self, id: &str, patch: &AssetPatch) -> AppResult<Asset> {
        if patch.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }
        patch.validate()?;

        let row = sanitize_date_fields(to_row(patch)?);
        let updated = self.store.update_asset(id, row).await.map_err(|e| {
            tracing::warn!("Failed to update asset id={}: {}", id, e);
            e
        })?;

        tracing::info!("Updated asset id={}", id);
        self.cache.send_if_modified(|cache| {
            match cache.assets.iter_mut().find(|a| a.id == updated.id) {
                Some(slot) => {
                    *slot = updated.clone();
                    true
                }
                None => false,
            }
        });
        Ok(updated)
    }

    /// Hard delete. Child records are left to the store's own cascade rules.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete_asset(id).await.map_err(|e| {
            tracing::warn!("Failed to delete asset id={}: {}", id, e);
            e
        })?;

        tracing::info!("Deleted asset id={}", id);
        self.cache.send_if_modified(|cache| {
            let before = cache.assets.len();
            cache.assets.retain(|a| a.id != id);
            cache.assets.len() != before
        });
        Ok(())
    }

    /// Fetch one asset with its assignments, maintenance and documents.
    /// Only the asset itself is required; a failed relation reads as empty.
    pub async fn get(&self, id: &str) -> AppResult<AssetDetails> {
        let asset = self.store.fetch_asset(id).await?;

        let (assignments, maintenance, documents) = tokio::join!(
            self.store.fetch_assignments(id),
            self.store.fetch_maintenance(id),
            self.store.fetch_documents(id),
        );

        Ok(AssetDetails {
            asset,
            assignments: related_or_empty("assignments", id, assignments),
            maintenance: related_or_empty("maintenance", id, maintenance),
            documents: related_or_empty("documents", id, documents),
        })
    }
}

fn related_or_empty<T>(relation: &str, id: &str, result: AppResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!("Failed to fetch {} for asset id={}: {}", relation, id, e);
        Vec::new()
    })
}
