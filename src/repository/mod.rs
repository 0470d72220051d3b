//! Repository layer: access to the hosted asset store

pub mod memory;
pub mod postgrest;
pub mod query;
pub mod sanitize;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{Asset, AssetAssignment, AssetCategory, AssetDocument, AssetMaintenance},
};

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use query::AssetQuery;
pub use sanitize::sanitize_date_fields;

pub const ASSETS_TABLE: &str = "assets";
pub const CATEGORIES_TABLE: &str = "asset_categories";
pub const ASSIGNMENTS_TABLE: &str = "asset_assignments";
pub const MAINTENANCE_TABLE: &str = "asset_maintenance";
pub const DOCUMENTS_TABLE: &str = "asset_documents";

/// Column/value map submitted to the store
pub type Row = serde_json::Map<String, Value>;

/// Serialize a payload into a row
pub fn to_row<T: Serialize>(payload: &T) -> AppResult<Row> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AppError::Validation(format!("Payload must be an object, got {}", other))),
        Err(e) => Err(AppError::Validation(format!("Payload cannot be encoded: {}", e))),
    }
}

/// Persisted asset data. Implementations own transport and query execution;
/// callers own caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Assets matching `query`, newest created first, with category embedded
    async fn fetch_assets(&self, query: &AssetQuery) -> AppResult<Vec<Asset>>;

    /// Categories ordered by name ascending
    async fn fetch_categories(&self) -> AppResult<Vec<AssetCategory>>;

    /// `NotFound` when no asset has this id
    async fn fetch_asset(&self, id: &str) -> AppResult<Asset>;

    /// Insert a row and return the stored record
    async fn insert_asset(&self, row: Row) -> AppResult<Asset>;

    /// Apply the supplied columns only; `NotFound` when no asset has this id
    async fn update_asset(&self, id: &str, row: Row) -> AppResult<Asset>;

    /// Hard delete; `NotFound` when no asset has this id
    async fn delete_asset(&self, id: &str) -> AppResult<()>;

    async fn fetch_assignments(&self, asset_id: &str) -> AppResult<Vec<AssetAssignment>>;

    async fn fetch_maintenance(&self, asset_id: &str) -> AppResult<Vec<AssetMaintenance>>;

    async fn fetch_documents(&self, asset_id: &str) -> AppResult<Vec<AssetDocument>>;
}
