//! In-process store used by tests and local development
//!
//! Behaves like the hosted backend from the caller's point of view: it
//! assigns ids and timestamps, embeds the referenced category, bumps
//! `updated_at` on every update and cascades asset deletion to the child
//! tables.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AssetQuery, AssetStore, Row, ASSETS_TABLE, ASSIGNMENTS_TABLE, CATEGORIES_TABLE,
    DOCUMENTS_TABLE, MAINTENANCE_TABLE,
};
use crate::{
    error::{AppError, AppResult},
    models::{Asset, AssetAssignment, AssetCategory, AssetDocument, AssetMaintenance},
};

/// Columns the store assigns itself; writes to them are ignored
const SERVER_COLUMNS: [&str; 4] = ["id", "created_at", "updated_at", "category"];

#[derive(Default)]
struct MemoryState {
    assets: Vec<Asset>,
    categories: Vec<AssetCategory>,
    assignments: Vec<AssetAssignment>,
    maintenance: Vec<AssetMaintenance>,
    documents: Vec<AssetDocument>,
    /// Tables whose operations currently fail, with the failure message
    failing: HashMap<&'static str, String>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Strictly increasing server clock
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn check(&self, table: &'static str) -> AppResult<()> {
        match self.failing.get(table) {
            Some(message) => Err(AppError::RemoteFailure(message.clone())),
            None => Ok(()),
        }
    }

    fn with_category(&self, mut asset: Asset) -> Asset {
        asset.category = asset
            .category_id
            .as_ref()
            .and_then(|id| self.categories.iter().find(|c| &c.id == id).cloned());
        asset
    }
}

/// Store rows are rejected the way a database rejects a bad insert
fn decode(row: Row) -> AppResult<Asset> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| AppError::RemoteFailure(format!("invalid input for table assets: {}", e)))
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_category(&self, name: &str) -> AssetCategory {
        let mut state = self.state.write().await;
        let now = state.tick();
        let category = AssetCategory {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            icon: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.categories.push(category.clone());
        category
    }

    /// Drop a category without touching the assets referencing it
    pub async fn remove_category(&self, id: &str) {
        self.state.write().await.categories.retain(|c| c.id != id);
    }

    pub async fn add_assignment(&self, assignment: AssetAssignment) {
        self.state.write().await.assignments.push(assignment);
    }

    pub async fn add_maintenance(&self, maintenance: AssetMaintenance) {
        self.state.write().await.maintenance.push(maintenance);
    }

    pub async fn add_document(&self, document: AssetDocument) {
        self.state.write().await.documents.push(document);
    }

    /// Make every operation on `table` fail with `message` until [`recover`](Self::recover)
    pub async fn fail_table(&self, table: &'static str, message: &str) {
        self.state.write().await.failing.insert(table, message.to_string());
    }

    pub async fn recover(&self, table: &'static str) {
        self.state.write().await.failing.remove(table);
    }

    /// Every stored asset, unaffected by injected failures
    pub async fn all_assets(&self) -> Vec<Asset> {
        self.state.read().await.assets.clone()
    }
}

fn newest_first<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    rows
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn fetch_assets(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        let state = self.state.read().await;
        state.check(ASSETS_TABLE)?;

        let rows: Vec<Asset> = state
            .assets
            .iter()
            .filter(|a| query.matches(a))
            .map(|a| state.with_category(a.clone()))
            .collect();
        Ok(newest_first(rows, |a| a.created_at))
    }

    async fn fetch_categories(&self) -> AppResult<Vec<AssetCategory>> {
        let state = self.state.read().await;
        state.check(CATEGORIES_TABLE)?;

        let mut categories = state.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn fetch_asset(&self, id: &str) -> AppResult<Asset> {
        let state = self.state.read().await;
        state.check(ASSETS_TABLE)?;

        state
            .assets
            .iter()
            .find(|a| a.id == id)
            .map(|a| state.with_category(a.clone()))
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    async fn insert_asset(&self, mut row: Row) -> AppResult<Asset> {
        let mut state = self.state.write().await;
        state.check(ASSETS_TABLE)?;

        for column in SERVER_COLUMNS {
            row.remove(column);
        }
        let now = state.tick();
        row.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        row.insert("created_at".to_string(), Value::String(now.to_rfc3339()));
        row.insert("updated_at".to_string(), Value::String(now.to_rfc3339()));

        let asset = decode(row)?;
        state.assets.push(asset.clone());
        Ok(state.with_category(asset))
    }

    async fn update_asset(&self, id: &str, row: Row) -> AppResult<Asset> {
        let mut state = self.state.write().await;
        state.check(ASSETS_TABLE)?;

        let index = state
            .assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))?;

        let mut merged = match serde_json::to_value(&state.assets[index])? {
            Value::Object(map) => map,
            _ => return Err(AppError::RemoteFailure("Stored asset is not a row".to_string())),
        };
        for (column, value) in row {
            if !SERVER_COLUMNS.contains(&column.as_str()) {
                merged.insert(column, value);
            }
        }
        let now = state.tick();
        merged.insert("updated_at".to_string(), Value::String(now.to_rfc3339()));
        merged.remove("category");

        let asset = decode(merged)?;
        state.assets[index] = asset.clone();
        Ok(state.with_category(asset))
    }

    async fn delete_asset(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.check(ASSETS_TABLE)?;

        let before = state.assets.len();
        state.assets.retain(|a| a.id != id);
        if state.assets.len() == before {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }

        state.assignments.retain(|r| r.asset_id != id);
        state.maintenance.retain(|r| r.asset_id != id);
        state.documents.retain(|r| r.asset_id != id);
        Ok(())
    }

    async fn fetch_assignments(&self, asset_id: &str) -> AppResult<Vec<AssetAssignment>> {
        let state = self.state.read().await;
        state.check(ASSIGNMENTS_TABLE)?;
        let rows: Vec<AssetAssignment> = state
            .assignments
            .iter()
            .filter(|r| r.asset_id == asset_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |r| r.created_at))
    }

    async fn fetch_maintenance(&self, asset_id: &str) -> AppResult<Vec<AssetMaintenance>> {
        let state = self.state.read().await;
        state.check(MAINTENANCE_TABLE)?;
        let rows: Vec<AssetMaintenance> = state
            .maintenance
            .iter()
            .filter(|r| r.asset_id == asset_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |r| r.created_at))
    }

    async fn fetch_documents(&self, asset_id: &str) -> AppResult<Vec<AssetDocument>> {
        let state = self.state.read().await;
        state.check(DOCUMENTS_TABLE)?;
        let rows: Vec<AssetDocument> = state
            .documents
            .iter()
            .filter(|r| r.asset_id == asset_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |r| r.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn laptop() -> Row {
        row(json!({
            "name": "Laptop",
            "location": "Gauteng",
            "condition_status": "good",
            "asset_status": "active"
        }))
    }

    #[tokio::test]
    async fn test_insert_assigns_server_columns() {
        let store = MemoryStore::new();
        let mut input = laptop();
        input.insert("id".to_string(), json!("client-chosen"));

        let asset = store.insert_asset(input).await.unwrap();
        assert_ne!(asset.id, "client-chosen");
        assert!(!asset.id.is_empty());
        assert_eq!(asset.created_at, asset.updated_at);
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_date_string() {
        let store = MemoryStore::new();
        let mut input = laptop();
        input.insert("purchase_date".to_string(), json!(""));

        let err = store.insert_asset(input).await.unwrap_err();
        assert!(matches!(err, AppError::RemoteFailure(_)));
        assert!(store.all_assets().await.is_empty());
    }

    #[tokio::test]
    async fn test_embeds_category_and_tolerates_its_removal() {
        let store = MemoryStore::new();
        let category = store.add_category("Computers").await;
        let mut input = laptop();
        input.insert("category_id".to_string(), json!(category.id));

        let asset = store.insert_asset(input).await.unwrap();
        assert_eq!(asset.category_name(), Some("Computers"));

        store.remove_category(&category.id).await;
        let reread = store.fetch_asset(&asset.id).await.unwrap();
        assert_eq!(reread.category, None);
        assert_eq!(reread.category_id, Some(category.id));
    }

    #[tokio::test]
    async fn test_categories_sorted_by_name() {
        let store = MemoryStore::new();
        store.add_category("Vehicles").await;
        store.add_category("Furniture").await;
        store.add_category("Computers").await;

        let names: Vec<String> = store
            .fetch_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Computers", "Furniture", "Vehicles"]);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MemoryStore::new();
        store.fail_table(ASSETS_TABLE, "connection reset").await;
        assert_eq!(
            store.fetch_assets(&AssetQuery::all()).await.unwrap_err(),
            AppError::RemoteFailure("connection reset".to_string())
        );

        store.recover(ASSETS_TABLE).await;
        assert!(store.fetch_assets(&AssetQuery::all()).await.unwrap().is_empty());
    }
}
