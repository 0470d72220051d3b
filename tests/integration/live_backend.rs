//! Tests against a real hosted backend
//!
//! Configure the backend with `SUPABASE_URL` / `SUPABASE_ANON_KEY` (or
//! `config/local.toml`) and provide a user token in `ASSETS_TEST_TOKEN`.

use std::sync::Arc;

use asset_inventory::{
    auth::RemoteAuth,
    models::{AssetFilters, AssetPatch, Location, NewAsset},
    AppConfig, AppError, AppState,
};

fn connect() -> AppState {
    let config = AppConfig::load().expect("Failed to load configuration");
    let auth = RemoteAuth::new(&config.backend).expect("Failed to build auth client");
    auth.set_token(std::env::var("ASSETS_TEST_TOKEN").ok());
    AppState::connect(config, Arc::new(auth)).expect("Failed to build store client")
}

#[tokio::test]
#[ignore] // Run with: cargo test --test live_backend -- --ignored
async fn test_refresh() {
    let state = connect();
    let assets = state.services.assets.refresh().await.expect("Listing failed");

    let cache = state.services.assets.snapshot();
    assert_eq!(cache.assets, assets);
    assert!(cache.error.is_none());
}

#[tokio::test]
#[ignore]
async fn test_asset_lifecycle() {
    let state = connect();
    let assets = &state.services.assets;

    let mut payload = NewAsset::new("Live test asset", Location::Gauteng);
    payload.purchase_date = Some(String::new());
    let created = assets.create(&payload).await.expect("Create failed");
    assert_eq!(created.purchase_date, None);

    let patch = AssetPatch {
        notes: Some("touched by live test".to_string()),
        ..Default::default()
    };
    let updated = assets.update(&created.id, &patch).await.expect("Update failed");
    assert_eq!(updated.notes.as_deref(), Some("touched by live test"));

    let filters = AssetFilters {
        search: Some("Live test".to_string()),
        ..Default::default()
    };
    let listed = assets.list(&filters).await.expect("Filtered listing failed");
    assert!(listed.iter().any(|a| a.id == created.id));

    assets.delete(&created.id).await.expect("Delete failed");
    let err = assets.get(&created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
