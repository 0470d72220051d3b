//! HTTP store speaking the PostgREST dialect of the hosted backend

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use uuid::Uuid;

use super::{
    AssetQuery, AssetStore, Row, ASSETS_TABLE, ASSIGNMENTS_TABLE, CATEGORIES_TABLE,
    DOCUMENTS_TABLE, MAINTENANCE_TABLE,
};
use crate::{
    auth::AuthProvider,
    config::BackendConfig,
    error::{AppError, AppResult},
    models::{Asset, AssetAssignment, AssetCategory, AssetDocument, AssetMaintenance},
};

/// Asset columns with the referenced category embedded
const ASSET_SELECT: &str = "*,category:asset_categories(*)";

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

pub struct PostgrestStore {
    client: Client,
    rest_url: String,
    anon_key: String,
    auth: Arc<dyn AuthProvider>,
}

impl PostgrestStore {
    pub fn new(config: &BackendConfig, auth: Arc<dyn AuthProvider>) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            anon_key: config.anon_key.clone(),
            auth,
        })
    }

    /// Request against a table, authorized with the session token when one
    /// exists and the anon key otherwise.
    async fn request(&self, method: Method, table: &str) -> AppResult<RequestBuilder> {
        let bearer = match self.auth.session().await? {
            Some(session) => session.access_token,
            None => self.anon_key.clone(),
        };

        Ok(self
            .client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_related<T: DeserializeOwned>(
        &self,
        table: &str,
        asset_id: &str,
    ) -> AppResult<Vec<T>> {
        let builder = self.request(Method::GET, table).await?.query(&[
            ("select", "*".to_string()),
            ("asset_id", format!("eq.{}", asset_id)),
            ("order", "created_at.desc".to_string()),
        ]);
        self.send(builder).await
    }
}

/// Map a non-2xx response onto the error taxonomy
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::NotAuthenticated);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(err) => {
            tracing::debug!(
                "Store error code={:?} details={:?}",
                err.code, err.details
            );
            err.message
        }
        Err(_) if body.is_empty() => format!("Store request failed with status {}", status),
        Err(_) => format!("Store request failed with status {}: {}", status, body),
    };
    Err(AppError::RemoteFailure(message))
}

/// Asset ids are UUIDs; anything else cannot name a row, and the backend
/// would answer it with a cast error rather than an empty result.
fn require_asset_id(id: &str) -> AppResult<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| AppError::NotFound(format!("Asset {} not found", id)))
}

fn single<T>(mut rows: Vec<T>, id: &str) -> AppResult<T> {
    if rows.is_empty() {
        return Err(AppError::NotFound(format!("Asset {} not found", id)));
    }
    Ok(rows.swap_remove(0))
}

#[async_trait]
impl AssetStore for PostgrestStore {
    async fn fetch_assets(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        let mut params = vec![
            ("select".to_string(), ASSET_SELECT.to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
        ];
        params.extend(query.render_params());

        let builder = self.request(Method::GET, ASSETS_TABLE).await?.query(&params);
        self.send(builder).await
    }

    async fn fetch_categories(&self) -> AppResult<Vec<AssetCategory>> {
        let builder = self
            .request(Method::GET, CATEGORIES_TABLE)
            .await?
            .query(&[("select", "*"), ("order", "name.asc")]);
        self.send(builder).await
    }

    async fn fetch_asset(&self, id: &str) -> AppResult<Asset> {
        require_asset_id(id)?;
        let builder = self.request(Method::GET, ASSETS_TABLE).await?.query(&[
            ("select", ASSET_SELECT.to_string()),
            ("id", format!("eq.{}", id)),
        ]);
        let rows: Vec<Asset> = self.send(builder).await?;
        single(rows, id)
    }

    async fn insert_asset(&self, row: Row) -> AppResult<Asset> {
        let builder = self
            .request(Method::POST, ASSETS_TABLE)
            .await?
            .query(&[("select", ASSET_SELECT)])
            .header("Prefer", "return=representation")
            .json(&Value::Array(vec![Value::Object(row)]));
        let rows: Vec<Asset> = self.send(builder).await?;
        rows.into_iter().next().ok_or_else(|| {
            AppError::RemoteFailure("Store returned no record for insert".to_string())
        })
    }

    async fn update_asset(&self, id: &str, row: Row) -> AppResult<Asset> {
        require_asset_id(id)?;
        let builder = self
            .request(Method::PATCH, ASSETS_TABLE)
            .await?
            .query(&[
                ("select", ASSET_SELECT.to_string()),
                ("id", format!("eq.{}", id)),
            ])
            .header("Prefer", "return=representation")
            .json(&Value::Object(row));
        let rows: Vec<Asset> = self.send(builder).await?;
        single(rows, id)
    }

    async fn delete_asset(&self, id: &str) -> AppResult<()> {
        require_asset_id(id)?;
        let builder = self
            .request(Method::DELETE, ASSETS_TABLE)
            .await?
            .query(&[("select", "id".to_string()), ("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation");
        let rows: Vec<Value> = self.send(builder).await?;
        single(rows, id).map(|_| ())
    }

    async fn fetch_assignments(&self, asset_id: &str) -> AppResult<Vec<AssetAssignment>> {
        self.fetch_related(ASSIGNMENTS_TABLE, asset_id).await
    }

    async fn fetch_maintenance(&self, asset_id: &str) -> AppResult<Vec<AssetMaintenance>> {
        self.fetch_related(MAINTENANCE_TABLE, asset_id).await
    }

    async fn fetch_documents(&self, asset_id: &str) -> AppResult<Vec<AssetDocument>> {
        self.fetch_related(DOCUMENTS_TABLE, asset_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticAuth;

    #[test]
    fn test_rest_url_strips_trailing_slash() {
        let config = BackendConfig {
            url: "https://project.supabase.co/".to_string(),
            ..Default::default()
        };
        let store = PostgrestStore::new(&config, Arc::new(StaticAuth::default())).unwrap();
        assert_eq!(store.rest_url, "https://project.supabase.co/rest/v1");
    }

    fn response(status: u16, body: &'static str) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_check_status_passes_success_through() {
        let ok = check_status(response(200, "[]")).await.unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_check_status_unauthorized() {
        let err = check_status(response(401, r#"{"message":"JWT expired"}"#))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_check_status_uses_store_message() {
        let body = r#"{"code":"23502","details":null,"hint":null,"message":"null value in column \"name\" violates not-null constraint"}"#;
        let err = check_status(response(400, body)).await.unwrap_err();
        assert_eq!(
            err,
            AppError::RemoteFailure(
                "null value in column \"name\" violates not-null constraint".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_check_status_plain_text_body() {
        let err = check_status(response(500, "upstream timed out")).await.unwrap_err();
        assert_eq!(
            err,
            AppError::RemoteFailure(
                "Store request failed with status 500 Internal Server Error: upstream timed out"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_check_status_empty_body() {
        let err = check_status(response(500, "")).await.unwrap_err();
        assert_eq!(
            err,
            AppError::RemoteFailure(
                "Store request failed with status 500 Internal Server Error".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found_without_request() {
        let config = BackendConfig {
            url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let store = PostgrestStore::new(&config, Arc::new(StaticAuth::default())).unwrap();

        let not_found = AppError::NotFound("Asset 42 not found".to_string());
        assert_eq!(store.fetch_asset("42").await.unwrap_err(), not_found);
        assert_eq!(store.update_asset("42", Row::new()).await.unwrap_err(), not_found);
        assert_eq!(store.delete_asset("42").await.unwrap_err(), not_found);
        assert!(require_asset_id("0b6b7e4e-6f0a-4d5e-9a43-6c1f1f0e2a11").is_ok());
    }

    #[test]
    fn test_single_reports_missing_id() {
        let rows: Vec<Value> = Vec::new();
        assert_eq!(
            single(rows, "abc").unwrap_err(),
            AppError::NotFound("Asset abc not found".to_string())
        );
    }
}
