//! Authentication collaborator
//!
//! Sign-in itself happens elsewhere; this module only answers "who is the
//! current user, and with which access token do we talk to the store".

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    config::BackendConfig,
    error::{AppError, AppResult},
};

/// Authenticated user session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    /// Bearer token forwarded to the store
    pub access_token: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current session, or `None` when nobody is signed in
    async fn session(&self) -> AppResult<Option<Session>>;
}

/// Session holder set by the embedding application on sign-in / sign-out
#[derive(Debug, Default)]
pub struct StaticAuth {
    session: RwLock<Option<Session>>,
}

impl StaticAuth {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }

    pub fn signed_in(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::new(Some(Session {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }))
    }

    pub fn sign_in(&self, session: Session) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn sign_out(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn session(&self) -> AppResult<Option<Session>> {
        Ok(self.session.read().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

#[derive(Deserialize)]
struct RemoteUser {
    id: String,
}

/// Validates a held access token against the backend's auth endpoint on
/// every call, so an expired or revoked token reads as signed out.
pub struct RemoteAuth {
    client: Client,
    user_url: String,
    anon_key: String,
    token: RwLock<Option<String>>,
}

impl RemoteAuth {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            user_url: format!("{}/auth/v1/user", config.url.trim_end_matches('/')),
            anon_key: config.anon_key.clone(),
            token: RwLock::new(None),
        })
    }

    pub fn set_token(&self, access_token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = access_token;
    }
}

#[async_trait]
impl AuthProvider for RemoteAuth {
    async fn session(&self) -> AppResult<Option<Session>> {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner).clone();
        let Some(token) = token else {
            return Ok(None);
        };

        let response = self
            .client
            .get(&self.user_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: RemoteUser = response.json().await?;
                Ok(Some(Session {
                    user_id: user.id,
                    access_token: token,
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Access token rejected by auth endpoint");
                Ok(None)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::RemoteFailure(format!(
                    "Auth request failed with status {}: {}",
                    status, body
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_auth_sign_in_and_out() {
        let auth = StaticAuth::default();
        assert_eq!(auth.session().await.unwrap(), None);

        auth.sign_in(Session {
            user_id: "user-1".to_string(),
            access_token: "token".to_string(),
        });
        assert_eq!(auth.session().await.unwrap().unwrap().user_id, "user-1");

        auth.sign_out();
        assert_eq!(auth.session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remote_auth_without_token_is_signed_out() {
        let auth = RemoteAuth::new(&BackendConfig::default()).unwrap();
        assert_eq!(auth.session().await.unwrap(), None);
    }
}
