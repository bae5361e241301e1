// src/gateway.rs

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use url::Url;

use crate::config::Config;
use crate::error::ApiError;
use crate::session::store::SessionStore;

/// Request identity header carrying the opaque session token.
pub const SESSION_HEADER: &str = "x-session-id";

/// Published whenever any call, critical or background, comes back 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SessionRejected,
}

/// The single HTTP client wrapper every API surface goes through.
///
/// Attaches the session token to each request and maps response statuses
/// onto the `ApiError` taxonomy. Transport concerns only: on 401 it
/// publishes `AuthEvent::SessionRejected` and returns `AuthFailure`, but
/// the clear-and-redirect decision belongs to the session policy. No
/// retries, no backoff.
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<SessionStore>,
    auth_tx: broadcast::Sender<AuthEvent>,
}

impl Gateway {
    pub fn new(config: &Config, store: Arc<SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let (auth_tx, _) = broadcast::channel(16);

        // Url::join drops the last path segment of a slash-less base
        // ("/api" + "login" -> "/login"), so force the trailing slash.
        let mut base_url = config.api_base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            store,
            auth_tx,
        })
    }

    /// Subscription point for the session policy.
    pub fn auth_events(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_tx.subscribe()
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.builder(Method::GET, path)?).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.builder(Method::POST, path)?.json(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.builder(Method::PUT, path)?.json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.builder(Method::DELETE, path)?).await
    }

    /// Multipart POST for the module-creation upload.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T, ApiError> {
        self.execute(self.builder(Method::POST, path)?.multipart(form))
            .await
    }

    fn builder(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Transport(format!("bad request path '{}': {}", path, e)))?;

        let mut builder = self.http.request(method, url);
        if let Some(token) = self.store.token() {
            builder = builder.header(SESSION_HEADER, token);
        }
        Ok(builder)
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Session rejected by backend (401)");
            let _ = self.auth_tx.send(AuthEvent::SessionRejected);
            return Err(ApiError::AuthFailure);
        }

        // Backend errors carry {error} or {message}; surface them verbatim.
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("error")
                    .or_else(|| body.get("message"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        tracing::error!("Request failed ({}): {}", status, message);

        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            s if s.is_client_error() => ApiError::Business(message),
            _ => ApiError::Server(message),
        })
    }
}
