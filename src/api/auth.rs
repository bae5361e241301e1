// src/api/auth.rs

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::user::{LoginRequest, LoginResponse, Session, ValidateResponse};
use crate::session::validator::ValidationClient;

/// Login, logout and session validation.
pub struct AuthApi {
    gateway: Arc<Gateway>,
}

impl AuthApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `POST /login`. On success the returned session is saved into the
    /// store, which notifies every subscriber.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let response: LoginResponse = self.gateway.post("/login", &payload).await?;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(ApiError::Business(message));
        }

        let token = response
            .session_id
            .ok_or_else(|| ApiError::Decode("login response missing sessionId".to_string()))?;
        let user = response
            .user
            .ok_or_else(|| ApiError::Decode("login response missing user".to_string()))?;

        let session = Session { token, user };
        self.gateway.store().save(session.clone());
        tracing::info!("Logged in as {} ({:?})", session.user.name, session.user.role);

        Ok(session)
    }

    /// `POST /logout`. The local session is cleared whether or not the
    /// backend call succeeds.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result: Result<serde_json::Value, ApiError> =
            self.gateway.post("/logout", &serde_json::json!({})).await;
        self.gateway.store().clear();
        result.map(|_| ())
    }
}

#[async_trait]
impl ValidationClient for AuthApi {
    /// `GET /validate-session` with the current token attached.
    async fn validate_session(&self) -> Result<ValidateResponse, ApiError> {
        self.gateway.get("/validate-session").await
    }
}
