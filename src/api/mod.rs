// src/api/mod.rs

pub mod admin;
pub mod auth;
pub mod student;

use serde::Deserialize;

use crate::error::ApiError;

/// Generic `{success, message}` acknowledgment body the backend returns
/// for mutations.
#[derive(Debug, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    /// Maps a non-success flag to a business error carrying the backend's
    /// message verbatim.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Business(
                self.message.unwrap_or_else(|| "Request failed".to_string()),
            ))
        }
    }
}
