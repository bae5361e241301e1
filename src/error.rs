// src/error.rs

use std::fmt;

/// Crate-wide client error enum.
/// Centralizes the failure taxonomy every API surface reports.
#[derive(Debug)]
pub enum ApiError {
    /// Network/transport failure (connect, timeout, TLS). No retry is
    /// attempted; the failure surfaces to the caller as-is.
    Transport(String),

    /// The response arrived but its body could not be decoded.
    Decode(String),

    /// HTTP 401. The gateway reports this; the session policy reacts to it.
    AuthFailure,

    /// Client-side validation rejected the input. The request was never sent.
    Validation(String),

    /// Backend-reported business error (e.g. duplicate name). The message is
    /// the backend's, verbatim.
    Business(String),

    /// HTTP 404.
    NotFound(String),

    /// Any other 5xx / unexpected status.
    Server(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
            ApiError::AuthFailure => write!(f, "session rejected (401)"),
            ApiError::Validation(msg) => write!(f, "validation error: {}", msg),
            ApiError::Business(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "not found: {}", msg),
            ApiError::Server(msg) => write!(f, "server error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Converts `reqwest::Error` into the matching taxonomy bucket.
/// Allows using the `?` operator on every transport call.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
