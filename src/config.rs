// src/config.rs

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenvy::dotenv;
use url::Url;

/// Session validation interval when VALIDATE_INTERVAL_SECS is unset.
const DEFAULT_VALIDATE_INTERVAL_SECS: u64 = 300;

/// Overall per-request timeout when REQUEST_TIMEOUT_SECS is unset.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// The single backend origin. Every request goes through this URL;
    /// there are no per-view fallback hosts.
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub validate_interval: Duration,
    /// Optional write-through file backing the session store.
    pub session_file: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .expect("API_BASE_URL must be set");
        let api_base_url = Url::parse(&api_base_url)
            .expect("API_BASE_URL must be a valid URL");

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let validate_interval = env::var("VALIDATE_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_VALIDATE_INTERVAL_SECS);

        let session_file = env::var("SESSION_FILE").ok().map(PathBuf::from);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            api_base_url,
            request_timeout: Duration::from_secs(request_timeout),
            validate_interval: Duration::from_secs(validate_interval),
            session_file,
            rust_log,
        }
    }
}
