// src/session/validator.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ApiError;
use crate::models::user::{User, ValidateResponse};
use crate::session::store::SessionStore;

/// Seam between the validator and the transport, so guard/validator
/// behavior is testable without a live backend.
#[async_trait]
pub trait ValidationClient: Send + Sync {
    async fn validate_session(&self) -> Result<ValidateResponse, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Validating,
    Valid(User),
    Invalid,
}

impl SessionState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, SessionState::Validating)
    }
}

/// Asks the backend whether the current token is still valid.
///
/// Runs on mount, on a fixed timer, and on window focus. Overlapping runs
/// are allowed; each run takes a monotonically increasing id and only the
/// newest run may settle the state, so a slow stale "valid" can never
/// overwrite a newer "invalid".
pub struct SessionValidator {
    client: Arc<dyn ValidationClient>,
    store: Arc<SessionStore>,
    state_tx: watch::Sender<SessionState>,
    latest: AtomicU64,
}

impl SessionValidator {
    pub fn new(client: Arc<dyn ValidationClient>, store: Arc<SessionStore>) -> Arc<Self> {
        let (state_tx, _) = watch::channel(SessionState::Validating);
        Arc::new(Self {
            client,
            store,
            state_tx,
            latest: AtomicU64::new(0),
        })
    }

    /// State channel the route guard and session policy watch.
    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// One validation run. No token settles invalid immediately; otherwise
    /// a success flag settles valid and refreshes the cached user; any
    /// error or non-success flag settles invalid.
    pub async fn validate(&self) {
        let run_id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if self.store.token().is_none() {
            self.settle(run_id, SessionState::Invalid);
            return;
        }

        let state = match self.client.validate_session().await {
            Ok(response) if response.success => {
                // Success without a user payload: keep the cached one.
                let user = response.user.or_else(|| self.store.read().map(|s| s.user));
                match user {
                    Some(user) => SessionState::Valid(user),
                    None => SessionState::Invalid,
                }
            }
            Ok(_) => SessionState::Invalid,
            Err(e) => {
                tracing::warn!("Session validation failed: {}", e);
                SessionState::Invalid
            }
        };

        self.settle(run_id, state);
    }

    /// Browser-focus trigger: fire-and-forget revalidation.
    pub fn notify_focus(self: &Arc<Self>) {
        let validator = Arc::clone(self);
        tokio::spawn(async move {
            validator.validate().await;
        });
    }

    /// Mount trigger plus the fixed timer. The first tick fires
    /// immediately, covering the on-mount validation.
    pub fn start(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let validator = Arc::clone(self);
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(every);
            loop {
                timer.tick().await;
                validator.validate().await;
            }
        })
    }

    /// Only the winning run touches the store: a stale run must not
    /// leave its user behind while the state carries a newer result.
    fn settle(&self, run_id: u64, state: SessionState) {
        if run_id != self.latest.load(Ordering::SeqCst) {
            tracing::debug!("Discarding stale validation result (run {})", run_id);
            return;
        }
        if let SessionState::Valid(user) = &state {
            self.store.update_user(user.clone());
        }
        // send_replace: the state must update even with no subscribers.
        self.state_tx.send_replace(state);
    }
}
