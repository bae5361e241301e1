// src/session/policy.rs

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::gateway::AuthEvent;
use crate::guard::{Navigator, Route};
use crate::session::store::SessionStore;
use crate::session::validator::SessionState;

/// The single place that turns an authentication failure into a logout.
///
/// Listens to the gateway's auth events (any in-flight call answering 401)
/// and the validator's state channel; either source of invalidation clears
/// the session store and replaces the current view with the login route.
/// The gateway itself never clears or redirects.
pub struct SessionPolicy;

impl SessionPolicy {
    pub fn spawn(
        mut auth_events: broadcast::Receiver<AuthEvent>,
        mut session_state: watch::Receiver<SessionState>,
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = auth_events.recv() => match event {
                        Ok(AuthEvent::SessionRejected) => {
                            Self::invalidate(&store, navigator.as_ref());
                        }
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    changed = session_state.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        if *session_state.borrow_and_update() == SessionState::Invalid {
                            Self::invalidate(&store, navigator.as_ref());
                        }
                    }
                }
            }
        })
    }

    fn invalidate(store: &SessionStore, navigator: &dyn Navigator) {
        if store.read().is_some() {
            tracing::info!("Session invalidated, clearing and returning to login");
        }
        store.clear();
        navigator.replace(Route::Login);
    }
}
