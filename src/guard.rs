// src/guard.rs

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::user::{Role, User};
use crate::session::store::SessionStore;
use crate::session::validator::{SessionState, SessionValidator};

/// The navigable destinations the client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    AdminDashboard,
    SubadminDashboard,
    StudentDashboard,
}

/// Replacement navigation (history-replacing, like a forced redirect).
pub trait Navigator: Send + Sync {
    fn replace(&self, route: Route);
}

/// What the guard tells a protected view to do.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardState {
    /// Validation still in flight: render the loading placeholder,
    /// suspend everything downstream.
    Loading,
    Redirect(Route),
    Allow(User),
}

/// Wraps a protected view: blocks until the session validator settles,
/// then redirects unauthenticated users to login and role-mismatched users
/// to their own dashboard (a soft redirect, not an error page).
pub struct RouteGuard {
    state: watch::Receiver<SessionState>,
    store: Arc<SessionStore>,
}

impl RouteGuard {
    pub fn new(validator: &SessionValidator, store: Arc<SessionStore>) -> Self {
        Self {
            state: validator.state(),
            store,
        }
    }

    /// Snapshot of the guard decision. `Loading` for the entire validating
    /// phase; no redirect is issued before settlement.
    pub fn check(&self, allowed: Option<&[Role]>) -> GuardState {
        self.decide(self.state.borrow().clone(), allowed)
    }

    /// Awaits settlement, then decides. Never yields `Loading`.
    pub async fn resolve(&mut self, allowed: Option<&[Role]>) -> GuardState {
        loop {
            let current = self.state.borrow_and_update().clone();
            if current.is_settled() {
                return self.decide(current, allowed);
            }
            if self.state.changed().await.is_err() {
                // Validator gone: treat as invalid.
                return self.decide(SessionState::Invalid, allowed);
            }
        }
    }

    fn decide(&self, state: SessionState, allowed: Option<&[Role]>) -> GuardState {
        match state {
            SessionState::Validating => GuardState::Loading,
            SessionState::Invalid => {
                // Drop any stale session remnants before bouncing to login.
                self.store.clear();
                GuardState::Redirect(Route::Login)
            }
            SessionState::Valid(user) => match allowed {
                Some(roles) if !roles.contains(&user.role) => {
                    GuardState::Redirect(user.role.home_route())
                }
                _ => GuardState::Allow(user),
            },
        }
    }
}
