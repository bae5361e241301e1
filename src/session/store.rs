// src/session/store.rs

use std::path::PathBuf;
use std::sync::RwLock;

use tokio::sync::watch;

use crate::models::user::{Session, User};

/// The one cross-component shared mutable resource: the current session.
///
/// Explicit injectable session context instead of ambient key-value access:
/// components read through `read()`/`token()` and observe changes through
/// `subscribe()`. Writers are login, logout, and the invalidation path.
/// Writes are brief synchronous operations; an optional backing file is
/// written through on every change (the localStorage analogue).
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
    tx: watch::Sender<Option<Session>>,
    backing: Option<PathBuf>,
}

impl SessionStore {
    /// In-memory store with no persistence.
    pub fn in_memory() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            inner: RwLock::new(None),
            tx,
            backing: None,
        }
    }

    /// File-backed store. Loads any previously persisted session; a missing
    /// or unreadable file just starts empty.
    pub fn with_backing(path: PathBuf) -> Self {
        let initial: Option<Session> = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok());

        let (tx, _) = watch::channel(initial.clone());
        Self {
            inner: RwLock::new(initial),
            tx,
            backing: Some(path),
        }
    }

    /// Persists token + user synchronously.
    pub fn save(&self, session: Session) {
        self.persist(Some(&session));
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        self.tx.send_replace(Some(session));
    }

    /// Replaces only the cached user, keeping the token (the validator
    /// refreshes the user object on every successful check).
    pub fn update_user(&self, user: User) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(session) = guard.as_mut() {
            session.user = user;
            let updated = session.clone();
            drop(guard);
            self.persist(Some(&updated));
            self.tx.send_replace(Some(updated));
        }
    }

    pub fn read(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// Removes every session key together.
    pub fn clear(&self) {
        self.persist(None);
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.tx.send_replace(None);
    }

    /// Notification channel for cross-component updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    fn persist(&self, session: Option<&Session>) {
        let Some(path) = &self.backing else {
            return;
        };
        let result = match session {
            Some(session) => serde_json::to_string(session)
                .map_err(std::io::Error::other)
                .and_then(|raw| std::fs::write(path, raw)),
            None => match std::fs::remove_file(path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            tracing::warn!("Failed to persist session to {:?}: {}", path, e);
        }
    }
}
