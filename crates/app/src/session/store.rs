//! Process-scoped session store.
//!
//! One canonical read API and one event stream for the whole process; the
//! subscription is acquired once at the root of the navigation tree and
//! screens never duplicate session reads.

use std::sync::Arc;

use tokio::sync::watch;

use super::Session;

/// Holds the current session and notifies subscribers of every change
/// (sign-in, sign-out, token refresh).
///
/// Cheaply cloneable; all clones share the same underlying channel.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    /// Create an empty store (no active session).
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Point-in-time read of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Subscribe to session changes.
    ///
    /// The receiver observes the value present at subscription time plus
    /// every subsequent replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Install a new session (sign-in, sign-up, token refresh).
    pub fn replace(&self, session: Session) {
        self.tx.send_replace(Some(session));
    }

    /// Destroy the current session (sign-out).
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
