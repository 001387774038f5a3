//! The session gate: turns session store events into navigation decisions.
//!
//! State machine: `Loading -> {Unauthenticated, Authenticated}`, thereafter
//! `Unauthenticated <-> Authenticated` on every store emission, for the
//! process lifetime. The decision is driven purely by the presence of a user
//! identity on the emitted session.

use crate::error::AppError;

use super::{Session, SessionStore};

/// Gate state, three-valued only until the first read resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Before the first session read has resolved.
    Loading,
    /// No active session; the auth navigator is mounted.
    Unauthenticated,
    /// A session with a user identity; the main navigator is mounted.
    Authenticated,
}

/// Which navigator subtree is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRoot {
    /// Sign-in / sign-up screens only.
    Auth,
    /// Product catalog, cart, profile.
    Main,
}

/// The navigation authority.
///
/// Holds nothing but its own state; mounting and unmounting the two
/// navigator subtrees is the caller's side of the contract.
#[derive(Debug)]
pub struct SessionGate {
    state: GateState,
}

impl SessionGate {
    /// Create a gate in the initial `Loading` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GateState::Loading,
        }
    }

    /// Current gate state.
    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// Apply a session emission and decide the navigation root.
    ///
    /// A session that carries no user identity routes to the auth navigator
    /// exactly like an absent session.
    pub fn apply(&mut self, session: Option<&Session>) -> NavigationRoot {
        let authenticated = session.is_some_and(|s| s.user.is_some());
        if authenticated {
            self.state = GateState::Authenticated;
            NavigationRoot::Main
        } else {
            self.state = GateState::Unauthenticated;
            NavigationRoot::Auth
        }
    }

    /// Apply the result of the initial point-in-time read.
    ///
    /// A failed read routes to sign-in rather than leaving the gate stuck on
    /// `Loading`.
    pub fn apply_read(&mut self, read: Result<Option<Session>, AppError>) -> NavigationRoot {
        match read {
            Ok(session) => self.apply(session.as_ref()),
            Err(err) => {
                tracing::warn!(error = %err, "initial session read failed, routing to sign-in");
                self.apply(None)
            }
        }
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive a gate from the store for the process lifetime.
///
/// Performs the one point-in-time read, then forwards every subscription
/// event; `on_root` is invoked with each navigation decision. Returns when
/// the store is dropped.
pub async fn run_gate(store: &SessionStore, mut on_root: impl FnMut(NavigationRoot)) {
    // Subscribe before the initial read so no change between the two is lost.
    let mut rx = store.subscribe();

    let mut gate = SessionGate::new();
    on_root(gate.apply_read(Ok(store.current())));

    while rx.changed().await.is_ok() {
        let root = gate.apply(rx.borrow_and_update().as_ref());
        on_root(root);
    }
}
