//! Session state: the canonical session store and the navigation gate.

mod gate;
mod store;

pub use gate::{GateState, NavigationRoot, SessionGate, run_gate};
pub use store::SessionStore;

use secrecy::SecretString;

use compras_core::{Email, UserId};

/// The proof of authentication plus user identity.
///
/// Owned exclusively by the [`SessionStore`]; screens hold at most a
/// read-only snapshot.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque access token presented to the record store on every call.
    pub access_token: SecretString,
    /// The authenticated user, if the session carries one. A session without
    /// a user identity is treated as unauthenticated by the gate.
    pub user: Option<SessionUser>,
}

impl Session {
    /// The user identity, if present.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }
}

/// Identity carried by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub email: Email,
}
