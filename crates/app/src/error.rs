//! Screen-level error taxonomy.
//!
//! Every remote call is converted to an [`AppError`] at its boundary and
//! becomes part of the owning screen's state; nothing propagates to a global
//! handler or crashes the process.

use thiserror::Error;

use crate::supabase::SupabaseError;

/// Errors surfaced to the user by a screen.
///
/// `Clone` and `PartialEq` so controllers can hold the error as state and
/// tests can compare dispositions directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No valid session where one is required (cart mutations).
    #[error("User is not authenticated")]
    Unauthenticated,

    /// Local, pre-flight validation failure. The remote call is never
    /// attempted.
    #[error("{0}")]
    Validation(String),

    /// Failure returned by the remote store, surfaced verbatim.
    #[error("{0}")]
    Remote(String),

    /// Requested record is absent.
    #[error("{0} not found")]
    NotFound(String),
}

impl From<SupabaseError> for AppError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::NotFound(what) => Self::NotFound(what),
            // The remote message is part of the user-facing contract: it is
            // shown verbatim in the error notice.
            other => Self::Remote(other.to_string()),
        }
    }
}
