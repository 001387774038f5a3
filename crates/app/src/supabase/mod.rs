//! Supabase client: GoTrue auth plus PostgREST record collections.
//!
//! # Architecture
//!
//! - The remote store is the source of truth - NO local persistence, direct
//!   API calls on every fetch
//! - One shared `reqwest` client behind an `Arc`
//! - The client owns the [`SessionStore`]: auth calls install and destroy
//!   sessions, and every REST call picks up the current access token
//!
//! # Example
//!
//! ```rust,ignore
//! use compras_app::supabase::SupabaseClient;
//!
//! let client = SupabaseClient::new(&config);
//!
//! let session = client.sign_in("user@example.com", "secret").await?;
//!
//! let products: Vec<Product> = client
//!     .collection("PRODUTOS")
//!     .select("id, name, description, price, created_at")
//!     .order("name", OrderDirection::Ascending)
//!     .fetch()
//!     .await?;
//! ```

mod auth;
mod collections;
mod rest;

pub use rest::{Collection, OrderDirection};

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::config::AppConfig;
use crate::session::SessionStore;

/// Errors that can occur when talking to the remote store.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service answered with an error status; the message is the
    /// service's own, verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// An update or delete was attempted without any filter. Refused before
    /// the request is sent; a mutation must always be scoped.
    #[error("refusing unscoped {0} on {1}")]
    UnscopedMutation(&'static str, String),
}

/// Client for the Supabase project's auth and REST endpoints.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    http: reqwest::Client,
    rest_endpoint: String,
    auth_endpoint: String,
    anon_key: SecretString,
    sessions: SessionStore,
}

impl SupabaseClient {
    /// Create a new client with an empty session store.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            inner: Arc::new(SupabaseClientInner {
                http: reqwest::Client::new(),
                rest_endpoint: config.rest_endpoint(),
                auth_endpoint: config.auth_endpoint(),
                anon_key: config.anon_key.clone(),
                sessions: SessionStore::new(),
            }),
        }
    }

    /// The process-scoped session store owned by this client.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// The bearer token for the next request: the session's access token
    /// when signed in, the anon key otherwise.
    fn bearer_token(&self) -> String {
        self.inner.sessions.current().map_or_else(
            || self.inner.anon_key.expose_secret().to_string(),
            |session| session.access_token.expose_secret().to_string(),
        )
    }

    /// Attach the project key and bearer auth to a request.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.inner.anon_key.expose_secret())
            .bearer_auth(self.bearer_token())
    }
}

/// Pull the human-readable message out of an error response body.
///
/// PostgREST answers `{"message": ...}`, GoTrue answers either
/// `{"error_description": ...}` or `{"msg": ...}`; fall back to the raw
/// body so the user still sees something verbatim.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    body.chars().take(200).collect()
}
