//! GoTrue authentication calls.
//!
//! Sign-in and sign-up install the resulting session into the client's
//! [`SessionStore`](crate::session::SessionStore); sign-out always clears it,
//! even when the remote call fails.

use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use compras_core::{Email, UserId};

use super::{SupabaseClient, SupabaseError};
use crate::backend::SignUpOutcome;
use crate::session::{Session, SessionUser};

/// Successful password-grant response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    user: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: UserId,
    #[serde(default)]
    email: Option<Email>,
}

/// Sign-up answers with a full session when the project auto-confirms, or
/// with a bare user record when email confirmation is still pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    UserOnly(WireUser),
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            access_token: SecretString::from(self.access_token),
            user: self.user.and_then(|user| {
                user.email.map(|email| SessionUser {
                    id: user.id,
                    email,
                })
            }),
        }
    }
}

impl SupabaseClient {
    /// Sign in with email and password.
    ///
    /// On success the session is installed in the store before it is
    /// returned, so gate subscribers observe the change immediately.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` on transport failure or rejected credentials;
    /// the service's message ("Invalid login credentials") is carried
    /// verbatim.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SupabaseError> {
        let request = self
            .inner
            .http
            .post(format!(
                "{}/token?grant_type=password",
                self.inner.auth_endpoint
            ))
            .json(&serde_json::json!({ "email": email, "password": password }));
        let body = self.send(request, "session").await?;

        let token: TokenResponse = serde_json::from_str(&body)?;
        let session = token.into_session();
        self.inner.sessions.replace(session.clone());

        tracing::info!("signed in");
        Ok(session)
    }

    /// Register a new account with a display name.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` on transport failure or when the service
    /// rejects the registration.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpOutcome, SupabaseError> {
        let request = self
            .inner
            .http
            .post(format!("{}/signup", self.inner.auth_endpoint))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }));
        let body = self.send(request, "account").await?;

        match serde_json::from_str::<SignUpResponse>(&body)? {
            SignUpResponse::Session(token) => {
                let session = token.into_session();
                self.inner.sessions.replace(session.clone());
                tracing::info!("signed up with immediate session");
                Ok(SignUpOutcome::SignedIn(session))
            }
            SignUpResponse::UserOnly(_) => {
                tracing::info!("signed up, email confirmation pending");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    /// Destroy the current session.
    ///
    /// The local session is cleared unconditionally. A failure to revoke the
    /// token remotely is logged and swallowed; the user is signed out of the
    /// app either way.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        let request = self
            .inner
            .http
            .post(format!("{}/logout", self.inner.auth_endpoint));
        if let Err(err) = self.send(request, "session").await {
            tracing::warn!(error = %err, "remote sign-out failed");
        }
        self.inner.sessions.clear();
        tracing::info!("signed out");
    }
}
