//! Sign-in and sign-up screens.
//!
//! Neither screen swaps the navigation root itself: a successful sign-in
//! installs a session, and the session gate reacts to the change.

use std::cell::Cell;

use crate::backend::{AuthApi, SignUpOutcome};
use crate::error::AppError;
use crate::lifecycle::{ConfirmationRequest, MutationOutcome, MutationSequencer};
use crate::navigation::{Navigator, Prompt, Route};

/// Minimum accepted password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Email and password sign-in.
pub struct LoginScreen<'a, B, N, P> {
    backend: &'a B,
    navigator: &'a N,
    prompt: &'a P,
    sequencer: MutationSequencer,
}

impl<'a, B: AuthApi, N: Navigator, P: Prompt> LoginScreen<'a, B, N, P> {
    pub fn new(backend: &'a B, navigator: &'a N, prompt: &'a P) -> Self {
        Self {
            backend,
            navigator,
            prompt,
            sequencer: MutationSequencer::new(),
        }
    }

    /// Whether the submit control should be disabled.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.sequencer.is_submitting()
    }

    /// Attempt a sign-in with the entered credentials.
    ///
    /// Validation and remote failures are surfaced as notices; success has
    /// no navigation side effect here (the gate swaps the root).
    pub async fn submit(&self, email: &str, password: &str) -> MutationOutcome {
        let outcome = self
            .sequencer
            .run(
                None::<ConfirmationRequest<'_, P>>,
                || {
                    if email.trim().is_empty() || password.is_empty() {
                        return Err(AppError::Validation(
                            "Please fill in all fields.".to_string(),
                        ));
                    }
                    Ok(())
                },
                |()| async {
                    self.backend.sign_in(email.trim(), password).await?;
                    Ok(())
                },
                || async {},
            )
            .await;

        if let MutationOutcome::Rejected(err) | MutationOutcome::Failed(err) = &outcome {
            self.prompt.notify("Sign in failed", &err.to_string());
        }
        outcome
    }

    pub fn open_sign_up(&self) {
        self.navigator.navigate(Route::SignUp);
    }
}

/// Account registration.
pub struct SignUpScreen<'a, B, N, P> {
    backend: &'a B,
    navigator: &'a N,
    prompt: &'a P,
    sequencer: MutationSequencer,
}

impl<'a, B: AuthApi, N: Navigator, P: Prompt> SignUpScreen<'a, B, N, P> {
    pub fn new(backend: &'a B, navigator: &'a N, prompt: &'a P) -> Self {
        Self {
            backend,
            navigator,
            prompt,
            sequencer: MutationSequencer::new(),
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.sequencer.is_submitting()
    }

    fn validate(
        full_name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<(), AppError> {
        if full_name.trim().is_empty()
            || email.trim().is_empty()
            || password.is_empty()
            || password_confirmation.is_empty()
        {
            return Err(AppError::Validation(
                "Please fill in all fields.".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters."
            )));
        }
        if password != password_confirmation {
            return Err(AppError::Validation("Passwords do not match.".to_string()));
        }
        Ok(())
    }

    /// Attempt to create an account.
    ///
    /// When the service answers with a session the gate takes over; when it
    /// requires email confirmation the user is told so and sent back to the
    /// sign-in screen.
    pub async fn submit(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> MutationOutcome {
        let disposition = Cell::new(None);
        let outcome = self
            .sequencer
            .run(
                None::<ConfirmationRequest<'_, P>>,
                || Self::validate(full_name, email, password, password_confirmation),
                |()| async {
                    let result = self
                        .backend
                        .sign_up(email.trim(), password, full_name.trim())
                        .await?;
                    disposition.set(Some(result));
                    Ok(())
                },
                || async {},
            )
            .await;

        match &outcome {
            MutationOutcome::Completed => {
                if let Some(SignUpOutcome::ConfirmationRequired) = disposition.into_inner() {
                    self.prompt.notify(
                        "Check your email",
                        "Confirm your email address to finish creating the account.",
                    );
                    self.navigator.navigate(Route::Login);
                }
            }
            MutationOutcome::Rejected(err) | MutationOutcome::Failed(err) => {
                self.prompt.notify("Sign up failed", &err.to_string());
            }
            MutationOutcome::Cancelled | MutationOutcome::Suppressed => {}
        }
        outcome
    }

    pub fn open_login(&self) {
        self.navigator.navigate(Route::Login);
    }
}
