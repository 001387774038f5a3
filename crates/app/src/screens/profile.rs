//! Profile screen: account info, sign-out, and the About page.

use crate::backend::AuthApi;
use crate::lifecycle::{ConfirmationRequest, MutationOutcome, MutationSequencer};
use crate::navigation::{Navigator, Prompt, Route};
use crate::session::SessionStore;

pub struct ProfileScreen<'a, B, N, P> {
    backend: &'a B,
    navigator: &'a N,
    prompt: &'a P,
    sessions: SessionStore,
    sequencer: MutationSequencer,
}

impl<'a, B: AuthApi, N: Navigator, P: Prompt> ProfileScreen<'a, B, N, P> {
    pub fn new(backend: &'a B, navigator: &'a N, prompt: &'a P, sessions: SessionStore) -> Self {
        Self {
            backend,
            navigator,
            prompt,
            sessions,
            sequencer: MutationSequencer::new(),
        }
    }

    /// The signed-in user's email, for display.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.sessions
            .current()
            .and_then(|session| session.user.map(|user| user.email.to_string()))
    }

    /// Sign out after confirmation. Clearing the session flips the gate back
    /// to the auth root; no navigation happens here.
    pub async fn sign_out(&self) -> MutationOutcome {
        let outcome = self
            .sequencer
            .run(
                Some(ConfirmationRequest {
                    prompt: self.prompt,
                    title: "Sign out",
                    message: "Are you sure you want to sign out?",
                }),
                || Ok(()),
                |()| self.backend.sign_out(),
                || async {},
            )
            .await;

        if let MutationOutcome::Failed(err) = &outcome {
            self.prompt.notify("Sign out failed", &err.to_string());
        }
        outcome
    }

    pub fn open_about(&self) {
        self.navigator.navigate(Route::About);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::navigation::Confirmation;
    use crate::testing::{InMemoryBackend, NavEvent, RecordingNavigator, ScriptedPrompt};

    async fn signed_in_backend() -> InMemoryBackend {
        let backend = InMemoryBackend::new();
        backend.register_user("user@example.com", "secret1");
        backend.sign_in("user@example.com", "secret1").await.unwrap();
        backend
    }

    #[tokio::test]
    async fn test_email_comes_from_the_session() {
        let backend = signed_in_backend().await;
        let navigator = RecordingNavigator::new();
        let prompt = ScriptedPrompt::new();
        let screen =
            ProfileScreen::new(&backend, &navigator, &prompt, backend.sessions.clone());

        assert_eq!(screen.email().unwrap(), "user@example.com");
    }

    #[tokio::test]
    async fn test_confirmed_sign_out_clears_the_session() {
        let backend = signed_in_backend().await;
        let navigator = RecordingNavigator::new();
        let prompt = ScriptedPrompt::answering([Confirmation::Confirmed]);
        let screen =
            ProfileScreen::new(&backend, &navigator, &prompt, backend.sessions.clone());

        let outcome = screen.sign_out().await;

        assert_eq!(outcome, MutationOutcome::Completed);
        assert!(backend.sessions.current().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_sign_out_keeps_the_session() {
        let backend = signed_in_backend().await;
        let navigator = RecordingNavigator::new();
        let prompt = ScriptedPrompt::answering([Confirmation::Cancelled]);
        let screen =
            ProfileScreen::new(&backend, &navigator, &prompt, backend.sessions.clone());

        let outcome = screen.sign_out().await;

        assert_eq!(outcome, MutationOutcome::Cancelled);
        assert!(backend.sessions.current().is_some());
        assert_eq!(backend.calls("sign_out"), 0);
    }

    #[tokio::test]
    async fn test_open_about_navigates() {
        let backend = InMemoryBackend::new();
        let navigator = RecordingNavigator::new();
        let prompt = ScriptedPrompt::new();
        let screen =
            ProfileScreen::new(&backend, &navigator, &prompt, backend.sessions.clone());

        screen.open_about();
        assert_eq!(navigator.events(), vec![NavEvent::To(Route::About)]);
    }
}
