//! The authenticated user's cart.

use compras_core::CartEntryId;

use crate::backend::CartApi;
use crate::error::AppError;
use crate::lifecycle::{
    ConfirmationRequest, FocusFetchController, MutationOutcome, MutationSequencer, ViewState,
};
use crate::models::CartEntryView;
use crate::navigation::{Navigator, Prompt};
use crate::session::SessionStore;

/// Cart entries joined with their products, newest first.
pub struct CartScreen<'a, B, N, P> {
    backend: &'a B,
    navigator: &'a N,
    prompt: &'a P,
    sessions: SessionStore,
    entries: FocusFetchController<CartEntryView>,
    remove_sequencer: MutationSequencer,
}

impl<'a, B: CartApi, N: Navigator, P: Prompt> CartScreen<'a, B, N, P> {
    pub fn new(backend: &'a B, navigator: &'a N, prompt: &'a P, sessions: SessionStore) -> Self {
        Self {
            backend,
            navigator,
            prompt,
            sessions,
            entries: FocusFetchController::new(),
            remove_sequencer: MutationSequencer::new(),
        }
    }

    /// Fetch the cart, scoped to the session's user.
    ///
    /// Without an authenticated session there is nothing to scope by; the
    /// fetch resolves to the unauthenticated error view.
    pub async fn refresh(&self) {
        self.entries
            .refresh(|| async {
                let user = self
                    .sessions
                    .current()
                    .and_then(|session| session.user_id())
                    .ok_or(AppError::Unauthenticated)?;
                self.backend.list_cart(user).await
            })
            .await;
    }

    #[must_use]
    pub fn view(&self) -> ViewState<CartEntryView> {
        self.entries.view()
    }

    /// Remove one entry after confirmation, then re-fetch the cart.
    pub async fn remove(&self, id: CartEntryId) -> MutationOutcome {
        let outcome = self
            .remove_sequencer
            .run(
                Some(ConfirmationRequest {
                    prompt: self.prompt,
                    title: "Remove item",
                    message: "Remove this item from your cart?",
                }),
                || Ok(()),
                |()| self.backend.remove_from_cart(id),
                || self.refresh(),
            )
            .await;

        if let MutationOutcome::Failed(err) = &outcome {
            self.prompt.notify("Remove failed", &err.to_string());
        }
        outcome
    }

    pub fn go_back(&self) {
        self.navigator.go_back();
    }

    pub fn unmount(&self) {
        self.entries.retire();
    }
}
