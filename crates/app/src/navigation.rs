//! Navigation and prompt collaborators, consumed at their interface
//! boundary only.
//!
//! The stack-of-screens implementation and the platform alert dialog are
//! external; screen controllers speak to them through these traits so the
//! whole navigation/confirmation flow is testable without a UI.

use compras_core::ProductId;

/// A screen in one of the two navigator subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    // Auth navigator
    Login,
    SignUp,
    // Main navigator
    ProductList,
    ProductForm { product_id: Option<ProductId> },
    ProductDetail { product_id: ProductId },
    Cart,
    Profile,
    About,
}

/// The stack-of-screens abstraction.
pub trait Navigator {
    /// Push a screen onto the stack.
    fn navigate(&self, route: Route);
    /// Return to the prior screen.
    fn go_back(&self);
}

/// Outcome of a destructive-confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// User-facing dialogs: destructive confirmations and dismissible notices.
#[allow(async_fn_in_trait)]
pub trait Prompt {
    /// Present a confirmation with an affirmative and a cancel choice.
    async fn confirm(&self, title: &str, message: &str) -> Confirmation;

    /// Present a dismissible notice (success acknowledgments, error
    /// messages).
    fn notify(&self, title: &str, message: &str);
}
