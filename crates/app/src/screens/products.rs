//! Product list, detail, and create/edit form screens.

use chrono::Utc;

use compras_core::{Price, ProductId};

use crate::backend::{CartApi, ProductApi};
use crate::error::AppError;
use crate::lifecycle::{
    ConfirmationRequest, FocusFetchController, MutationOutcome, MutationSequencer, ViewState,
};
use crate::models::{NewCartEntry, NewProduct, Product};
use crate::navigation::{Navigator, Prompt, Route};
use crate::session::SessionStore;

/// The catalog list with delete and add-to-cart actions.
pub struct ProductListScreen<'a, B, N, P> {
    backend: &'a B,
    navigator: &'a N,
    prompt: &'a P,
    sessions: SessionStore,
    products: FocusFetchController<Product>,
    delete_sequencer: MutationSequencer,
    cart_sequencer: MutationSequencer,
}

impl<'a, B, N, P> ProductListScreen<'a, B, N, P>
where
    B: ProductApi + CartApi,
    N: Navigator,
    P: Prompt,
{
    pub fn new(backend: &'a B, navigator: &'a N, prompt: &'a P, sessions: SessionStore) -> Self {
        Self {
            backend,
            navigator,
            prompt,
            sessions,
            products: FocusFetchController::new(),
            delete_sequencer: MutationSequencer::new(),
            cart_sequencer: MutationSequencer::new(),
        }
    }

    /// Fetch the catalog. Runs on mount, focus, and pull-to-refresh.
    pub async fn refresh(&self) {
        self.products
            .refresh(|| self.backend.list_products())
            .await;
    }

    #[must_use]
    pub fn view(&self) -> ViewState<Product> {
        self.products.view()
    }

    /// Delete a product after confirmation, then re-fetch the list.
    pub async fn delete(&self, id: ProductId) -> MutationOutcome {
        let outcome = self
            .delete_sequencer
            .run(
                Some(ConfirmationRequest {
                    prompt: self.prompt,
                    title: "Delete product",
                    message: "Are you sure you want to delete this product?",
                }),
                || Ok(()),
                |()| self.backend.delete_product(id),
                || self.refresh(),
            )
            .await;

        if let MutationOutcome::Failed(err) = &outcome {
            self.prompt.notify("Delete failed", &err.to_string());
        }
        outcome
    }

    /// Add a product to the authenticated user's cart.
    ///
    /// Aborts with `Unauthenticated` when no session carries a user; the
    /// cart list itself is re-fetched when its screen gains focus, so no
    /// re-fetch runs here.
    pub async fn add_to_cart(&self, product: ProductId) -> MutationOutcome {
        let outcome = self
            .cart_sequencer
            .run(
                None::<ConfirmationRequest<'_, P>>,
                || {
                    let user = self
                        .sessions
                        .current()
                        .and_then(|session| session.user_id())
                        .ok_or(AppError::Unauthenticated)?;
                    Ok(NewCartEntry {
                        id_produto: product,
                        created_user: user,
                        created_at: Utc::now(),
                    })
                },
                |entry| async move { self.backend.add_to_cart(&entry).await },
                || async {},
            )
            .await;

        match &outcome {
            MutationOutcome::Completed => {
                self.prompt.notify("Cart", "Product added to cart.");
            }
            MutationOutcome::Rejected(err) | MutationOutcome::Failed(err) => {
                self.prompt.notify("Cart", &err.to_string());
            }
            MutationOutcome::Cancelled | MutationOutcome::Suppressed => {}
        }
        outcome
    }

    pub fn open_detail(&self, id: ProductId) {
        self.navigator.navigate(Route::ProductDetail { product_id: id });
    }

    pub fn open_form(&self, id: Option<ProductId>) {
        self.navigator.navigate(Route::ProductForm { product_id: id });
    }

    pub fn open_cart(&self) {
        self.navigator.navigate(Route::Cart);
    }

    pub fn unmount(&self) {
        self.products.retire();
    }
}

/// A single product, fetched by id.
pub struct ProductDetailScreen<'a, B, N> {
    backend: &'a B,
    navigator: &'a N,
    product_id: ProductId,
    product: FocusFetchController<Product>,
}

impl<'a, B: ProductApi, N: Navigator> ProductDetailScreen<'a, B, N> {
    pub fn new(backend: &'a B, navigator: &'a N, product_id: ProductId) -> Self {
        Self {
            backend,
            navigator,
            product_id,
            product: FocusFetchController::new(),
        }
    }

    /// Fetch the product. An absent record surfaces as an error view with
    /// retry and go-back affordances, not a crash.
    pub async fn refresh(&self) {
        self.product
            .refresh(|| async {
                let product = self.backend.get_product(self.product_id).await?;
                Ok(vec![product])
            })
            .await;
    }

    #[must_use]
    pub fn view(&self) -> ViewState<Product> {
        self.product.view()
    }

    #[must_use]
    pub fn product(&self) -> Option<Product> {
        self.product.records().into_iter().next()
    }

    /// Creation date rendered as dd/mm/yyyy, when the row carries one.
    #[must_use]
    pub fn added_on(&self) -> Option<String> {
        self.product()
            .and_then(|p| p.created_at)
            .map(|date| date.format("%d/%m/%Y").to_string())
    }

    pub fn go_back(&self) {
        self.navigator.go_back();
    }

    pub fn unmount(&self) {
        self.product.retire();
    }
}

/// Create/edit form. `product_id` decides the mode.
pub struct ProductFormScreen<'a, B, N, P> {
    backend: &'a B,
    navigator: &'a N,
    prompt: &'a P,
    product_id: Option<ProductId>,
    sequencer: MutationSequencer,
}

impl<'a, B: ProductApi, N: Navigator, P: Prompt> ProductFormScreen<'a, B, N, P> {
    pub fn new(
        backend: &'a B,
        navigator: &'a N,
        prompt: &'a P,
        product_id: Option<ProductId>,
    ) -> Self {
        Self {
            backend,
            navigator,
            prompt,
            product_id,
            sequencer: MutationSequencer::new(),
        }
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.product_id.is_some()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.sequencer.is_submitting()
    }

    /// Load the product being edited to pre-fill the form.
    ///
    /// A failed prefetch leaves nothing to edit: the user is told and the
    /// screen is popped.
    pub async fn prefetch(&self) -> Option<Product> {
        let id = self.product_id?;
        match self.backend.get_product(id).await {
            Ok(product) => Some(product),
            Err(err) => {
                self.prompt.notify("Error", &err.to_string());
                self.navigator.go_back();
                None
            }
        }
    }

    fn validate(name: &str, description: &str, price: &str) -> Result<NewProduct, AppError> {
        if name.trim().is_empty() || description.trim().is_empty() || price.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in all fields.".to_string(),
            ));
        }
        let price = Price::parse(price)
            .map_err(|_| AppError::Validation("Please enter a valid price.".to_string()))?;
        Ok(NewProduct {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            price,
            created_at: Utc::now(),
        })
    }

    /// Validate and save, acknowledging and popping the screen on success.
    ///
    /// The list re-fetches when it regains focus, so no re-fetch runs here.
    pub async fn save(&self, name: &str, description: &str, price: &str) -> MutationOutcome {
        let outcome = self
            .sequencer
            .run(
                None::<ConfirmationRequest<'_, P>>,
                || Self::validate(name, description, price),
                |payload| async move {
                    match self.product_id {
                        Some(id) => self.backend.update_product(id, &payload).await,
                        None => self.backend.insert_product(&payload).await,
                    }
                },
                || async {},
            )
            .await;

        match &outcome {
            MutationOutcome::Completed => {
                self.prompt.notify("Success", "Product saved.");
                self.navigator.go_back();
            }
            MutationOutcome::Rejected(err) | MutationOutcome::Failed(err) => {
                self.prompt.notify("Error", &err.to_string());
            }
            MutationOutcome::Cancelled | MutationOutcome::Suppressed => {}
        }
        outcome
    }

    pub fn cancel(&self) {
        self.navigator.go_back();
    }
}
