//! The seam between screen controllers and the remote record store.
//!
//! The Supabase client implements these traits against the real service;
//! tests implement them over in-memory state. Cart operations take the
//! owning user explicitly so ownership scoping is structural, not a detail
//! a caller can forget.

use compras_core::{CartEntryId, ProductId, UserId};

use crate::error::AppError;
use crate::models::{CartEntryView, NewCartEntry, NewProduct, Product};
use crate::session::Session;

/// Disposition of a sign-up call.
///
/// The auth service either starts a session immediately or requires the
/// user to confirm their email address first.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// The account exists and a session was started.
    SignedIn(Session),
    /// The account was created but must be confirmed before sign-in.
    ConfirmationRequired,
}

/// Authentication operations.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Sign in with email and password, installing the resulting session in
    /// the session store.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError>;

    /// Register a new account.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpOutcome, AppError>;

    /// Destroy the current session.
    async fn sign_out(&self) -> Result<(), AppError>;
}

/// Product collection operations.
#[allow(async_fn_in_trait)]
pub trait ProductApi {
    /// All products, ascending by name.
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;

    /// One product by id; `AppError::NotFound` when absent.
    async fn get_product(&self, id: ProductId) -> Result<Product, AppError>;

    /// Create a product.
    async fn insert_product(&self, product: &NewProduct) -> Result<(), AppError>;

    /// Update the product with the given id.
    async fn update_product(&self, id: ProductId, patch: &NewProduct) -> Result<(), AppError>;

    /// Delete the product with the given id.
    async fn delete_product(&self, id: ProductId) -> Result<(), AppError>;
}

/// Cart collection operations, always scoped to one owning user.
#[allow(async_fn_in_trait)]
pub trait CartApi {
    /// The user's cart entries joined with their products, newest first.
    /// Entries whose product no longer exists are skipped.
    async fn list_cart(&self, user: UserId) -> Result<Vec<CartEntryView>, AppError>;

    /// Add a product to the owning user's cart.
    async fn add_to_cart(&self, entry: &NewCartEntry) -> Result<(), AppError>;

    /// Remove one cart entry by id.
    async fn remove_from_cart(&self, id: CartEntryId) -> Result<(), AppError>;
}
