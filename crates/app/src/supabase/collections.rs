//! Backend trait implementations over the remote collections.
//!
//! Queries mirror the deployed schema: products live in `PRODUTOS`, cart
//! entries in `Carrinho` with an embedded-product read query, and every cart
//! query is scoped to the owning user.

use compras_core::{CartEntryId, ProductId, UserId};

use super::{OrderDirection, SupabaseClient, SupabaseError};
use crate::backend::{AuthApi, CartApi, ProductApi, SignUpOutcome};
use crate::error::AppError;
use crate::models::{CartEntryRow, CartEntryView, NewCartEntry, NewProduct, Product};
use crate::session::Session;

const PRODUCTS_TABLE: &str = "PRODUTOS";
const CART_TABLE: &str = "Carrinho";

const PRODUCT_COLUMNS: &str = "id, name, description, price, created_at";
const CART_COLUMNS: &str =
    "id, created_at, id_produto, created_user, PRODUTOS ( id, name, description, price, created_at )";

/// A single-row lookup miss is reported by entity, not by table name.
fn product_not_found(err: SupabaseError) -> AppError {
    match err {
        SupabaseError::NotFound(_) => AppError::NotFound("Product".to_string()),
        other => other.into(),
    }
}

impl AuthApi for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        Ok(SupabaseClient::sign_in(self, email, password).await?)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpOutcome, AppError> {
        Ok(SupabaseClient::sign_up(self, email, password, full_name).await?)
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        SupabaseClient::sign_out(self).await;
        Ok(())
    }
}

impl ProductApi for SupabaseClient {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self
            .collection(PRODUCTS_TABLE)
            .select(PRODUCT_COLUMNS)
            .order("name", OrderDirection::Ascending)
            .fetch()
            .await?)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, AppError> {
        self.collection(PRODUCTS_TABLE)
            .select(PRODUCT_COLUMNS)
            .eq("id", id)
            .fetch_one()
            .await
            .map_err(product_not_found)
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<(), AppError> {
        Ok(self.collection(PRODUCTS_TABLE).insert(product).await?)
    }

    async fn update_product(&self, id: ProductId, patch: &NewProduct) -> Result<(), AppError> {
        Ok(self
            .collection(PRODUCTS_TABLE)
            .eq("id", id)
            .update(patch)
            .await?)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), AppError> {
        Ok(self
            .collection(PRODUCTS_TABLE)
            .eq("id", id)
            .delete()
            .await?)
    }
}

impl CartApi for SupabaseClient {
    async fn list_cart(&self, user: UserId) -> Result<Vec<CartEntryView>, AppError> {
        let rows: Vec<CartEntryRow> = self
            .collection(CART_TABLE)
            .select(CART_COLUMNS)
            .eq("created_user", user)
            .order("created_at", OrderDirection::Descending)
            .fetch()
            .await?;
        Ok(CartEntryView::from_rows(rows))
    }

    async fn add_to_cart(&self, entry: &NewCartEntry) -> Result<(), AppError> {
        Ok(self.collection(CART_TABLE).insert(entry).await?)
    }

    async fn remove_from_cart(&self, id: CartEntryId) -> Result<(), AppError> {
        Ok(self.collection(CART_TABLE).eq("id", id).delete().await?)
    }
}
