//! Cart record types and the read-side product join.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use compras_core::{CartEntryId, ProductId, UserId};

use super::Product;

/// A cart entry as stored in the `Carrinho` collection.
///
/// Entries are only ever added and removed; there is no in-place update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: CartEntryId,
    pub id_produto: ProductId,
    pub created_user: UserId,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a cart entry.
///
/// `created_user` must be the currently authenticated user; reads and
/// deletes are scoped the same way, so an entry is only ever visible to its
/// owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCartEntry {
    pub id_produto: ProductId,
    pub created_user: UserId,
    pub created_at: DateTime<Utc>,
}

/// One row of the cart read query: the entry with its product embedded.
///
/// The embedded product is `None` when the referenced product no longer
/// exists (e.g., deleted after the entry was added).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartEntryRow {
    pub id: CartEntryId,
    pub id_produto: ProductId,
    pub created_user: UserId,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "PRODUTOS")]
    pub product: Option<Product>,
}

/// The renderable join of a cart entry with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntryView {
    pub entry_id: CartEntryId,
    pub created_at: DateTime<Utc>,
    pub product: Product,
}

impl CartEntryView {
    /// Project fetched rows into renderable views.
    ///
    /// Rows whose product is absent are skipped rather than rendered with
    /// missing data; this is a defined degradation, not an error.
    #[must_use]
    pub fn from_rows(rows: Vec<CartEntryRow>) -> Vec<Self> {
        rows.into_iter()
            .filter_map(|row| {
                row.product.map_or_else(
                    || {
                        tracing::debug!(
                            entry_id = %row.id,
                            product_id = %row.id_produto,
                            "skipping cart entry with missing product"
                        );
                        None
                    },
                    |product| {
                        Some(Self {
                            entry_id: row.id,
                            created_at: row.created_at,
                            product,
                        })
                    },
                )
            })
            .collect()
    }
}
