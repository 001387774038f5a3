//! PostgREST collection query builder.
//!
//! `client.collection("PRODUTOS").select(..).eq(..).order(..).fetch()` and
//! friends. Responses are read as text first so a malformed body still
//! yields a useful diagnostic, and error messages from the service are
//! surfaced verbatim.

use core::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::{SupabaseClient, SupabaseError, extract_error_message};

/// Sort direction for [`Collection::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A query against one remote collection.
///
/// Built by [`SupabaseClient::collection`]; consumed by one of the terminal
/// operations (`fetch`, `fetch_one`, `insert`, `update`, `delete`).
pub struct Collection<'a> {
    client: &'a SupabaseClient,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, OrderDirection)>,
}

impl SupabaseClient {
    /// Start a query against a collection.
    #[must_use]
    pub fn collection(&self, table: &str) -> Collection<'_> {
        Collection {
            client: self,
            table: table.to_string(),
            select: None,
            filters: Vec::new(),
            order: None,
        }
    }
}

impl Collection<'_> {
    /// Columns (and embedded resources) to return.
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    /// Equality filter on a column.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Sort order of the result set.
    #[must_use]
    pub fn order(mut self, column: &str, direction: OrderDirection) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    fn url(&self) -> String {
        format!("{}/{}", self.client.inner.rest_endpoint, self.table)
    }

    /// Query string pairs for this query, in a stable order.
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if let Some((column, direction)) = &self.order {
            pairs.push(("order".to_string(), format!("{column}.{}", direction.as_str())));
        }
        pairs
    }

    /// Fetch all matching rows.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` on transport failure, an error response from
    /// the service, or an unparsable body.
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, SupabaseError> {
        let request = self
            .client
            .inner
            .http
            .get(self.url())
            .query(&self.query_pairs());
        let body = self.client.send(request, &self.table).await?;

        match serde_json::from_str(&body) {
            Ok(rows) => Ok(rows),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "failed to parse collection response"
                );
                Err(SupabaseError::Parse(e))
            }
        }
    }

    /// Fetch exactly one matching row.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::NotFound` when no row matches, in addition to
    /// the failure modes of [`Collection::fetch`].
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T, SupabaseError> {
        let request = self
            .client
            .inner
            .http
            .get(self.url())
            .query(&self.query_pairs())
            // PostgREST returns a bare object (or 406) instead of an array
            .header("Accept", "application/vnd.pgrst.object+json");
        let body = self.client.send(request, &self.table).await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Insert one row.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` on transport failure or an error response.
    #[instrument(skip(self, row), fields(table = %self.table))]
    pub async fn insert(self, row: &impl Serialize) -> Result<(), SupabaseError> {
        let request = self
            .client
            .inner
            .http
            .post(self.url())
            .header("Prefer", "return=minimal")
            .json(row);
        self.client.send(request, &self.table).await?;
        Ok(())
    }

    /// Update all matching rows.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::UnscopedMutation` when no filter was applied,
    /// plus the transport/service failure modes.
    #[instrument(skip(self, patch), fields(table = %self.table))]
    pub async fn update(self, patch: &impl Serialize) -> Result<(), SupabaseError> {
        if self.filters.is_empty() {
            return Err(SupabaseError::UnscopedMutation("update", self.table));
        }

        let request = self
            .client
            .inner
            .http
            .patch(self.url())
            .query(&self.query_pairs())
            .header("Prefer", "return=minimal")
            .json(patch);
        self.client.send(request, &self.table).await?;
        Ok(())
    }

    /// Delete all matching rows.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::UnscopedMutation` when no filter was applied,
    /// plus the transport/service failure modes.
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn delete(self) -> Result<(), SupabaseError> {
        if self.filters.is_empty() {
            return Err(SupabaseError::UnscopedMutation("delete", self.table));
        }

        let request = self
            .client
            .inner
            .http
            .delete(self.url())
            .query(&self.query_pairs());
        self.client.send(request, &self.table).await?;
        Ok(())
    }
}

impl SupabaseClient {
    /// Send an authorized request and return the response body.
    ///
    /// The body is read as text before any status/parse handling so error
    /// diagnostics always have something to show.
    pub(super) async fn send(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<String, SupabaseError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::NOT_ACCEPTABLE
        {
            return Err(SupabaseError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::error!(
                status = %status,
                message = %message,
                "remote store returned an error"
            );
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}
