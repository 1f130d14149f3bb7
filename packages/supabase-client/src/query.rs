use std::fmt::Display;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SupabaseError};
use crate::SupabaseClient;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Horizontal filter operators understood by PostgREST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gte,
    Lte,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
        }
    }
}

/// Request against one table, built up fluently and consumed by a terminal call.
///
/// ```rust,ignore
/// let rows: Vec<Row> = client
///     .table("products")
///     .select("*")
///     .eq("status", "approved")
///     .order("created_at", false)
///     .fetch()
///     .await?;
/// ```
#[must_use]
pub struct QueryBuilder<'a> {
    client: &'a SupabaseClient,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(client: &'a SupabaseClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            select: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(compact_columns(columns));
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, Operator::Eq, value)
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, Operator::Gte, value)
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, Operator::Lte, value)
    }

    pub fn filter(mut self, column: &str, op: Operator, value: impl Display) -> Self {
        self.filters
            .push((column.to_string(), format!("{}.{}", op.as_str(), value)));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    pub fn limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// Query-string pairs in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 3);
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        tracing::debug!(table = %self.table, filters = self.filters.len(), "Fetching rows");
        let req = self
            .client
            .request(Method::GET, &self.client.rest_url(&self.table))
            .query(&self.query_pairs());
        let body = self.client.execute(req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Zero or one row; more than one is an error.
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let table = self.table.clone();
        let mut rows: Vec<T> = self.fetch().await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(SupabaseError::Api {
                status: 406,
                code: None,
                message: format!("Expected at most one row from {}, got {}", table, n),
            }),
        }
    }

    pub async fn single<T: DeserializeOwned>(self) -> Result<T> {
        self.maybe_single().await?.ok_or(SupabaseError::NoRows)
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(self, row: &B) -> Result<T> {
        tracing::debug!(table = %self.table, "Inserting row");
        let req = self
            .client
            .request(Method::POST, &self.client.rest_url(&self.table))
            .query(&self.query_pairs())
            .header("Prefer", RETURN_REPRESENTATION)
            .header("Accept", SINGLE_OBJECT)
            .json(row);
        let body = self.client.execute(req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Patch the single row matched by the filters and return it.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(self, patch: &B) -> Result<T> {
        tracing::debug!(table = %self.table, filters = ?self.filters, "Updating row");
        let req = self
            .client
            .request(Method::PATCH, &self.client.rest_url(&self.table))
            .query(&self.query_pairs())
            .header("Prefer", RETURN_REPRESENTATION)
            .header("Accept", SINGLE_OBJECT)
            .json(patch);
        let body = self.client.execute(req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn delete(self) -> Result<()> {
        tracing::debug!(table = %self.table, filters = ?self.filters, "Deleting rows");
        let req = self
            .client
            .request(Method::DELETE, &self.client.rest_url(&self.table))
            .query(&self.query_pairs());
        self.client.execute(req).await?;
        Ok(())
    }
}

/// Strip whitespace from a multi-line select list (embedded resources included).
fn compact_columns(columns: &str) -> String {
    columns.chars().filter(|c| !c.is_whitespace()).collect()
}
