//! Record and storage abstractions the paginator is generic over.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use super::query::FindQuery;
use super::request::QueryValue;

/// A record that can be paged: an ordered unique id and a creation time.
pub trait PageRecord: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;

    fn created_at(&self) -> DateTime<Utc>;

    /// Value of an API-named field, `None` when unknown or null.
    fn field(&self, name: &str) -> Option<QueryValue>;

    /// Whether `name` is a field this record type exposes for filtering and sorting.
    fn has_field(name: &str) -> bool;
}

/// Storage accessor executing composed queries for one record type.
#[async_trait]
pub trait RecordStore<R: PageRecord>: Send + Sync {
    /// Whether predicates and sort directives may reference `field`.
    fn has_field(&self, field: &str) -> bool;

    async fn find(&self, query: &FindQuery) -> Result<Vec<R>, DbErr>;

    /// Number of rows matching the query's filters, ignoring take/skip.
    async fn count(&self, query: &FindQuery) -> Result<u64, DbErr>;
}
