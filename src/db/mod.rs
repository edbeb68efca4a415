use futures::future::BoxFuture;
use uuid::Uuid;

use crate::models::{AuditRecord, NewAudit};

#[cfg(test)]
pub mod memory;
pub mod queries;

pub use queries::PgAuditStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt audit row: {0}")]
    Corrupt(String),
}

/// Audit persistence. Every read, list and delete is scoped to `user_id`;
/// a record owned by someone else behaves exactly like a missing one.
pub trait AuditStore: Send + Sync {
    /// Insert and return the stored row with its generated id and timestamp
    fn insert(&self, audit: NewAudit) -> BoxFuture<'_, Result<AuditRecord, StoreError>>;

    fn get<'a>(
        &'a self,
        user_id: &'a str,
        id: Uuid,
    ) -> BoxFuture<'a, Result<Option<AuditRecord>, StoreError>>;

    /// Newest first, at most `limit` rows
    fn list_recent<'a>(
        &'a self,
        user_id: &'a str,
        limit: i64,
    ) -> BoxFuture<'a, Result<Vec<AuditRecord>, StoreError>>;

    /// Returns whether a row was removed
    fn delete<'a>(&'a self, user_id: &'a str, id: Uuid) -> BoxFuture<'a, Result<bool, StoreError>>;

    fn ping(&self) -> BoxFuture<'_, bool>;
}
