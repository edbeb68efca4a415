// In-memory audit store for handler tests

use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AuditStore, StoreError};
use crate::models::{AuditRecord, NewAudit};

#[derive(Default)]
pub struct MemoryAuditStore {
    rows: RwLock<Vec<AuditRecord>>,
    fail_writes: bool,
}

impl MemoryAuditStore {
    /// A store whose inserts always fail
    pub fn failing() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            fail_writes: true,
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

impl AuditStore for MemoryAuditStore {
    fn insert(&self, audit: NewAudit) -> BoxFuture<'_, Result<AuditRecord, StoreError>> {
        Box::pin(async move {
            if self.fail_writes {
                return Err(StoreError::Database(sqlx::Error::Protocol(
                    "disk full".to_string(),
                )));
            }

            let record = AuditRecord {
                id: Uuid::new_v4(),
                user_id: audit.user_id,
                url: audit.url,
                scanned_at: Utc::now(),
                report: audit.report,
            };
            self.rows.write().await.push(record.clone());
            Ok(record)
        })
    }

    fn get<'a>(
        &'a self,
        user_id: &'a str,
        id: Uuid,
    ) -> BoxFuture<'a, Result<Option<AuditRecord>, StoreError>> {
        Box::pin(async move {
            let rows = self.rows.read().await;
            Ok(rows
                .iter()
                .find(|r| r.id == id && r.user_id == user_id)
                .cloned())
        })
    }

    fn list_recent<'a>(
        &'a self,
        user_id: &'a str,
        limit: i64,
    ) -> BoxFuture<'a, Result<Vec<AuditRecord>, StoreError>> {
        Box::pin(async move {
            let rows = self.rows.read().await;
            Ok(rows
                .iter()
                .rev()
                .filter(|r| r.user_id == user_id)
                .take(usize::try_from(limit).unwrap_or(0))
                .cloned()
                .collect())
        })
    }

    fn delete<'a>(&'a self, user_id: &'a str, id: Uuid) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(async move {
            let mut rows = self.rows.write().await;
            let before = rows.len();
            rows.retain(|r| !(r.id == id && r.user_id == user_id));
            Ok(rows.len() < before)
        })
    }

    fn ping(&self) -> BoxFuture<'_, bool> {
        Box::pin(async { true })
    }
}
