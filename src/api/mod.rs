use std::sync::Arc;

use crate::analyzer::Analyzer;
use crate::db::AuditStore;
use crate::middleware::IdentityResolver;

pub mod audits;
pub mod error;
pub mod health;
pub mod routes;

pub use error::{ApiError, ErrorResponse};

// ============================================
// Application State
// ============================================

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AuditStore>,
    pub identity: Arc<dyn IdentityResolver>,
    pub analyzer: Analyzer,
    /// Page size for the history listing when the caller gives none
    pub history_limit: i64,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AuditStore>,
        identity: Arc<dyn IdentityResolver>,
        analyzer: Analyzer,
        history_limit: i64,
    ) -> Self {
        Self {
            store,
            identity,
            analyzer,
            history_limit,
        }
    }
}
