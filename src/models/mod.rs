pub mod audit;

pub use audit::{
    AuditIssue, AuditRecord, AuditReport, Category, CategoryIssues, CategoryScores, NewAudit,
    PageStats, SecurityGrade, Severity,
};
