use futures::future::BoxFuture;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{AuditStore, StoreError};
use crate::models::{
    AuditIssue, AuditRecord, AuditReport, CategoryIssues, CategoryScores, NewAudit, PageStats,
};

const AUDIT_COLUMNS: &str = r#"
    id, user_id, url, scanned_at,
    overall_score, performance_score, accessibility_score, seo_score, technical_score,
    performance_issues, seo_issues, accessibility_issues, technical_issues,
    scan_duration_ms, internal_links_count, images_count, word_count, security_grade
"#;

#[derive(Clone)]
pub struct PgAuditStore {
    pool: PgPool,
}

impl PgAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AuditStore for PgAuditStore {
    fn insert(&self, audit: NewAudit) -> BoxFuture<'_, Result<AuditRecord, StoreError>> {
        Box::pin(async move {
            let sql = format!(
                r#"
                INSERT INTO audits (
                    user_id, url,
                    overall_score, performance_score, accessibility_score, seo_score, technical_score,
                    performance_issues, seo_issues, accessibility_issues, technical_issues,
                    scan_duration_ms, internal_links_count, images_count, word_count, security_grade
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
                RETURNING {}
                "#,
                AUDIT_COLUMNS
            );

            let NewAudit {
                user_id,
                url,
                report,
            } = audit;
            let AuditReport {
                scores,
                issues,
                stats,
            } = report;

            let row = sqlx::query(&sql)
                .bind(&user_id)
                .bind(&url)
                .bind(scores.overall_score)
                .bind(scores.performance_score)
                .bind(scores.accessibility_score)
                .bind(scores.seo_score)
                .bind(scores.technical_score)
                .bind(Json(&issues.performance_issues))
                .bind(Json(&issues.seo_issues))
                .bind(Json(&issues.accessibility_issues))
                .bind(Json(&issues.technical_issues))
                .bind(stats.scan_duration_ms)
                .bind(stats.internal_links_count)
                .bind(stats.images_count)
                .bind(stats.word_count)
                .bind(stats.security_grade.as_str())
                .fetch_one(&self.pool)
                .await?;

            audit_from_row(&row)
        })
    }

    fn get<'a>(
        &'a self,
        user_id: &'a str,
        id: Uuid,
    ) -> BoxFuture<'a, Result<Option<AuditRecord>, StoreError>> {
        Box::pin(async move {
            let sql = format!(
                "SELECT {} FROM audits WHERE id = $1 AND user_id = $2",
                AUDIT_COLUMNS
            );

            let row = sqlx::query(&sql)
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

            row.as_ref().map(audit_from_row).transpose()
        })
    }

    fn list_recent<'a>(
        &'a self,
        user_id: &'a str,
        limit: i64,
    ) -> BoxFuture<'a, Result<Vec<AuditRecord>, StoreError>> {
        Box::pin(async move {
            let sql = format!(
                r#"
                SELECT {}
                FROM audits
                WHERE user_id = $1
                ORDER BY scanned_at DESC
                LIMIT $2
                "#,
                AUDIT_COLUMNS
            );

            let rows = sqlx::query(&sql)
                .bind(user_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

            rows.iter().map(audit_from_row).collect()
        })
    }

    fn delete<'a>(&'a self, user_id: &'a str, id: Uuid) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM audits WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

            Ok(result.rows_affected() > 0)
        })
    }

    fn ping(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move { sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok() })
    }
}

fn audit_from_row(row: &PgRow) -> Result<AuditRecord, StoreError> {
    let issues = |column: &str| -> Result<Vec<AuditIssue>, sqlx::Error> {
        Ok(row.try_get::<Json<Vec<AuditIssue>>, _>(column)?.0)
    };

    // overall_score is stored for sorting and reporting, but recomputed here
    // so it can never drift from the category scores it derives from.
    let scores = CategoryScores::new(
        row.try_get("performance_score")?,
        row.try_get("accessibility_score")?,
        row.try_get("seo_score")?,
        row.try_get("technical_score")?,
    );

    let grade: String = row.try_get("security_grade")?;

    Ok(AuditRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        url: row.try_get("url")?,
        scanned_at: row.try_get::<chrono::NaiveDateTime, _>("scanned_at")?.and_utc(),
        report: AuditReport {
            scores,
            issues: CategoryIssues {
                performance_issues: issues("performance_issues")?,
                seo_issues: issues("seo_issues")?,
                accessibility_issues: issues("accessibility_issues")?,
                technical_issues: issues("technical_issues")?,
            },
            stats: PageStats {
                internal_links_count: row.try_get("internal_links_count")?,
                images_count: row.try_get("images_count")?,
                word_count: row.try_get("word_count")?,
                security_grade: grade.parse().map_err(StoreError::Corrupt)?,
                scan_duration_ms: row.try_get("scan_duration_ms")?,
            },
        },
    })
}
