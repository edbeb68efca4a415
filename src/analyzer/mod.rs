use std::time::{Duration, Instant};

use crate::models::{AuditReport, CategoryIssues, Severity};

pub mod checks;
mod patterns;
pub mod scoring;
pub mod stats;

// ============================================
// Errors
// ============================================

/// Any failure of a single analysis run. No partial report is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Failed to analyze URL: request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("Failed to analyze URL: {0}")]
    Network(String),
    #[error("Failed to analyze URL: HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("Failed to analyze URL: could not read response body: {0}")]
    Body(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

// ============================================
// Fetch Settings
// ============================================

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: "KORAT-SEO-Audit-Bot/1.0".to_string(),
        }
    }
}

// ============================================
// Analyzer
// ============================================

/// Fetches a page once and runs the check battery over its body.
///
/// Holds a pooled `reqwest::Client`; cheap to clone and share across
/// requests since there is no other state.
#[derive(Clone)]
pub struct Analyzer {
    client: reqwest::Client,
    timeout: Duration,
}

impl Analyzer {
    pub fn new(settings: &FetchSettings) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| AnalysisError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout: settings.timeout,
        })
    }

    /// Analyze a URL: normalize, fetch (bounded by the timeout), check, score.
    pub async fn analyze(&self, url: &str) -> Result<AuditReport, AnalysisError> {
        let url = normalize_url(url);
        let started = Instant::now();

        let html = self.fetch(&url).await?;
        let report = audit_html(&url, &html, started);

        tracing::debug!(
            url = %url,
            bytes = html.len(),
            overall_score = report.scores.overall_score,
            errors = report.issues.count(Severity::Error),
            warnings = report.issues.count(Severity::Warning),
            duration_ms = report.stats.scan_duration_ms,
            "Page analyzed"
        );

        Ok(report)
    }

    async fn fetch(&self, url: &str) -> Result<String, AnalysisError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                AnalysisError::Timeout(self.timeout)
            } else {
                AnalysisError::Body(e.to_string())
            }
        })
    }

    fn request_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_timeout() {
            AnalysisError::Timeout(self.timeout)
        } else {
            AnalysisError::Network(e.to_string())
        }
    }
}

/// Prepend `https://` when the URL carries no http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Run every check over already-captured HTML and score the result.
///
/// Pure apart from `scan_duration_ms`, which measures from `started`.
pub fn audit_html(url: &str, html: &str, started: Instant) -> AuditReport {
    let issues = CategoryIssues {
        performance_issues: checks::performance_issues(html),
        seo_issues: checks::seo_issues(html),
        accessibility_issues: checks::accessibility_issues(html),
        technical_issues: checks::technical_issues(url, html),
    };
    let scores = scoring::score(&issues);
    let stats = stats::page_stats(url, html, started);

    AuditReport {
        scores,
        issues,
        stats,
    }
}
