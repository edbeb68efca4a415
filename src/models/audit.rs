use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// ============================================
// Issues
// ============================================

/// Severity of a single finding. Declaration order is the ordinal ranking,
/// so `Pass < Warning < Error`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Pass,
    Warning,
    Error,
}

impl Severity {
    /// Points deducted from a category score for one issue of this severity
    pub fn penalty(self) -> i32 {
        match self {
            Severity::Pass => 0,
            Severity::Warning => 10,
            Severity::Error => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Performance,
    Accessibility,
    Seo,
    Technical,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Performance,
        Category::Accessibility,
        Category::Seo,
        Category::Technical,
    ];
}

/// One detected condition on the audited page.
///
/// Built through [`AuditIssue::error`], [`AuditIssue::warning`] or
/// [`AuditIssue::pass`]; a pass never carries a suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditIssue {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl AuditIssue {
    pub fn error(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            severity: Severity::Error,
            description: description.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn warning(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            severity: Severity::Warning,
            description: description.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn pass(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            severity: Severity::Pass,
            description: description.into(),
            suggestion: None,
        }
    }
}

/// Issue lists for all four categories, each in check-definition order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryIssues {
    pub performance_issues: Vec<AuditIssue>,
    pub seo_issues: Vec<AuditIssue>,
    pub accessibility_issues: Vec<AuditIssue>,
    pub technical_issues: Vec<AuditIssue>,
}

impl CategoryIssues {
    pub fn get(&self, category: Category) -> &[AuditIssue] {
        match category {
            Category::Performance => &self.performance_issues,
            Category::Accessibility => &self.accessibility_issues,
            Category::Seo => &self.seo_issues,
            Category::Technical => &self.technical_issues,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        Category::ALL
            .iter()
            .flat_map(|c| self.get(*c))
            .filter(|i| i.severity == severity)
            .count()
    }
}

// ============================================
// Scores & Stats
// ============================================

/// Category scores plus the overall mean. Built through `new`, which
/// derives `overall_score` from the four category scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryScores {
    pub overall_score: i32,
    pub performance_score: i32,
    pub accessibility_score: i32,
    pub seo_score: i32,
    pub technical_score: i32,
}

impl CategoryScores {
    pub(crate) fn new(performance: i32, accessibility: i32, seo: i32, technical: i32) -> Self {
        // Round-half-up mean of four non-negative integers
        let overall = (performance + accessibility + seo + technical + 2) / 4;
        Self {
            overall_score: overall,
            performance_score: performance,
            accessibility_score: accessibility,
            seo_score: seo,
            technical_score: technical,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SecurityGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "F")]
    F,
}

impl SecurityGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityGrade::APlus => "A+",
            SecurityGrade::F => "F",
        }
    }
}

impl FromStr for SecurityGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(SecurityGrade::APlus),
            "F" => Ok(SecurityGrade::F),
            other => Err(format!("Unknown security grade '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageStats {
    pub internal_links_count: i32,
    pub images_count: i32,
    pub word_count: i32,
    pub security_grade: SecurityGrade,
    pub scan_duration_ms: i32,
}

// ============================================
// Report & Record
// ============================================

/// Scored payload produced by one analysis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditReport {
    #[serde(flatten)]
    pub scores: CategoryScores,
    #[serde(flatten)]
    pub issues: CategoryIssues,
    #[serde(flatten)]
    pub stats: PageStats,
}

/// Audit as persisted: identity, owner, target and timestamp wrapped
/// around the report fields, all flattened into one JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRecord {
    pub id: Uuid,
    pub user_id: String,
    pub url: String,
    pub scanned_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: AuditReport,
}

/// Insert payload; id and timestamp are assigned by storage
#[derive(Debug, Clone)]
pub struct NewAudit {
    pub user_id: String,
    pub url: String,
    pub report: AuditReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_error_worst() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Pass);
        assert_eq!(Severity::Error.penalty(), 20);
        assert_eq!(Severity::Warning.penalty(), 10);
        assert_eq!(Severity::Pass.penalty(), 0);
    }

    #[test]
    fn pass_issue_serializes_without_suggestion() {
        let issue = AuditIssue::pass("seo-pass-3", "H1 tag present", "One H1 tag found on the page.");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["severity"], "pass");
        assert!(json.get("suggestion").is_none());
    }

    #[test]
    fn overall_score_rounds_half_up() {
        // 250 / 4 = 62.5
        assert_eq!(CategoryScores::new(100, 70, 60, 20).overall_score, 63);
        // 270 / 4 = 67.5
        assert_eq!(CategoryScores::new(100, 90, 40, 40).overall_score, 68);
        assert_eq!(CategoryScores::new(100, 80, 40, 40).overall_score, 65);
        assert_eq!(CategoryScores::new(0, 0, 0, 0).overall_score, 0);
        assert_eq!(CategoryScores::new(100, 100, 100, 100).overall_score, 100);
    }

    #[test]
    fn security_grade_round_trips_through_text() {
        assert_eq!("A+".parse::<SecurityGrade>(), Ok(SecurityGrade::APlus));
        assert_eq!("F".parse::<SecurityGrade>(), Ok(SecurityGrade::F));
        assert!("B".parse::<SecurityGrade>().is_err());
        assert_eq!(
            serde_json::to_value(SecurityGrade::APlus).unwrap(),
            serde_json::json!("A+")
        );
    }

    #[test]
    fn report_flattens_to_top_level_fields() {
        let report = AuditReport {
            scores: CategoryScores::new(100, 100, 80, 100),
            issues: CategoryIssues::default(),
            stats: PageStats {
                internal_links_count: 3,
                images_count: 1,
                word_count: 42,
                security_grade: SecurityGrade::APlus,
                scan_duration_ms: 12,
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overall_score"], 95);
        assert_eq!(json["seo_score"], 80);
        assert_eq!(json["security_grade"], "A+");
        assert!(json["seo_issues"].as_array().unwrap().is_empty());
        assert!(json.get("scores").is_none());
    }
}
