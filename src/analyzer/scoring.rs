use crate::models::{AuditIssue, CategoryIssues, CategoryScores};

/// Linear penalty score for one category: 20 per error, 10 per warning,
/// clamped to `[0, 100]`.
pub fn category_score(issues: &[AuditIssue]) -> i32 {
    let penalty: i32 = issues.iter().map(|i| i.severity.penalty()).sum();
    (100 - penalty).clamp(0, 100)
}

pub fn score(issues: &CategoryIssues) -> CategoryScores {
    CategoryScores::new(
        category_score(&issues.performance_issues),
        category_score(&issues.accessibility_issues),
        category_score(&issues.seo_issues),
        category_score(&issues.technical_issues),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn issue(severity: Severity) -> AuditIssue {
        match severity {
            Severity::Error => AuditIssue::error("e", "e", "e", "fix"),
            Severity::Warning => AuditIssue::warning("w", "w", "w", "fix"),
            Severity::Pass => AuditIssue::pass("p", "p", "p"),
        }
    }

    #[test]
    fn penalties_are_linear() {
        assert_eq!(category_score(&[]), 100);
        assert_eq!(category_score(&[issue(Severity::Pass), issue(Severity::Pass)]), 100);
        assert_eq!(category_score(&[issue(Severity::Error)]), 80);
        assert_eq!(category_score(&[issue(Severity::Warning)]), 90);
        assert_eq!(
            category_score(&[issue(Severity::Error), issue(Severity::Warning)]),
            70
        );
    }

    #[test]
    fn score_floors_at_zero() {
        let issues: Vec<_> = (0..6).map(|_| issue(Severity::Error)).collect();
        assert_eq!(category_score(&issues), 0);
    }

    #[test]
    fn full_score_iff_no_errors_or_warnings() {
        let cases = [
            vec![issue(Severity::Pass)],
            vec![issue(Severity::Pass), issue(Severity::Warning)],
            vec![issue(Severity::Error), issue(Severity::Pass)],
            vec![],
        ];
        for case in cases {
            let clean = case.iter().all(|i| i.severity == Severity::Pass);
            assert_eq!(category_score(&case) == 100, clean);
        }
    }

    #[test]
    fn overall_lies_between_category_min_and_max() {
        let issues = CategoryIssues {
            performance_issues: vec![issue(Severity::Pass)],
            seo_issues: vec![issue(Severity::Error), issue(Severity::Error), issue(Severity::Warning)],
            accessibility_issues: vec![issue(Severity::Warning)],
            technical_issues: vec![issue(Severity::Error)],
        };
        let scores = score(&issues);
        let values = vec![
            scores.performance_score,
            scores.accessibility_score,
            scores.seo_score,
            scores.technical_score,
        ];
        assert_eq!(values, vec![100, 90, 50, 80]);
        // (100 + 90 + 50 + 80) / 4 = 80
        assert_eq!(scores.overall_score, 80);
        assert!(scores.overall_score >= *values.iter().min().unwrap());
        assert!(scores.overall_score <= *values.iter().max().unwrap());
    }
}
