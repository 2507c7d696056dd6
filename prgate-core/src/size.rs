//! Pull request size evaluation

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::host::{ChangeRecord, RequestSummary, ReviewHost};
use crate::policy::{PolicyCategory, PolicyTable};
use crate::Result;

/// Outcome of checking a pull request against its category's line limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeReport {
    pub request: RequestSummary,
    pub category: PolicyCategory,
    /// Per-file changes (empty when the category is unlimited)
    pub files: Vec<ChangeRecord>,
    /// Sum of added and removed lines; `None` when not measured
    pub total_lines: Option<u64>,
    pub passed: bool,
}

impl SizeReport {
    /// Compare a set of file changes against a category's limit
    ///
    /// The limit is inclusive: a request exactly at the limit passes.
    pub fn evaluate(
        request: RequestSummary,
        category: PolicyCategory,
        files: Vec<ChangeRecord>,
    ) -> Self {
        let total = total_lines(&files);
        let passed = category.line_limit.map_or(true, |limit| total <= limit);

        Self {
            request,
            category,
            files,
            total_lines: Some(total),
            passed,
        }
    }

    /// Report for an unlimited category, where the diff is never fetched
    pub fn unlimited(request: RequestSummary, category: PolicyCategory) -> Self {
        Self {
            request,
            category,
            files: Vec::new(),
            total_lines: None,
            passed: true,
        }
    }

    /// Lines over the limit, if the check failed
    pub fn excess(&self) -> Option<u64> {
        match (self.total_lines, self.category.line_limit) {
            (Some(total), Some(limit)) if total > limit => Some(total - limit),
            _ => None,
        }
    }
}

/// Sum of added and removed lines across files
pub fn total_lines(files: &[ChangeRecord]) -> u64 {
    files.iter().map(ChangeRecord::lines).sum()
}

/// Fetch a pull request, classify it, and check its size
pub async fn evaluate_size(
    host: &dyn ReviewHost,
    policy: &PolicyTable,
    number: u64,
) -> Result<SizeReport> {
    debug!(number, "Evaluating pull request size");

    let request = host.get_request(number).await?;
    let category = policy.classify(&request.source_branch).clone();

    if category.is_unlimited() {
        info!(number, category = %category, "No line limit for category");
        return Ok(SizeReport::unlimited(request, category));
    }

    let files = host.list_changes(number).await?;
    let report = SizeReport::evaluate(request, category, files);

    info!(
        number,
        category = %report.category,
        total = ?report.total_lines,
        limit = ?report.category.line_limit,
        passed = report.passed,
        "Evaluated pull request size"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{request, FakeHost};
    use crate::host::RequestState;

    fn feature_request() -> RequestSummary {
        request(1, "Login", "feature/login", "main", RequestState::Open)
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let category = PolicyCategory::limited("feature", 300);

        let at = SizeReport::evaluate(
            feature_request(),
            category.clone(),
            vec![ChangeRecord::new("a.rs", 200, 100)],
        );
        assert_eq!(at.total_lines, Some(300));
        assert!(at.passed);
        assert_eq!(at.excess(), None);

        let over = SizeReport::evaluate(
            feature_request(),
            category,
            vec![ChangeRecord::new("a.rs", 200, 101)],
        );
        assert_eq!(over.total_lines, Some(301));
        assert!(!over.passed);
        assert_eq!(over.excess(), Some(1));
    }

    #[test]
    fn test_growing_a_file_never_turns_failure_into_pass() {
        let category = PolicyCategory::limited("bugfix", 150);
        let mut files = vec![ChangeRecord::new("a.rs", 40, 40), ChangeRecord::new("b.rs", 30, 30)];
        let mut previously_passed = true;

        for _ in 0..10 {
            let report = SizeReport::evaluate(feature_request(), category.clone(), files.clone());
            assert!(previously_passed || !report.passed);
            previously_passed = report.passed;
            files[1].added += 7;
        }
        assert!(!previously_passed);
    }

    #[test]
    fn test_unlimited_category_passes_any_size() {
        let report = SizeReport::evaluate(
            feature_request(),
            PolicyCategory::unlimited("epic"),
            vec![ChangeRecord::new("huge.rs", 100_000, 100_000)],
        );
        assert!(report.passed);
    }

    #[test]
    fn test_empty_diff() {
        let report =
            SizeReport::evaluate(feature_request(), PolicyCategory::limited("feature", 0), vec![]);
        assert_eq!(report.total_lines, Some(0));
        assert!(report.passed);
    }

    #[tokio::test]
    async fn test_feature_within_limit() {
        let mut host = FakeHost::with_requests(vec![feature_request()]);
        host.changes.insert(
            1,
            vec![ChangeRecord::new("a.py", 50, 10), ChangeRecord::new("b.py", 20, 5)],
        );

        let report = evaluate_size(&host, &PolicyTable::default(), 1).await.unwrap();
        assert_eq!(report.category.name, "feature");
        assert_eq!(report.category.line_limit, Some(300));
        assert_eq!(report.total_lines, Some(85));
        assert!(report.passed);
    }

    #[tokio::test]
    async fn test_bugfix_over_limit() {
        let mut host = FakeHost::with_requests(vec![request(
            2,
            "Crash",
            "bugfix/crash",
            "main",
            RequestState::Open,
        )]);
        host.changes.insert(2, vec![ChangeRecord::new("x.py", 100, 60)]);

        let report = evaluate_size(&host, &PolicyTable::default(), 2).await.unwrap();
        assert_eq!(report.category.name, "bugfix");
        assert_eq!(report.total_lines, Some(160));
        assert!(!report.passed);
        assert_eq!(report.excess(), Some(10));
    }

    #[tokio::test]
    async fn test_epic_skips_file_fetch() {
        let mut host = FakeHost::with_requests(vec![request(
            3,
            "Q1",
            "epic/q1-launch",
            "main",
            RequestState::Open,
        )]);
        host.changes.insert(3, vec![ChangeRecord::new("big.rs", 5000, 5000)]);

        let report = evaluate_size(&host, &PolicyTable::default(), 3).await.unwrap();
        assert_eq!(report.category.name, "epic");
        assert!(report.passed);
        assert_eq!(report.total_lines, None);
        assert!(host.change_fetches().is_empty());
    }

    #[tokio::test]
    async fn test_missing_request_is_not_found() {
        let host = FakeHost::default();
        let err = evaluate_size(&host, &PolicyTable::default(), 99).await.unwrap_err();
        assert!(matches!(err, crate::Error::NotFound(_)));
    }
}
