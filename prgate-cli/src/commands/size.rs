//! Size check action

use prgate_core::{evaluate_size, PolicyTable, ReviewHost, SizeReport};

use super::{banner, rule, Outcome};

/// Check a pull request's size and print the report
pub async fn execute(host: &dyn ReviewHost, policy: &PolicyTable, number: u64) -> Outcome {
    banner("PULL REQUEST SIZE CHECK");

    let report = match evaluate_size(host, policy, number).await {
        Ok(report) => report,
        Err(e) => {
            println!("Failed to check pull request #{}: {}", number, e);
            rule();
            return Outcome::Failed;
        }
    };

    for line in report_lines(&report) {
        println!("{}", line);
    }
    rule();

    if report.passed {
        Outcome::Success
    } else {
        Outcome::PolicyViolation
    }
}

/// Human-readable report for a size check
pub fn report_lines(report: &SizeReport) -> Vec<String> {
    let pr = &report.request;
    let mut lines = vec![
        String::new(),
        "PR Info:".to_string(),
        format!("   Number: #{}", pr.number),
        format!("   Title: {}", pr.title),
        format!("   Source: {}", pr.source_branch),
        format!("   Target: {}", pr.target_branch),
        format!("   Type: {}", report.category),
    ];

    let (Some(limit), Some(total)) = (report.category.line_limit, report.total_lines) else {
        lines.push(String::new());
        lines.push(format!(
            "No line limit applies to '{}' pull requests",
            report.category
        ));
        return lines;
    };

    lines.push(format!("   Limit: {} lines", limit));
    lines.push(String::new());
    lines.push("Changed files:".to_string());
    for file in &report.files {
        lines.push(format!(
            "   {}: +{} -{} (total: {})",
            file.path,
            file.added,
            file.removed,
            file.lines()
        ));
    }

    lines.push(String::new());
    lines.push(format!("Total changes: {} lines", total));
    lines.push(format!("   Limit: {} lines", limit));
    lines.push(String::new());

    if report.passed {
        lines.push("PASSED: pull request size is within the limit".to_string());
    } else {
        lines.push(format!(
            "FAILED: pull request size {} lines exceeds the limit of {} for type '{}'",
            total, limit, report.category
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{self, StubHost};
    use prgate_core::{ChangeRecord, PolicyCategory, RequestState, RequestSummary};

    fn request(branch: &str) -> RequestSummary {
        RequestSummary {
            number: 7,
            title: "Crash fix".to_string(),
            body: String::new(),
            url: "https://github.com/acme/app/pull/7".to_string(),
            source_branch: branch.to_string(),
            target_branch: "main".to_string(),
            state: RequestState::Open,
        }
    }

    #[test]
    fn test_failed_report() {
        let report = SizeReport::evaluate(
            request("bugfix/crash"),
            PolicyCategory::limited("bugfix", 150),
            vec![ChangeRecord::new("x.py", 100, 60)],
        );
        let lines = report_lines(&report);

        assert!(lines.contains(&"   x.py: +100 -60 (total: 160)".to_string()));
        assert!(lines.contains(&"Total changes: 160 lines".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "FAILED: pull request size 160 lines exceeds the limit of 150 for type 'bugfix'"
        );
    }

    #[test]
    fn test_passed_report() {
        let report = SizeReport::evaluate(
            request("feature/login"),
            PolicyCategory::limited("feature", 300),
            vec![ChangeRecord::new("a.py", 50, 10), ChangeRecord::new("b.py", 20, 5)],
        );
        let lines = report_lines(&report);

        assert!(lines.contains(&"Total changes: 85 lines".to_string()));
        assert!(lines.last().unwrap().starts_with("PASSED"));
    }

    #[test]
    fn test_unlimited_report() {
        let report = SizeReport::unlimited(request("epic/q1"), PolicyCategory::unlimited("epic"));
        let lines = report_lines(&report);

        assert!(lines.contains(&"   Type: epic".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "No line limit applies to 'epic' pull requests"
        );
    }

    fn host() -> StubHost {
        let mut host = StubHost::with_requests(vec![
            test_support::request(1, "Login", "feature/login", "main", RequestState::Open),
            test_support::request(2, "Crash", "bugfix/crash", "main", RequestState::Open),
        ]);
        host.changes.insert(
            1,
            vec![ChangeRecord::new("a.py", 50, 10), ChangeRecord::new("b.py", 20, 5)],
        );
        host.changes.insert(2, vec![ChangeRecord::new("x.py", 100, 60)]);
        host
    }

    #[tokio::test]
    async fn test_execute_within_limit() {
        let outcome = execute(&host(), &PolicyTable::default(), 1).await;
        assert_eq!(outcome, Outcome::Success);
    }

    #[tokio::test]
    async fn test_execute_over_limit() {
        let outcome = execute(&host(), &PolicyTable::default(), 2).await;
        assert_eq!(outcome, Outcome::PolicyViolation);
    }

    #[tokio::test]
    async fn test_execute_missing_request() {
        let outcome = execute(&host(), &PolicyTable::default(), 99).await;
        assert_eq!(outcome, Outcome::Failed);
    }
}
