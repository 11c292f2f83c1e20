use crate::models::TestResults;

/// Markdown suited for a pull-request comment or a CI job summary. The
/// failures section appears only when the run failed.
pub fn render(results: &TestResults) -> String {
    let (icon, verdict) = if results.success {
        ("✅", "Passed")
    } else {
        ("❌", "Failed")
    };

    let mut lines = vec![
        "## Test Results".to_string(),
        String::new(),
        format!("**Status**: {} {}", icon, verdict),
        String::new(),
        "| Metric | Count |".to_string(),
        "|--------|-------|".to_string(),
        format!("| Total | {} |", results.total_tests),
        format!("| Passed | {} |", results.passed()),
        format!("| Failed | {} |", results.total_failures),
        format!("| Errors | {} |", results.total_errors),
        format!("| Skipped | {} |", results.total_skipped),
        format!("| Time | {:.2}s |", results.total_time),
    ];

    if !results.success {
        lines.push(String::new());
        lines.push("### Failures".to_string());
        lines.push(String::new());
        for case in results.failing_cases() {
            lines.push(format!(
                "- **{}**: {}",
                case.qualified_name(),
                case.message.as_deref().unwrap_or("No message")
            ));
        }
    }

    lines.join("\n")
}
