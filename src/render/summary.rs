use crossterm::style::{Color, Stylize, style};

use super::theme;
use crate::models::{TestResults, TestStatus};

const BANNER_WIDTH: usize = 60;

/// Plain-text report: counts, one line per failed or errored case, and a
/// closing verdict. With `color` the status words carry ANSI styling.
pub fn render(results: &TestResults, color: bool) -> String {
    let paint = |text: &str, fg: Color| {
        if color {
            style(text).with(fg).bold().to_string()
        } else {
            text.to_string()
        }
    };
    let banner = "=".repeat(BANNER_WIDTH);

    let mut lines = vec![
        banner.clone(),
        "TEST RESULTS SUMMARY".to_string(),
        banner.clone(),
        String::new(),
        format!("Total:    {} tests", results.total_tests),
        format!("Passed:   {}", results.passed()),
        format!("Failed:   {}", results.total_failures),
        format!("Errors:   {}", results.total_errors),
        format!("Skipped:  {}", results.total_skipped),
        format!("Time:     {:.2}s", results.total_time),
        String::new(),
    ];

    for case in results.failing_cases() {
        let label = format!("{}:", case.status.label());
        lines.push(format!(
            "{} {}",
            paint(&label, case.status.color()),
            case.qualified_name()
        ));
        if let Some(message) = &case.message {
            lines.push(format!("  {}", message));
        }
    }

    lines.push(String::new());
    lines.push(banner.clone());
    if results.success {
        lines.push(paint("ALL TESTS PASSED", TestStatus::Passed.color()));
    } else {
        lines.push(paint("TESTS FAILED", TestStatus::Failed.color()));
    }
    if results.total_tests == 0 {
        lines.push(paint("(no tests were found)", theme::YELLOW));
    }
    lines.push(banner);

    lines.join("\n")
}
