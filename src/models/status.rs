use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::render::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Passed,
    Failed,
    Error,
    Skipped,
}

impl TestStatus {
    pub fn color(&self) -> Color {
        match self {
            TestStatus::Passed => theme::GREEN,
            TestStatus::Failed => theme::RED,
            TestStatus::Error => theme::PEACH,
            TestStatus::Skipped => theme::OVERLAY0,
        }
    }

    /// Label used in front of a failing case in the plain-text summary.
    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Passed => "PASSED",
            TestStatus::Failed => "FAILED",
            TestStatus::Error => "ERROR",
            TestStatus::Skipped => "SKIPPED",
        }
    }

    /// Failed and errored cases break a run; skipped ones never do.
    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Failed | TestStatus::Error)
    }
}
