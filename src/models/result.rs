use serde::{Deserialize, Serialize};

use super::status::TestStatus;

/// One executed test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub classname: String,
    /// Duration in seconds.
    pub time: f64,
    pub status: TestStatus,
    pub message: Option<String>,
    pub output: Option<String>,
}

/// How a case ended, with the detail each status is allowed to carry.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    #[default]
    Passed,
    Failed {
        message: Option<String>,
        output: Option<String>,
    },
    Error {
        message: Option<String>,
        output: Option<String>,
    },
    Skipped {
        message: Option<String>,
    },
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        classname: impl Into<String>,
        time: f64,
        outcome: Outcome,
    ) -> Self {
        let (status, message, output) = match outcome {
            Outcome::Passed => (TestStatus::Passed, None, None),
            Outcome::Failed { message, output } => (TestStatus::Failed, message, output),
            Outcome::Error { message, output } => (TestStatus::Error, message, output),
            Outcome::Skipped { message } => (TestStatus::Skipped, message, None),
        };
        Self {
            name: name.into(),
            classname: classname.into(),
            time: sanitize_time(time),
            status,
            message,
            output,
        }
    }

    /// `classname::name`, the form used when listing failures.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.classname, self.name)
    }
}

/// Add up durations, capping at `f64::MAX` so a total always stays finite.
pub fn sum_seconds(times: impl IntoIterator<Item = f64>) -> f64 {
    times.into_iter().sum::<f64>().min(f64::MAX)
}

/// Durations are non-negative and finite; anything else collapses to zero.
pub fn sanitize_time(time: f64) -> f64 {
    if time.is_finite() && time > 0.0 {
        time
    } else {
        0.0
    }
}

/// The contents of one report file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    pub tests: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
    pub time: f64,
    pub testcases: Vec<TestCase>,
}

impl TestSuite {
    /// The suite's four counts, as stored.
    pub fn counts(&self) -> CaseCounts {
        CaseCounts {
            tests: self.tests,
            failures: self.failures,
            errors: self.errors,
            skipped: self.skipped,
        }
    }
}

/// Counts derived from a case list, used when a report omits its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaseCounts {
    pub tests: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl CaseCounts {
    pub fn of(cases: &[TestCase]) -> Self {
        let mut counts = Self {
            tests: cases.len(),
            ..Self::default()
        };
        for case in cases {
            match case.status {
                TestStatus::Failed => counts.failures += 1,
                TestStatus::Error => counts.errors += 1,
                TestStatus::Skipped => counts.skipped += 1,
                TestStatus::Passed => {}
            }
        }
        counts
    }

    /// Field-wise sum that saturates instead of overflowing on absurd
    /// declared counts.
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            tests: self.tests.saturating_add(other.tests),
            failures: self.failures.saturating_add(other.failures),
            errors: self.errors.saturating_add(other.errors),
            skipped: self.skipped.saturating_add(other.skipped),
        }
    }
}

/// Aggregate over every suite found in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResults {
    pub suites: Vec<TestSuite>,
    pub total_tests: usize,
    pub total_failures: usize,
    pub total_errors: usize,
    pub total_skipped: usize,
    pub total_time: f64,
    pub success: bool,
}

impl Default for TestResults {
    fn default() -> Self {
        Self::from_suites(Vec::new())
    }
}

impl TestResults {
    /// Fold suites into totals. An empty input is a vacuous success.
    pub fn from_suites(suites: Vec<TestSuite>) -> Self {
        let totals = suites
            .iter()
            .map(TestSuite::counts)
            .fold(CaseCounts::default(), CaseCounts::saturating_add);
        let total_time = sum_seconds(suites.iter().map(|s| s.time));

        Self {
            suites,
            total_tests: totals.tests,
            total_failures: totals.failures,
            total_errors: totals.errors,
            total_skipped: totals.skipped,
            total_time,
            success: totals.failures == 0 && totals.errors == 0,
        }
    }

    /// Tests that neither failed, errored, nor were skipped. Declared counts
    /// can disagree with each other, so this saturates at zero.
    pub fn passed(&self) -> usize {
        self.total_tests
            .saturating_sub(self.total_failures)
            .saturating_sub(self.total_errors)
            .saturating_sub(self.total_skipped)
    }

    /// Failed and errored cases in suite order.
    pub fn failing_cases(&self) -> impl Iterator<Item = &TestCase> {
        self.suites
            .iter()
            .flat_map(|s| s.testcases.iter())
            .filter(|c| c.status.is_failure())
    }
}
