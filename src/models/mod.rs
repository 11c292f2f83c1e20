pub mod result;
pub mod status;

pub use result::{CaseCounts, Outcome, TestCase, TestResults, TestSuite, sum_seconds};
pub use status::TestStatus;
