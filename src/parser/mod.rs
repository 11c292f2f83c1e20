//! JUnit-style XML report parsing.
//!
//! A report is either a single `<testsuite>` or a `<testsuites>` collection
//! wrapping any number of them. Either way one file becomes one [`TestSuite`].

pub mod xml;

use std::path::Path;

use crate::error::ParseError;
use crate::models::{CaseCounts, Outcome, TestCase, TestSuite, sum_seconds};

use xml::Element;

/// Placeholder for case names and classnames a producer left out.
pub const UNKNOWN: &str = "unknown";

/// The accepted document shapes, decided once from the root element.
#[derive(Debug)]
enum ReportShape<'a> {
    Suite(&'a Element),
    Collection(&'a Element),
    Unrecognized(&'a str),
}

impl<'a> ReportShape<'a> {
    fn of(root: &'a Element) -> Self {
        match root.name.as_str() {
            "testsuite" => ReportShape::Suite(root),
            "testsuites" => ReportShape::Collection(root),
            other => ReportShape::Unrecognized(other),
        }
    }
}

/// Read and parse one report file. The file stem names the suite when the
/// report doesn't.
pub fn parse_report(path: &Path) -> Result<TestSuite, ParseError> {
    let content = std::fs::read_to_string(path)?;
    let fallback_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNKNOWN.to_string());
    parse_str(&content, &fallback_name)
}

/// Parse report text already in memory.
pub fn parse_str(content: &str, fallback_name: &str) -> Result<TestSuite, ParseError> {
    let root = xml::parse_document(content)?;

    match ReportShape::of(&root) {
        ReportShape::Suite(suite) => Ok(build_suite(suite, fallback_name)),
        ReportShape::Collection(collection) => Ok(build_collection(collection, fallback_name)),
        ReportShape::Unrecognized(tag) => Err(ParseError::UnrecognizedRoot(tag.to_string())),
    }
}

/// Summary attributes as the report declares them. Missing or unparsable
/// values stay `None` and are filled in from the cases.
#[derive(Debug, Default)]
struct Declared {
    tests: Option<usize>,
    failures: Option<usize>,
    errors: Option<usize>,
    skipped: Option<usize>,
    time: Option<f64>,
}

impl Declared {
    fn from_attrs(element: &Element) -> Self {
        Self {
            tests: parse_count(element.attr("tests")),
            failures: parse_count(element.attr("failures")),
            errors: parse_count(element.attr("errors")),
            skipped: parse_count(element.attr("skipped")),
            time: element.attr("time").and_then(parse_seconds),
        }
    }

    /// Each count falls back on its own; a declared value always wins, even
    /// when it disagrees with the case list.
    fn or(&self, derived: CaseCounts) -> CaseCounts {
        CaseCounts {
            tests: self.tests.unwrap_or(derived.tests),
            failures: self.failures.unwrap_or(derived.failures),
            errors: self.errors.unwrap_or(derived.errors),
            skipped: self.skipped.unwrap_or(derived.skipped),
        }
    }
}

fn build_suite(element: &Element, fallback_name: &str) -> TestSuite {
    let mut cases = Vec::new();
    collect_cases(element, &mut cases);

    let declared = Declared::from_attrs(element);
    let counts = declared.or(CaseCounts::of(&cases));
    let time = declared
        .time
        .unwrap_or_else(|| sum_seconds(cases.iter().map(|c| c.time)));

    assemble(suite_name(element).unwrap_or(fallback_name), counts, time, cases)
}

fn build_collection(element: &Element, fallback_name: &str) -> TestSuite {
    let members: Vec<TestSuite> = element
        .children_named("testsuite")
        .map(|suite| build_suite(suite, fallback_name))
        .collect();

    let summed = members
        .iter()
        .map(TestSuite::counts)
        .fold(CaseCounts::default(), CaseCounts::saturating_add);

    let declared = Declared::from_attrs(element);
    let counts = declared.or(summed);
    let time = declared
        .time
        .unwrap_or_else(|| sum_seconds(members.iter().map(|s| s.time)));

    let name = suite_name(element)
        .or_else(|| element.children_named("testsuite").find_map(suite_name))
        .unwrap_or(fallback_name)
        .to_string();
    let cases = members.into_iter().flat_map(|s| s.testcases).collect();

    assemble(&name, counts, time, cases)
}

fn assemble(name: &str, counts: CaseCounts, time: f64, testcases: Vec<TestCase>) -> TestSuite {
    TestSuite {
        name: name.to_string(),
        tests: counts.tests,
        failures: counts.failures,
        errors: counts.errors,
        skipped: counts.skipped,
        time,
        testcases,
    }
}

fn suite_name(element: &Element) -> Option<&str> {
    element.attr("name").filter(|n| !n.trim().is_empty())
}

/// Walk a suite in document order. Cases inside nested suites belong to the
/// outermost suite, so each case is collected exactly once.
fn collect_cases(element: &Element, out: &mut Vec<TestCase>) {
    for child in &element.children {
        match child.name.as_str() {
            "testcase" => out.push(build_case(child)),
            "testsuite" => collect_cases(child, out),
            _ => {}
        }
    }
}

fn build_case(element: &Element) -> TestCase {
    let name = element.attr("name").unwrap_or(UNKNOWN);
    let classname = element.attr("classname").unwrap_or(UNKNOWN);
    let time = element.attr("time").and_then(parse_seconds).unwrap_or(0.0);
    TestCase::new(name, classname, time, outcome(element))
}

fn outcome(case: &Element) -> Outcome {
    if let Some(marker) = case.child("failure") {
        Outcome::Failed {
            message: marker_message(marker),
            output: marker_text(marker),
        }
    } else if let Some(marker) = case.child("error") {
        Outcome::Error {
            message: marker_message(marker),
            output: marker_text(marker),
        }
    } else if let Some(marker) = case.child("skipped") {
        Outcome::Skipped {
            message: marker_message(marker),
        }
    } else {
        Outcome::Passed
    }
}

fn marker_message(marker: &Element) -> Option<String> {
    marker
        .attr("message")
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn marker_text(marker: &Element) -> Option<String> {
    let text = marker.text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn parse_count(value: Option<&str>) -> Option<usize> {
    value?.trim().parse().ok()
}

/// Seconds as a non-negative finite number; `None` when it isn't one.
fn parse_seconds(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite() && *t >= 0.0)
}
