use std::path::Path;

use junit_report::render::{json, markdown, summary};
use junit_report::{
    DiscoveryConfig, Error, OutputFormat, ParseError, TestStatus, aggregate, render,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn lines_starting_with(text: &str, prefix: &str) -> usize {
    text.lines().filter(|l| l.starts_with(prefix)).count()
}

const ONE_FAILURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="PlayerTest" tests="3" failures="1" errors="0" skipped="0" time="0.75">
  <testcase name="test_move" classname="PlayerTest" time="0.25"/>
  <testcase name="test_jump" classname="PlayerTest" time="0.25">
    <failure message="expected 2 but was 3">PlayerTest.gd:12</failure>
  </testcase>
  <testcase name="test_idle" classname="PlayerTest" time="0.25"/>
</testsuite>"#;

const ONE_ERROR: &str = r#"<testsuites>
  <testsuite name="SaveTest">
    <testcase name="test_load" classname="SaveTest">
      <error message="file missing"/>
    </testcase>
  </testsuite>
</testsuites>"#;

#[test]
fn single_report_with_one_failure() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "reports/results.xml", ONE_FAILURE);

    let pass = aggregate(dir.path(), &DiscoveryConfig::default()).unwrap();
    let results = &pass.results;

    assert_eq!(results.total_tests, 3);
    assert_eq!(results.total_failures, 1);
    assert!(!results.success);
    assert!(pass.skipped.is_empty());

    let text = summary::render(results, false);
    assert_eq!(lines_starting_with(&text, "FAILED:"), 1);
    assert!(text.contains("FAILED: PlayerTest::test_jump"));
    assert!(text.contains("TESTS FAILED"));
}

#[test]
fn empty_directory_is_a_vacuous_success() {
    let dir = TempDir::new().unwrap();

    let pass = aggregate(dir.path(), &DiscoveryConfig::default()).unwrap();
    let results = &pass.results;

    assert_eq!(results.total_tests, 0);
    assert!(results.success);
    assert!(results.suites.is_empty());
    assert!(summary::render(results, false).contains("ALL TESTS PASSED"));
}

#[test]
fn case_without_marker_or_time_passes_in_zero_seconds() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "plain.xml",
        r#"<testsuite name="Plain"><testcase name="test_ok" classname="Plain"/></testsuite>"#,
    );

    let pass = aggregate(dir.path(), &DiscoveryConfig::default()).unwrap();
    let case = &pass.results.suites[0].testcases[0];

    assert_eq!(case.status, TestStatus::Passed);
    assert_eq!(case.time, 0.0);
    assert_eq!(pass.results.suites[0].tests, 1);
}

#[test]
fn errors_from_several_reports_add_up() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/save.xml", ONE_ERROR);
    write(dir.path(), "b/save.xml", ONE_ERROR);

    let pass = aggregate(dir.path(), &DiscoveryConfig::default()).unwrap();
    let results = &pass.results;

    assert_eq!(results.suites.len(), 2);
    assert_eq!(results.total_errors, 2);
    assert!(!results.success);

    let text = summary::render(results, false);
    assert_eq!(lines_starting_with(&text, "ERROR:"), 2);
    assert_eq!(lines_starting_with(&text, "FAILED:"), 0);
}

#[test]
fn unrecognized_report_is_skipped_with_a_diagnostic() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.xml", ONE_FAILURE);
    write(dir.path(), "coverage.xml", r#"<coverage line-rate="0.9"/>"#);
    write(dir.path(), "broken.xml", "<testsuite><testcase></testsuite>");

    let pass = aggregate(dir.path(), &DiscoveryConfig::default()).unwrap();

    assert_eq!(pass.results.suites.len(), 1);
    assert_eq!(pass.results.total_tests, 3);
    assert_eq!(pass.skipped.len(), 2);

    let coverage = pass
        .skipped
        .iter()
        .find(|s| s.path.ends_with("coverage.xml"))
        .unwrap();
    assert!(matches!(&coverage.reason, ParseError::UnrecognizedRoot(tag) if tag == "coverage"));
    assert!(
        pass.skipped
            .iter()
            .any(|s| s.path.ends_with("broken.xml"))
    );
}

#[test]
fn missing_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = aggregate(&dir.path().join("missing"), &DiscoveryConfig::default()).unwrap_err();
    assert!(matches!(err, Error::ReportDirNotFound(_)));
}

#[test]
fn undeclared_counts_match_the_case_list() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "derived.xml",
        r#"<testsuite>
             <testcase name="a"/>
             <testcase name="b"><skipped/></testcase>
             <testcase name="c"><failure/></testcase>
             <testcase name="d"><error/></testcase>
           </testsuite>"#,
    );

    let pass = aggregate(dir.path(), &DiscoveryConfig::default()).unwrap();
    let suite = &pass.results.suites[0];

    assert_eq!(suite.name, "derived");
    assert_eq!(suite.tests, suite.testcases.len());
    assert_eq!((suite.failures, suite.errors, suite.skipped), (1, 1, 1));
    assert_eq!(pass.results.passed(), 1);
}

#[test]
fn json_output_round_trips() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "one.xml", ONE_FAILURE);
    write(dir.path(), "two.xml", ONE_ERROR);

    let results = aggregate(dir.path(), &DiscoveryConfig::default())
        .unwrap()
        .results;
    let encoded = render(&results, OutputFormat::Json, false).unwrap();

    assert_eq!(json::decode(&encoded).unwrap(), results);
}

#[test]
fn markdown_failures_section_follows_success() {
    let passing = TempDir::new().unwrap();
    write(
        passing.path(),
        "ok.xml",
        r#"<testsuite><testcase name="a"/></testsuite>"#,
    );
    let results = aggregate(passing.path(), &DiscoveryConfig::default())
        .unwrap()
        .results;
    assert!(!markdown::render(&results).contains("### Failures"));

    let failing = TempDir::new().unwrap();
    write(failing.path(), "one.xml", ONE_FAILURE);
    write(failing.path(), "two.xml", ONE_ERROR);
    let results = aggregate(failing.path(), &DiscoveryConfig::default())
        .unwrap()
        .results;
    let text = markdown::render(&results);

    assert_eq!(text.matches("### Failures").count(), 1);
    assert!(text.contains("- **PlayerTest::test_jump**: expected 2 but was 3"));
    assert!(text.contains("- **SaveTest::test_load**: file missing"));
}

#[test]
fn skipped_tests_do_not_fail_the_run() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "skips.xml",
        r#"<testsuite name="Skips">
             <testcase name="a"><skipped message="flaky on CI"/></testcase>
             <testcase name="b"/>
           </testsuite>"#,
    );

    let results = aggregate(dir.path(), &DiscoveryConfig::default())
        .unwrap()
        .results;
    assert_eq!(results.total_skipped, 1);
    assert!(results.success);
}

#[test]
fn absurd_declared_counts_do_not_abort_the_pass() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "huge.xml",
        &format!(r#"<testsuite name="Huge" tests="{}"/>"#, usize::MAX),
    );
    write(dir.path(), "small.xml", r#"<testsuite name="Small" tests="1"/>"#);

    let results = aggregate(dir.path(), &DiscoveryConfig::default())
        .unwrap()
        .results;
    assert_eq!(results.suites.len(), 2);
    assert_eq!(results.total_tests, usize::MAX);
}

#[test]
fn huge_suite_times_keep_json_decodable() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.xml", r#"<testsuite name="A" time="1e308"/>"#);
    write(dir.path(), "b.xml", r#"<testsuite name="B" time="1e308"/>"#);

    let results = aggregate(dir.path(), &DiscoveryConfig::default())
        .unwrap()
        .results;
    assert!(results.total_time.is_finite());

    let encoded = render(&results, OutputFormat::Json, false).unwrap();
    assert_eq!(json::decode(&encoded).unwrap(), results);
}

#[test]
fn deeply_nested_report_is_skipped() {
    let dir = TempDir::new().unwrap();
    let depth = 1_000_000;
    write(
        dir.path(),
        "deep.xml",
        &format!(
            "<testsuite>{}{}</testsuite>",
            "<x>".repeat(depth),
            "</x>".repeat(depth)
        ),
    );
    write(
        dir.path(),
        "ok.xml",
        r#"<testsuite name="Ok"><testcase name="a"/></testsuite>"#,
    );

    let pass = aggregate(dir.path(), &DiscoveryConfig::default()).unwrap();
    assert_eq!(pass.results.total_tests, 1);
    assert_eq!(pass.skipped.len(), 1);
    assert!(matches!(pass.skipped[0].reason, ParseError::Malformed(_)));
}
