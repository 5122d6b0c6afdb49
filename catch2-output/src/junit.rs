// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of extracted results to JUnit XML.

use crate::{
    errors::JunitWriteError,
    output::RunOutput,
    test_result::{TestOutcome, TestResult},
};
use camino::Utf8Path;
use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};
use std::fs::File;
use tracing::debug;

static TRUNCATED_MESSAGE: &str = "test case output was truncated";
static TRUNCATED_TYPE: &str = "truncated";
static PARTIAL_OUTPUT_PROPERTY: &str = "partial-output";

impl RunOutput {
    /// Converts the extracted results into a JUnit report with a single test suite.
    pub fn to_junit_report(&self, report_name: &str) -> Report {
        let mut test_suite = TestSuite::new(report_name);
        if self.is_partial() {
            test_suite.add_property((PARTIAL_OUTPUT_PROPERTY, "true"));
        }
        test_suite.add_test_cases(self.test_results().iter().map(junit_test_case));
        if let Some(duration) = self.duration() {
            test_suite.set_time(duration);
        }

        let mut report = Report::new(report_name);
        report.add_test_suite(test_suite);
        if let Some(duration) = self.duration() {
            report.set_time(duration);
        }
        report
    }

    /// Writes a JUnit report to `path`, creating parent directories as needed.
    pub fn write_junit(&self, report_name: &str, path: &Utf8Path) -> Result<(), JunitWriteError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|error| JunitWriteError::Create {
                path: dir.to_owned(),
                error,
            })?;
        }

        let f = File::create(path).map_err(|error| JunitWriteError::Create {
            path: path.to_owned(),
            error,
        })?;
        self.to_junit_report(report_name)
            .serialize(f)
            .map_err(|error| JunitWriteError::Serialize {
                path: path.to_owned(),
                error,
            })?;

        debug!("junit: wrote {} test cases to {path}", self.test_results().len());
        Ok(())
    }
}

fn junit_test_case(result: &TestResult) -> TestCase {
    let status = match result.outcome() {
        TestOutcome::Passed => TestCaseStatus::success(),
        TestOutcome::Failed => {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Failure);
            if let Some(message) = result.error_message() {
                // The first line is the assertion summary.
                let (summary, _) = message.split_once('\n').unwrap_or((message, ""));
                status.set_message(summary).set_description(message);
            }
            status
        }
        TestOutcome::Skipped => {
            let mut status = TestCaseStatus::skipped();
            if let Some(message) = result.error_message() {
                status.set_message(message);
            }
            status
        }
        TestOutcome::Incomplete => {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Error);
            status.set_message(TRUNCATED_MESSAGE).set_type(TRUNCATED_TYPE);
            if let Some(record) = result.partial_record() {
                status.set_description(record);
            }
            status
        }
    };

    let mut test_case = TestCase::new(result.name(), status);
    if let Some(source_file) = result.source_file() {
        test_case.set_classname(source_file);
    }
    if let Some(duration) = result.duration() {
        test_case.set_time(duration);
    }
    if let Some(stdout) = result.standard_out() {
        test_case.set_system_out(stdout);
    }
    if let Some(stderr) = result.standard_error() {
        test_case.set_system_err(stderr);
    }
    test_case
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ReportSettings;
    use camino_tempfile::Utf8TempDir;
    use indoc::indoc;

    static TRUNCATED_RUN: &str = indoc! {r#"
        <Catch2TestRun name="tests">
          <TestCase name="passes" filename="a.cpp" line="1">
            <OverallResult success="true" durationInSeconds="0.125">
              <StdOut>
                hello
              </StdOut>
            </OverallResult>
          </TestCase>
          <TestCase name="fails" filename="a.cpp" line="5">
            <Expression success="false" type="CHECK" filename="a.cpp" line="6">
              <Original>
                1 == 2
              </Original>
            </Expression>
            <OverallResult success="false"/>
          </TestCase>
          <TestCase name="crashes" filename="a.cpp" line="9">
    "#};

    #[test]
    fn report_for_partial_run() {
        let output = RunOutput::new(TRUNCATED_RUN, false, &ReportSettings::default());
        let report = output.to_junit_report("catch2");
        let xml = report.to_string().expect("report serializes");

        assert!(xml.contains(r#"<property name="partial-output" value="true"/>"#), "{xml}");
        assert!(xml.contains(r#"name="passes""#), "{xml}");
        assert!(xml.contains(r#"classname="a.cpp""#), "{xml}");
        assert!(xml.contains("hello"), "{xml}");
        assert!(xml.contains(r#"message="1 of 1 assertions failed""#), "{xml}");
        assert!(xml.contains("test case output was truncated"), "{xml}");
        assert_eq!(report.test_suites.len(), 1);
        assert_eq!(report.test_suites[0].test_cases.len(), 3);
        assert_eq!(report.tests, 3);
        assert_eq!(report.failures, 1);
        assert_eq!(report.errors, 1);
    }

    #[test]
    fn report_for_complete_run_has_no_partial_property() {
        let output = RunOutput::new(
            indoc! {r#"
                <Catch2TestRun name="tests">
                  <TestCase name="passes">
                    <OverallResult success="true"/>
                  </TestCase>
                  <OverallResults successes="1" failures="0" expectedFailures="0"/>
                </Catch2TestRun>
            "#},
            false,
            &ReportSettings::default(),
        );
        let xml = output
            .to_junit_report("catch2")
            .to_string()
            .expect("report serializes");
        assert!(!xml.contains("partial-output"), "{xml}");
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = Utf8TempDir::new().expect("temp dir created");
        let path = dir.path().join("reports/nested/junit.xml");
        let output = RunOutput::new(TRUNCATED_RUN, false, &ReportSettings::default());
        output.write_junit("catch2", &path).expect("report written");

        let contents = std::fs::read_to_string(&path).expect("report readable");
        assert!(contents.starts_with("<?xml"), "{contents}");
        assert!(contents.contains(r#"name="crashes""#), "{contents}");
    }
}
