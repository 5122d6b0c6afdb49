// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strict parsing of a cleaned, complete report.

use crate::{
    errors::StrictParseError, format::ReportFormat, settings::ReportSettings,
    test_result::TestResult,
};
use catch2_report::{Element, OverallResults, Reporter};

static GROUP_TAG: &str = "Group";
static TEST_CASE_TAG: &str = "TestCase";

/// The outcome of a successful strict parse.
#[derive(Clone, Debug)]
pub(crate) enum StrictOutcome {
    /// Every test case and the run summary were read.
    Complete {
        results: Vec<TestResult>,
        overall: OverallResults,
    },

    /// The report is complete but contains no test cases.
    NoTestCases,
}

/// Parses a document returned by [`trim_document`](crate::trim_document).
///
/// Results are only returned if every test case and the summary could be read.
pub(crate) fn parse_strict(
    cleaned: &str,
    reporter: &impl Reporter,
    settings: &ReportSettings,
) -> Result<StrictOutcome, StrictParseError> {
    let format = ReportFormat::classify(cleaned);
    let Some(expected_root) = format.root_element() else {
        return Err(StrictParseError::UnrecognizedFormat);
    };

    let root = Element::parse_document(cleaned)?;
    if root.name() != expected_root {
        return Err(StrictParseError::UnexpectedRoot {
            format,
            expected: expected_root,
            found: root.name().to_owned(),
        });
    }

    let group = match format {
        ReportFormat::Version2 => root.child(GROUP_TAG).ok_or(StrictParseError::MissingGroup)?,
        ReportFormat::Version3 | ReportFormat::Unknown => &root,
    };

    let test_cases: Vec<_> = group.children_named(TEST_CASE_TAG).collect();
    if test_cases.is_empty() {
        return Ok(StrictOutcome::NoTestCases);
    }

    let results = test_cases
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            reporter
                .test_case(node)
                .map(|test_case| TestResult::from_test_case(test_case, settings))
                .map_err(|error| StrictParseError::TestCase { index, error })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let overall = reporter
        .overall_results(group)
        .map_err(StrictParseError::Summary)?;

    Ok(StrictOutcome::Complete { results, overall })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catch2_report::{ReportParseError, XmlReporter};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn parse(input: &str) -> Result<StrictOutcome, StrictParseError> {
        parse_strict(input, &XmlReporter, &ReportSettings::default())
    }

    fn names(outcome: &StrictOutcome) -> Vec<&str> {
        match outcome {
            StrictOutcome::Complete { results, .. } => {
                results.iter().map(TestResult::name).collect()
            }
            StrictOutcome::NoTestCases => Vec::new(),
        }
    }

    #[test]
    fn version_2_document() {
        let outcome = parse(indoc! {r#"
            <Catch name="tests">
              <Group name="tests">
                <TestCase name="first">
                  <OverallResult success="true"/>
                </TestCase>
                <TestCase name="second">
                  <OverallResult success="false"/>
                </TestCase>
                <OverallResults successes="1" failures="1" expectedFailures="0"/>
              </Group>
              <OverallResults successes="1" failures="1" expectedFailures="0"/>
            </Catch>
        "#})
        .expect("document is valid");

        assert_eq!(names(&outcome), vec!["first", "second"]);
        match outcome {
            StrictOutcome::Complete { overall, .. } => {
                assert_eq!(overall.assertions.successes, 1);
                assert_eq!(overall.assertions.failures, 1);
                assert_eq!(overall.test_cases, None);
            }
            StrictOutcome::NoTestCases => panic!("expected test cases"),
        }
    }

    #[test]
    fn version_3_document() {
        let outcome = parse(indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <Catch2TestRun name="tests" rng-seed="1" catch2-version="3.5.0">
              <TestCase name="only">
                <OverallResult success="true" skips="0"/>
              </TestCase>
              <OverallResults successes="2" failures="0" expectedFailures="0" skips="0"/>
              <OverallResultsCases successes="1" failures="0" expectedFailures="0" skips="0"/>
            </Catch2TestRun>
        "#})
        .expect("document is valid");

        assert_eq!(names(&outcome), vec!["only"]);
        match outcome {
            StrictOutcome::Complete { overall, .. } => {
                assert_eq!(overall.test_cases.map(|counts| counts.successes), Some(1));
            }
            StrictOutcome::NoTestCases => panic!("expected test cases"),
        }
    }

    #[test_case(
        r#"<Catch name="t"><Group name="t"><OverallResults successes="0" failures="0" expectedFailures="0"/></Group></Catch>"#
        ; "version 2"
    )]
    #[test_case(r#"<Catch2TestRun name="t"></Catch2TestRun>"# ; "version 3 without summary")]
    fn no_test_cases(input: &str) {
        assert!(matches!(parse(input), Ok(StrictOutcome::NoTestCases)));
    }

    #[test]
    fn unrecognized() {
        assert!(matches!(
            parse("<testsuites/>"),
            Err(StrictParseError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn missing_group() {
        assert!(matches!(
            parse(r#"<Catch name="t"><TestCase name="a"/></Catch>"#),
            Err(StrictParseError::MissingGroup)
        ));
    }

    #[test]
    fn unexpected_root() {
        let error = parse(r#"<Wrapper><Catch name="t"><Group/></Catch></Wrapper>"#)
            .expect_err("root does not match");
        match error {
            StrictParseError::UnexpectedRoot {
                format,
                expected,
                found,
            } => {
                assert_eq!(format, ReportFormat::Version2);
                assert_eq!(expected, "Catch");
                assert_eq!(found, "Wrapper");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_markup() {
        assert!(matches!(
            parse(r#"<Catch2TestRun name="t"><TestCase name="a"></Catch2TestRun>"#),
            Err(StrictParseError::Xml(_))
        ));
    }

    #[test]
    fn invalid_test_case_discards_results() {
        let error = parse(indoc! {r#"
            <Catch2TestRun name="t">
              <TestCase name="good">
                <OverallResult success="true"/>
              </TestCase>
              <TestCase name="bad"/>
              <OverallResults successes="1" failures="0" expectedFailures="0"/>
            </Catch2TestRun>
        "#})
        .expect_err("second test case is invalid");

        match error {
            StrictParseError::TestCase { index, error } => {
                assert_eq!(index, 1);
                assert_eq!(
                    error,
                    ReportParseError::MissingChild {
                        element: "TestCase".to_owned(),
                        child: "OverallResult",
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_summary() {
        let error = parse(indoc! {r#"
            <Catch2TestRun name="t">
              <TestCase name="good">
                <OverallResult success="true"/>
              </TestCase>
            </Catch2TestRun>
        "#})
        .expect_err("summary is missing");
        assert!(
            matches!(error, StrictParseError::Summary(_)),
            "unexpected error: {error:?}"
        );
    }
}
