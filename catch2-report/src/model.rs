// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catch2 test-case and summary records.
//!
//! Both the version 2 (`<Catch>`) and version 3 (`<Catch2TestRun>`) XML reporters write test
//! cases and summaries with the same shape, so a single model covers both.

use crate::{errors::ReportParseError, node::Element};
use serde::Serialize;
use std::{fmt, str::FromStr, time::Duration};

pub(crate) static TEST_CASE_TAG: &str = "TestCase";
static SECTION_TAG: &str = "Section";
static EXPRESSION_TAG: &str = "Expression";
static ORIGINAL_TAG: &str = "Original";
static EXPANDED_TAG: &str = "Expanded";
static EXCEPTION_TAG: &str = "Exception";
static OVERALL_RESULT_TAG: &str = "OverallResult";
pub(crate) static OVERALL_RESULTS_TAG: &str = "OverallResults";
pub(crate) static OVERALL_RESULTS_CASES_TAG: &str = "OverallResultsCases";
static STDOUT_TAG: &str = "StdOut";
static STDERR_TAG: &str = "StdErr";

/// A single test case as written by the Catch2 XML reporter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct TestCase {
    /// The name of the test case.
    pub name: String,

    /// The description of the test case, if one was given.
    pub description: Option<String>,

    /// The tags of the test case, e.g. `[math][!mayfail]`.
    pub tags: Option<String>,

    /// Where the test case is defined.
    pub location: Option<SourceLocation>,

    /// Assertions, sections and messages, in document order.
    pub entries: Vec<Entry>,

    /// The result of the test case.
    pub result: OverallResult,
}

impl TestCase {
    /// Converts a `TestCase` element into a record.
    pub fn from_element(element: &Element) -> Result<Self, ReportParseError> {
        expect_name(element, TEST_CASE_TAG)?;

        let name = required_attribute(element, "name")?.to_owned();
        let result_element = element.child(OVERALL_RESULT_TAG).ok_or_else(|| {
            ReportParseError::MissingChild {
                element: TEST_CASE_TAG.to_owned(),
                child: OVERALL_RESULT_TAG,
            }
        })?;
        let mut result = OverallResult::from_element(result_element)?;
        // Some reporter versions write captured output next to the result rather than inside it.
        if result.stdout.is_none() {
            result.stdout = element.child(STDOUT_TAG).map(|e| Output::new(e.text()));
        }
        if result.stderr.is_none() {
            result.stderr = element.child(STDERR_TAG).map(|e| Output::new(e.text()));
        }

        Ok(Self {
            name,
            description: optional_string(element, "description"),
            tags: optional_string(element, "tags"),
            location: SourceLocation::from_element(element)?,
            entries: parse_entries(element)?,
            result,
        })
    }

    /// Returns true if this test case passed without being skipped.
    pub fn passed(&self) -> bool {
        self.result.success && !self.skipped()
    }

    /// Returns true if this test case was skipped at runtime.
    pub fn skipped(&self) -> bool {
        self.result.skips > 0 || contains_skip(&self.entries)
    }

    /// Returns every failure site in this test case, walking sections recursively.
    pub fn failures(&self) -> Vec<Failure<'_>> {
        let mut out = Vec::new();
        collect_failures(&self.entries, &mut Vec::new(), &mut out);
        out
    }

    /// Returns every failed assertion in this test case, in document order.
    pub fn failed_expressions(&self) -> Vec<&Expression> {
        self.failures()
            .into_iter()
            .filter_map(|failure| match failure.site {
                FailureSite::Expression(expression) => Some(expression),
                FailureSite::Message(_) => None,
            })
            .collect()
    }

    /// Returns every failure, exception and fatal error message in this test case, in document
    /// order.
    pub fn failure_messages(&self) -> Vec<&Message> {
        self.failures()
            .into_iter()
            .filter_map(|failure| match failure.site {
                FailureSite::Message(message) => Some(message),
                FailureSite::Expression(_) => None,
            })
            .collect()
    }

    /// Returns the number of assertions evaluated in this test case, and how many of them failed.
    pub fn assertion_counts(&self) -> (usize, usize) {
        let mut total = 0;
        let mut failed = 0;
        count_assertions(&self.entries, &mut total, &mut failed);
        (total, failed)
    }
}

/// One child of a test case or section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Entry {
    /// An evaluated assertion.
    Expression(Expression),

    /// A nested section.
    Section(Section),

    /// A message such as `INFO`, `WARN`, `FAIL` or an unexpected exception.
    Message(Message),
}

/// An evaluated assertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Expression {
    /// Whether the assertion passed.
    pub success: bool,

    /// The assertion macro, e.g. `REQUIRE` or `CHECK_THROWS`.
    pub macro_name: String,

    /// Where the assertion is written.
    pub location: Option<SourceLocation>,

    /// The assertion as written in source.
    pub original: String,

    /// The assertion with operands expanded.
    pub expanded: String,

    /// The message of an exception thrown while evaluating the assertion.
    pub exception: Option<String>,
}

impl Expression {
    fn from_element(element: &Element) -> Result<Self, ReportParseError> {
        let original = element
            .child(ORIGINAL_TAG)
            .ok_or_else(|| ReportParseError::MissingChild {
                element: EXPRESSION_TAG.to_owned(),
                child: ORIGINAL_TAG,
            })?
            .text();
        let expanded = element
            .child(EXPANDED_TAG)
            .map_or_else(|| original.clone(), Element::text);

        Ok(Self {
            success: parse_bool(element, "success")?,
            macro_name: optional_string(element, "type").unwrap_or_default(),
            location: SourceLocation::from_element(element)?,
            original,
            expanded,
            exception: element.child(EXCEPTION_TAG).map(Element::text),
        })
    }
}

/// A section within a test case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Section {
    /// The name of the section.
    pub name: String,

    /// The description of the section, if one was given.
    pub description: Option<String>,

    /// Where the section is defined.
    pub location: Option<SourceLocation>,

    /// Assertions, nested sections and messages, in document order.
    pub entries: Vec<Entry>,

    /// Assertion counts for this section.
    pub results: Option<Counts>,
}

impl Section {
    fn from_element(element: &Element) -> Result<Self, ReportParseError> {
        Ok(Self {
            name: required_attribute(element, "name")?.to_owned(),
            description: optional_string(element, "description"),
            location: SourceLocation::from_element(element)?,
            entries: parse_entries(element)?,
            results: element
                .child(OVERALL_RESULTS_TAG)
                .map(Counts::from_element)
                .transpose()?,
        })
    }
}

/// A message attached to a test case or section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Message {
    /// What kind of message this is.
    pub kind: MessageKind,

    /// The message text.
    pub text: String,

    /// Where the message was raised, if known.
    pub location: Option<SourceLocation>,
}

/// The kind of a [`Message`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// `INFO` or `CAPTURE` context.
    Info,
    /// `WARN`.
    Warning,
    /// `FAIL` or `FAIL_CHECK`.
    Failure,
    /// An exception escaped the test case.
    Exception,
    /// A signal or structured exception terminated the test case.
    FatalErrorCondition,
    /// `SKIP`.
    Skip,
}

impl MessageKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Info" => Some(Self::Info),
            "Warning" => Some(Self::Warning),
            "Failure" => Some(Self::Failure),
            "Exception" => Some(Self::Exception),
            "FatalErrorCondition" => Some(Self::FatalErrorCondition),
            "Skip" => Some(Self::Skip),
            _ => None,
        }
    }

    /// Returns true if this message marks its test case as failed.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::Failure | Self::Exception | Self::FatalErrorCondition
        )
    }

    /// Returns the tag this message is written with.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Failure => "Failure",
            Self::Exception => "Exception",
            Self::FatalErrorCondition => "FatalErrorCondition",
            Self::Skip => "Skip",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `OverallResult` of a single test case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct OverallResult {
    /// Whether the test case passed.
    pub success: bool,

    /// The number of skips recorded (version 3 only).
    pub skips: usize,

    /// How long the test case took, if durations were reported.
    pub duration: Option<Duration>,

    /// Standard output captured during the test case.
    pub stdout: Option<Output>,

    /// Standard error captured during the test case.
    pub stderr: Option<Output>,
}

impl OverallResult {
    fn from_element(element: &Element) -> Result<Self, ReportParseError> {
        let duration = match parse_optional::<f64>(element, "durationInSeconds")? {
            Some(secs) => Some(Duration::try_from_secs_f64(secs).map_err(|_| {
                ReportParseError::InvalidAttribute {
                    element: element.name().to_owned(),
                    attribute: "durationInSeconds",
                    value: element
                        .attribute("durationInSeconds")
                        .unwrap_or_default()
                        .to_owned(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            success: parse_bool(element, "success")?,
            skips: parse_optional(element, "skips")?.unwrap_or(0),
            duration,
            stdout: element.child(STDOUT_TAG).map(|e| Output::new(e.text())),
            stderr: element.child(STDERR_TAG).map(|e| Output::new(e.text())),
        })
    }
}

/// The summary of a run, read from the result group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct OverallResults {
    /// Assertion counts for the whole run.
    pub assertions: Counts,

    /// Test-case counts, written by version 3 reporters as `OverallResultsCases`.
    pub test_cases: Option<Counts>,
}

impl OverallResults {
    /// Reads the summary from a result group: `Catch/Group` for version 2, or the
    /// `Catch2TestRun` root for version 3.
    pub fn from_group(group: &Element) -> Result<Self, ReportParseError> {
        let assertions = group.child(OVERALL_RESULTS_TAG).ok_or_else(|| {
            ReportParseError::MissingChild {
                element: group.name().to_owned(),
                child: OVERALL_RESULTS_TAG,
            }
        })?;

        Ok(Self {
            assertions: Counts::from_element(assertions)?,
            test_cases: group
                .child(OVERALL_RESULTS_CASES_TAG)
                .map(Counts::from_element)
                .transpose()?,
        })
    }
}

/// Pass, fail and skip counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Counts {
    /// The number of successes.
    pub successes: usize,

    /// The number of failures.
    pub failures: usize,

    /// The number of failures that were expected (`[!shouldfail]` or `[!mayfail]`).
    pub expected_failures: usize,

    /// The number of skips. Always 0 for version 2.
    pub skips: usize,
}

impl Counts {
    /// Reads counters from an `OverallResults` or `OverallResultsCases` element.
    pub fn from_element(element: &Element) -> Result<Self, ReportParseError> {
        Ok(Self {
            successes: parse_required(element, "successes")?,
            failures: parse_required(element, "failures")?,
            expected_failures: parse_required(element, "expectedFailures")?,
            skips: parse_optional(element, "skips")?.unwrap_or(0),
        })
    }

    /// Returns the total number of items counted.
    pub fn total(&self) -> usize {
        self.successes
            .saturating_add(self.failures)
            .saturating_add(self.expected_failures)
            .saturating_add(self.skips)
    }
}

/// A source file and line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// The source file, as written by the test binary.
    pub filename: String,

    /// The line, if one was written.
    pub line: Option<u32>,
}

impl SourceLocation {
    fn from_element(element: &Element) -> Result<Option<Self>, ReportParseError> {
        let Some(filename) = element.attribute("filename") else {
            return Ok(None);
        };
        Ok(Some(Self {
            filename: filename.to_owned(),
            line: parse_optional(element, "line")?,
        }))
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.filename, line),
            None => f.write_str(&self.filename),
        }
    }
}

/// Text written to standard output or standard error while a test case ran.
///
/// Non-printable control characters are removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Output {
    output: Box<str>,
}

impl Output {
    /// Creates a new output, removing any non-printable characters from it.
    pub fn new(output: impl AsRef<str>) -> Self {
        let output = output
            .as_ref()
            .replace(
                |c: char| matches!(c, '\x00'..='\x08' | '\x0b' | '\x0c' | '\x0e'..='\x1f'),
                "",
            )
            .into_boxed_str();
        Self { output }
    }

    /// Returns the output.
    pub fn as_str(&self) -> &str {
        &self.output
    }
}

impl AsRef<str> for Output {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A failed assertion or failure message, with the context it was reported in.
#[derive(Clone, Debug)]
pub struct Failure<'a> {
    /// The names of the enclosing sections, outermost first.
    pub sections: Vec<&'a str>,

    /// What failed.
    pub site: FailureSite<'a>,

    /// `INFO` and `WARN` messages reported just before the failure in the same scope.
    pub context: Vec<&'a Message>,
}

impl Failure<'_> {
    /// Returns where the failure was reported, if known.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self.site {
            FailureSite::Expression(expression) => expression.location.as_ref(),
            FailureSite::Message(message) => message.location.as_ref(),
        }
    }
}

/// The entry behind a [`Failure`].
#[derive(Copy, Clone, Debug)]
pub enum FailureSite<'a> {
    /// A failed assertion.
    Expression(&'a Expression),

    /// A failure, exception or fatal error message.
    Message(&'a Message),
}

fn parse_entries(element: &Element) -> Result<Vec<Entry>, ReportParseError> {
    let mut entries = Vec::new();
    for child in element.elements() {
        let name = child.name();
        if name == EXPRESSION_TAG {
            entries.push(Entry::Expression(Expression::from_element(child)?));
        } else if name == SECTION_TAG {
            entries.push(Entry::Section(Section::from_element(child)?));
        } else if let Some(kind) = MessageKind::from_tag(name) {
            entries.push(Entry::Message(Message {
                kind,
                text: child.text(),
                location: SourceLocation::from_element(child)?,
            }));
        }
        // Anything else (OverallResult(s), StdOut, BenchmarkResults, ...) is handled by the
        // caller or not modeled.
    }
    Ok(entries)
}

fn collect_failures<'a>(
    entries: &'a [Entry],
    sections: &mut Vec<&'a str>,
    out: &mut Vec<Failure<'a>>,
) {
    let mut context = Vec::new();
    for entry in entries {
        match entry {
            Entry::Expression(expression) if !expression.success => out.push(Failure {
                sections: sections.clone(),
                site: FailureSite::Expression(expression),
                context: std::mem::take(&mut context),
            }),
            Entry::Expression(_) => context.clear(),
            Entry::Message(message) if message.kind.is_failure() => out.push(Failure {
                sections: sections.clone(),
                site: FailureSite::Message(message),
                context: std::mem::take(&mut context),
            }),
            Entry::Message(message) => match message.kind {
                MessageKind::Info | MessageKind::Warning => context.push(message),
                _ => {}
            },
            Entry::Section(section) => {
                sections.push(&section.name);
                collect_failures(&section.entries, sections, out);
                sections.pop();
            }
        }
    }
}

fn count_assertions(entries: &[Entry], total: &mut usize, failed: &mut usize) {
    for entry in entries {
        match entry {
            Entry::Expression(expression) => {
                *total += 1;
                if !expression.success {
                    *failed += 1;
                }
            }
            Entry::Section(section) => count_assertions(&section.entries, total, failed),
            Entry::Message(_) => {}
        }
    }
}

fn contains_skip(entries: &[Entry]) -> bool {
    entries.iter().any(|entry| match entry {
        Entry::Message(message) => message.kind == MessageKind::Skip,
        Entry::Section(section) => contains_skip(&section.entries),
        Entry::Expression(_) => false,
    })
}

pub(crate) fn expect_name(
    element: &Element,
    expected: &'static str,
) -> Result<(), ReportParseError> {
    if element.name() == expected {
        Ok(())
    } else {
        Err(ReportParseError::UnexpectedElement {
            expected,
            found: element.name().to_owned(),
        })
    }
}

fn required_attribute<'a>(
    element: &'a Element,
    attribute: &'static str,
) -> Result<&'a str, ReportParseError> {
    element
        .attribute(attribute)
        .ok_or_else(|| ReportParseError::MissingAttribute {
            element: element.name().to_owned(),
            attribute,
        })
}

fn optional_string(element: &Element, attribute: &str) -> Option<String> {
    element
        .attribute(attribute)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn parse_optional<T: FromStr>(
    element: &Element,
    attribute: &'static str,
) -> Result<Option<T>, ReportParseError> {
    element
        .attribute(attribute)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ReportParseError::InvalidAttribute {
                    element: element.name().to_owned(),
                    attribute,
                    value: value.to_owned(),
                })
        })
        .transpose()
}

fn parse_required<T: FromStr>(
    element: &Element,
    attribute: &'static str,
) -> Result<T, ReportParseError> {
    parse_optional(element, attribute)?.ok_or_else(|| ReportParseError::MissingAttribute {
        element: element.name().to_owned(),
        attribute,
    })
}

fn parse_bool(element: &Element, attribute: &'static str) -> Result<bool, ReportParseError> {
    match required_attribute(element, attribute)? {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ReportParseError::InvalidAttribute {
            element: element.name().to_owned(),
            attribute,
            value: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn parse_test_case(input: &str) -> Result<TestCase, ReportParseError> {
        let element = Element::parse_document(input).expect("fixture is well-formed");
        TestCase::from_element(&element)
    }

    #[test]
    fn passing_test_case() {
        let test_case = parse_test_case(indoc! {r#"
            <TestCase name="Addition works" tags="[math]" filename="/src/math.cpp" line="12">
              <OverallResult success="true" durationInSeconds="0.25"/>
            </TestCase>
        "#})
        .expect("record is valid");

        assert_eq!(test_case.name, "Addition works");
        assert_eq!(test_case.tags.as_deref(), Some("[math]"));
        assert_eq!(test_case.description, None);
        assert_eq!(
            test_case.location,
            Some(SourceLocation {
                filename: "/src/math.cpp".to_owned(),
                line: Some(12),
            })
        );
        assert!(test_case.passed());
        assert!(!test_case.skipped());
        assert_eq!(test_case.result.duration, Some(Duration::from_millis(250)));
        assert!(test_case.failures().is_empty());
    }

    #[test]
    fn failures_carry_sections_and_context() {
        let test_case = parse_test_case(indoc! {r#"
            <TestCase name="Division" filename="div.cpp" line="20">
              <Expression success="true" type="CHECK" filename="div.cpp" line="21">
                <Original>true</Original>
                <Expanded>true</Expanded>
              </Expression>
              <Section name="integers" filename="div.cpp" line="22">
                <Section name="by zero" filename="div.cpp" line="23">
                  <Info>
                    divisor := 0
                  </Info>
                  <Expression success="false" type="REQUIRE" filename="div.cpp" line="24">
                    <Original>
                      divide(1, d) == 0
                    </Original>
                    <Expanded>
                      1 == 0
                    </Expanded>
                  </Expression>
                  <OverallResults successes="0" failures="1" expectedFailures="0"/>
                </Section>
                <OverallResults successes="0" failures="1" expectedFailures="0"/>
              </Section>
              <Exception filename="div.cpp" line="30">
                boom
              </Exception>
              <OverallResult success="false">
                <StdOut>
                  dividing
                </StdOut>
              </OverallResult>
            </TestCase>
        "#})
        .expect("record is valid");

        assert!(!test_case.passed());
        assert_eq!(test_case.assertion_counts(), (2, 1));
        assert_eq!(
            test_case.result.stdout.as_ref().map(Output::as_str),
            Some("dividing")
        );

        let failures = test_case.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(test_case.failed_expressions().len(), 1);
        assert_eq!(
            test_case
                .failure_messages()
                .iter()
                .map(|message| message.kind)
                .collect::<Vec<_>>(),
            vec![MessageKind::Exception]
        );

        assert_eq!(failures[0].sections, vec!["integers", "by zero"]);
        assert_eq!(failures[0].context.len(), 1);
        assert_eq!(failures[0].context[0].text, "divisor := 0");
        match failures[0].site {
            FailureSite::Expression(expression) => {
                assert_eq!(expression.macro_name, "REQUIRE");
                assert_eq!(expression.original, "divide(1, d) == 0");
                assert_eq!(expression.expanded, "1 == 0");
            }
            FailureSite::Message(_) => panic!("expected an expression failure"),
        }
        assert_eq!(
            failures[0].location().map(ToString::to_string),
            Some("div.cpp:24".to_owned())
        );

        assert!(failures[1].sections.is_empty());
        match failures[1].site {
            FailureSite::Message(message) => {
                assert_eq!(message.kind, MessageKind::Exception);
                assert_eq!(message.text, "boom");
            }
            FailureSite::Expression(_) => panic!("expected a message failure"),
        }
    }

    #[test]
    fn stdout_next_to_result() {
        let element = Element::new("TestCase")
            .with_attribute("name", "noisy")
            .with_child(Element::new("StdErr").with_child("warn\x1bing"))
            .with_child(Element::new("OverallResult").with_attribute("success", "true"));
        let test_case = TestCase::from_element(&element).expect("record is valid");
        assert_eq!(
            test_case.result.stderr.as_ref().map(Output::as_str),
            Some("warning"),
            "control characters are stripped"
        );
    }

    #[test]
    fn skipped_test_case() {
        let test_case = parse_test_case(indoc! {r#"
            <TestCase name="not on this platform">
              <Skip filename="p.cpp" line="4">
                needs a GPU
              </Skip>
              <OverallResult success="true" skips="1"/>
            </TestCase>
        "#})
        .expect("record is valid");
        assert!(test_case.skipped());
        assert!(!test_case.passed());
        assert!(test_case.failures().is_empty());
    }

    #[test_case(
        r#"<TestCase><OverallResult success="true"/></TestCase>"#,
        ReportParseError::MissingAttribute { element: "TestCase".to_owned(), attribute: "name" }
        ; "missing name")]
    #[test_case(
        r#"<TestCase name="a"/>"#,
        ReportParseError::MissingChild { element: "TestCase".to_owned(), child: "OverallResult" }
        ; "missing result")]
    #[test_case(
        r#"<TestCase name="a"><OverallResult success="yes"/></TestCase>"#,
        ReportParseError::InvalidAttribute {
            element: "OverallResult".to_owned(),
            attribute: "success",
            value: "yes".to_owned(),
        }
        ; "invalid success")]
    #[test_case(
        r#"<TestCase name="a"><OverallResult success="true" durationInSeconds="-1"/></TestCase>"#,
        ReportParseError::InvalidAttribute {
            element: "OverallResult".to_owned(),
            attribute: "durationInSeconds",
            value: "-1".to_owned(),
        }
        ; "negative duration")]
    #[test_case(
        r#"<TestCase name="a" line="x" filename="f"><OverallResult success="true"/></TestCase>"#,
        ReportParseError::InvalidAttribute {
            element: "TestCase".to_owned(),
            attribute: "line",
            value: "x".to_owned(),
        }
        ; "invalid line")]
    #[test_case(
        r#"<Section name="a"/>"#,
        ReportParseError::UnexpectedElement { expected: "TestCase", found: "Section".to_owned() }
        ; "wrong element")]
    fn invalid_test_case(input: &str, expected: ReportParseError) {
        assert_eq!(parse_test_case(input), Err(expected));
    }

    #[test]
    fn overall_results_version_3() {
        let group = Element::parse_document(indoc! {r#"
            <Catch2TestRun name="tests">
              <OverallResults successes="3" failures="1" expectedFailures="0" skips="2"/>
              <OverallResultsCases successes="1" failures="1" expectedFailures="0" skips="1"/>
            </Catch2TestRun>
        "#})
        .expect("fixture is well-formed");

        let results = OverallResults::from_group(&group).expect("summary is valid");
        assert_eq!(
            results,
            OverallResults {
                assertions: Counts {
                    successes: 3,
                    failures: 1,
                    expected_failures: 0,
                    skips: 2,
                },
                test_cases: Some(Counts {
                    successes: 1,
                    failures: 1,
                    expected_failures: 0,
                    skips: 1,
                }),
            }
        );
        assert_eq!(results.assertions.total(), 6);
    }

    #[test]
    fn counts_total_saturates() {
        let counts = Counts::from_element(
            &Element::new("OverallResults")
                .with_attribute("successes", usize::MAX.to_string())
                .with_attribute("failures", "1")
                .with_attribute("expectedFailures", "0"),
        )
        .expect("counters are valid");
        assert_eq!(counts.successes, usize::MAX);
        assert_eq!(counts.total(), usize::MAX);
    }

    #[test]
    fn overall_results_missing() {
        let group = Element::new("Group");
        assert_eq!(
            OverallResults::from_group(&group),
            Err(ReportParseError::MissingChild {
                element: "Group".to_owned(),
                child: "OverallResults",
            })
        );
    }
}
