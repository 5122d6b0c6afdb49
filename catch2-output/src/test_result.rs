// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::settings::{MessageFormat, ReportSettings, StackTraceFormat};
use catch2_report::{Entry, Failure, FailureSite, MessageKind, Output, TestCase};
use serde::Serialize;
use std::time::Duration;
use swrite::{SWrite, swrite};

/// The outcome of a single test case.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestOutcome {
    /// The test case passed.
    Passed,

    /// The test case failed.
    Failed,

    /// The test case was skipped at runtime.
    Skipped,

    /// The test case started but its record was cut off, so its outcome is unknown.
    Incomplete,
}

impl TestOutcome {
    /// Returns a short uppercase label for this outcome.
    pub fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Skipped => "SKIP",
            Self::Incomplete => "INCOMPLETE",
        }
    }
}

/// The result of a single test case extracted from test output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestResult {
    name: String,
    outcome: TestOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_stack_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    standard_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    standard_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_case: Option<TestCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    partial_record: Option<String>,
}

impl TestResult {
    /// Creates a result from a complete test-case record.
    pub fn from_test_case(test_case: TestCase, settings: &ReportSettings) -> Self {
        let outcome = if !test_case.result.success {
            TestOutcome::Failed
        } else if test_case.skipped() {
            TestOutcome::Skipped
        } else {
            TestOutcome::Passed
        };

        let (error_message, error_stack_trace) = match outcome {
            TestOutcome::Failed => (
                failure_message(&test_case, settings.message_format),
                stack_trace(&test_case, settings),
            ),
            TestOutcome::Skipped => (skip_message(&test_case, settings.message_format), None),
            TestOutcome::Passed | TestOutcome::Incomplete => (None, None),
        };

        Self {
            name: test_case.name.clone(),
            outcome,
            duration: test_case.result.duration,
            error_message,
            error_stack_trace,
            standard_out: test_case.result.stdout.as_ref().map(output_string),
            standard_error: test_case.result.stderr.as_ref().map(output_string),
            test_case: Some(test_case),
            partial_record: None,
        }
    }

    /// Creates a minimal result for a test case whose record was cut off.
    ///
    /// `partial_record` is the text of the record as far as it was captured.
    pub fn incomplete(name: impl Into<String>, partial_record: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: TestOutcome::Incomplete,
            duration: None,
            error_message: None,
            error_stack_trace: None,
            standard_out: None,
            standard_error: None,
            test_case: None,
            partial_record: Some(partial_record.into()),
        }
    }

    /// Returns the name of the test case.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the outcome of the test case.
    pub fn outcome(&self) -> TestOutcome {
        self.outcome
    }

    /// Returns true if this result was salvaged from a record that was cut off.
    pub fn is_incomplete(&self) -> bool {
        self.outcome == TestOutcome::Incomplete
    }

    /// Returns how long the test case took, if reported.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Returns the error message, if the test case failed or was skipped with a message.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the failure locations, one per line.
    pub fn error_stack_trace(&self) -> Option<&str> {
        self.error_stack_trace.as_deref()
    }

    /// Returns standard output captured while the test case ran.
    pub fn standard_out(&self) -> Option<&str> {
        self.standard_out.as_deref()
    }

    /// Returns standard error captured while the test case ran.
    pub fn standard_error(&self) -> Option<&str> {
        self.standard_error.as_deref()
    }

    /// Returns the full record, unless this result is incomplete.
    pub fn test_case(&self) -> Option<&TestCase> {
        self.test_case.as_ref()
    }

    /// Returns the captured text of a record that was cut off.
    pub fn partial_record(&self) -> Option<&str> {
        self.partial_record.as_deref()
    }

    /// Returns the source file the test case is defined in, if known.
    pub fn source_file(&self) -> Option<&str> {
        self.test_case
            .as_ref()
            .and_then(|test_case| test_case.location.as_ref())
            .map(|location| location.filename.as_str())
    }
}

fn output_string(output: &Output) -> String {
    output.as_str().to_owned()
}

fn stats_line(test_case: &TestCase) -> String {
    let (total, failed) = test_case.assertion_counts();
    let messages = test_case.failure_messages().len();

    let mut out = format!("{failed} of {total} assertions failed");
    if messages > 0 {
        let plural = if messages == 1 { "" } else { "s" };
        swrite!(out, ", {messages} failure message{plural}");
    }
    out
}

fn failure_message(test_case: &TestCase, format: MessageFormat) -> Option<String> {
    let failures = test_case.failures();
    match format {
        MessageFormat::None => None,
        MessageFormat::StatsOnly => Some(stats_line(test_case)),
        MessageFormat::AdditionalInfo => {
            let mut out = stats_line(test_case);
            for failure in &failures {
                out.push_str("\n\n");
                describe_failure(&mut out, failure);
            }
            Some(out)
        }
    }
}

fn describe_failure(out: &mut String, failure: &Failure<'_>) {
    if !failure.sections.is_empty() {
        swrite!(out, "Section: {}\n", failure.sections.join(" / "));
    }
    if let Some(location) = failure.location() {
        swrite!(out, "{location}: ");
    }
    match failure.site {
        FailureSite::Expression(expression) => {
            swrite!(out, "{}( {} )", expression.macro_name, expression.original);
            if expression.expanded != expression.original {
                swrite!(out, "\nwith expansion:\n  {}", expression.expanded);
            }
            if let Some(exception) = &expression.exception {
                swrite!(out, "\ndue to unexpected exception with message:\n  {exception}");
            }
        }
        FailureSite::Message(message) => {
            swrite!(out, "{}:\n  {}", message.kind, message.text);
        }
    }
    for context in &failure.context {
        let label = match context.kind {
            MessageKind::Warning => "with warning",
            _ => "with message",
        };
        swrite!(out, "\n{label}:\n  {}", context.text);
    }
}

fn skip_message(test_case: &TestCase, format: MessageFormat) -> Option<String> {
    if format == MessageFormat::None {
        return None;
    }
    let mut skips = Vec::new();
    collect_skips(&test_case.entries, &mut skips);
    (!skips.is_empty()).then(|| skips.join("\n"))
}

fn collect_skips<'a>(entries: &'a [Entry], out: &mut Vec<&'a str>) {
    for entry in entries {
        match entry {
            Entry::Message(message) if message.kind == MessageKind::Skip => {
                out.push(&message.text);
            }
            Entry::Section(section) => collect_skips(&section.entries, out),
            _ => {}
        }
    }
}

fn stack_trace(test_case: &TestCase, settings: &ReportSettings) -> Option<String> {
    if settings.stack_trace_format == StackTraceFormat::None {
        return None;
    }

    let failures = test_case.failures();
    if failures.is_empty() {
        return None;
    }

    let lines: Vec<_> = failures
        .iter()
        .map(|failure| {
            let description = if failure.sections.is_empty() {
                test_case.name.clone()
            } else {
                failure.sections.join(" / ")
            };
            let description = truncate(&description, settings.stack_trace_max_length);
            match failure.location() {
                Some(location) => match location.line {
                    Some(line) => format!("at {description} in {}:line {line}", location.filename),
                    None => format!("at {description} in {}", location.filename),
                },
                None => format!("at {description}"),
            }
        })
        .collect();
    Some(lines.join("\n"))
}

fn truncate(description: &str, max_length: usize) -> String {
    const ELLIPSIS: &str = "...";

    if description.chars().count() <= max_length {
        return description.to_owned();
    }
    if max_length <= ELLIPSIS.len() {
        return description.chars().take(max_length).collect();
    }
    let mut out: String = description
        .chars()
        .take(max_length - ELLIPSIS.len())
        .collect();
    out.push_str(ELLIPSIS);
    out
}
