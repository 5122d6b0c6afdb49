// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of test results from the captured output of a single test run.

use crate::{
    errors::DisplayErrorChain,
    format::{ReportFormat, trim_document},
    recovery::recover,
    settings::ReportSettings,
    strict::{StrictOutcome, parse_strict},
    test_result::TestResult,
};
use catch2_report::{OverallResults, Reporter, XmlReporter};
use serde::Serialize;
use std::{fmt, time::Duration};
use tracing::debug;

/// Test results extracted from the captured output of a Catch2 test binary.
///
/// Construction never fails. Output that can't be parsed as a complete report is scanned for
/// individual test-case records instead, and the result is marked as partial.
#[derive(Clone, Debug)]
pub struct RunOutput {
    xml: String,
    timed_out: bool,
    extraction: Extraction,
    duration: Option<Duration>,
    overall_results: Option<OverallResults>,
    test_results: Vec<TestResult>,
}

impl RunOutput {
    /// Extracts test results from `xml` using the default [`XmlReporter`].
    ///
    /// `timed_out` should be true if the test binary was killed after a timeout. In that case an
    /// unclosed test case at the end of the output is not reported.
    pub fn new(xml: impl Into<String>, timed_out: bool, settings: &ReportSettings) -> Self {
        Self::with_reporter(xml, timed_out, settings, &XmlReporter)
    }

    /// Extracts test results from `xml`, converting records with the given reporter.
    pub fn with_reporter(
        xml: impl Into<String>,
        timed_out: bool,
        settings: &ReportSettings,
        reporter: &impl Reporter,
    ) -> Self {
        let xml = xml.into();
        let mut test_results = Vec::new();
        let mut overall_results = None;

        let mut state = ExtractionState::Start;
        let extraction = loop {
            debug!("extraction: {state:?}");
            state = match state {
                ExtractionState::Start => match ReportFormat::classify(&xml) {
                    ReportFormat::Unknown => {
                        ExtractionState::Recover(FallbackReason::UnrecognizedFormat)
                    }
                    ReportFormat::Version2 | ReportFormat::Version3 => ExtractionState::TryStrict,
                },
                ExtractionState::TryStrict => {
                    let cleaned = trim_document(&xml);
                    if cleaned.is_empty() {
                        ExtractionState::Recover(FallbackReason::BoundaryNotFound)
                    } else {
                        match parse_strict(cleaned, reporter, settings) {
                            Ok(StrictOutcome::Complete { results, overall }) => {
                                test_results = results;
                                overall_results = Some(overall);
                                ExtractionState::Done(Extraction::Complete)
                            }
                            Ok(StrictOutcome::NoTestCases) => {
                                ExtractionState::Done(Extraction::NoTestCases)
                            }
                            Err(error) => ExtractionState::Recover(FallbackReason::Structural(
                                DisplayErrorChain::new(&error).to_string(),
                            )),
                        }
                    }
                }
                ExtractionState::Recover(reason) => {
                    test_results = recover(&xml, timed_out, reporter, settings);
                    ExtractionState::Done(Extraction::Partial(reason))
                }
                ExtractionState::Done(extraction) => break extraction,
            };
        };

        let duration = test_results
            .iter()
            .filter_map(TestResult::duration)
            .reduce(Duration::saturating_add);

        Self {
            xml,
            timed_out,
            extraction,
            duration,
            overall_results,
            test_results,
        }
    }

    /// Returns the output that results were extracted from.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Returns true if the caller reported that the test binary timed out.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Returns true if the output could not be parsed as a complete report.
    pub fn is_partial(&self) -> bool {
        self.extraction.is_partial()
    }

    /// Returns how the results were extracted.
    pub fn extraction(&self) -> &Extraction {
        &self.extraction
    }

    /// Returns the sum of the durations of all test results, or `None` if no durations were
    /// reported.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Returns the run summary. This is only available if the output was a complete report.
    pub fn overall_results(&self) -> Option<&OverallResults> {
        self.overall_results.as_ref()
    }

    /// Returns the test results, in the order they appear in the output.
    pub fn test_results(&self) -> &[TestResult] {
        &self.test_results
    }

    /// Returns the first test result with the given name.
    pub fn find_test_result(&self, name: &str) -> Option<&TestResult> {
        self.test_results.iter().find(|result| result.name() == name)
    }
}

/// How test results were extracted from output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extraction {
    /// The output is a complete report and every record in it was read.
    Complete,

    /// The output is a complete report with no test cases, for example because a filter matched
    /// nothing.
    NoTestCases,

    /// The output could not be read as a complete report. Results were recovered by scanning
    /// for individual test-case records.
    Partial(FallbackReason),
}

impl Extraction {
    /// Returns true if results were recovered from incomplete output.
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }
}

/// Why the output could not be read as a complete report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackReason {
    /// Neither report format was recognized.
    UnrecognizedFormat,

    /// The report was never closed, usually because the test binary crashed or was killed.
    BoundaryNotFound,

    /// The report was closed but could not be parsed.
    Structural(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedFormat => f.write_str("output is not a recognized Catch2 XML report"),
            Self::BoundaryNotFound => f.write_str("report was not closed"),
            Self::Structural(message) => write!(f, "report could not be parsed: {message}"),
        }
    }
}

#[derive(Debug)]
enum ExtractionState {
    Start,
    TryStrict,
    Recover(FallbackReason),
    Done(Extraction),
}
