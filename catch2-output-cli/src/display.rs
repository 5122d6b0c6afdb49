// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{exit_codes::Catch2OutputExitCode, output::StdoutStyles};
use catch2_output::{Extraction, OverallResults, RunOutput, TestOutcome, TestResult};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::{
    io::{self, Write},
    time::Duration,
};

/// Counts of test results by outcome.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct RunStats {
    pub(crate) total: usize,
    pub(crate) passed: usize,
    pub(crate) failed: usize,
    pub(crate) skipped: usize,
    pub(crate) incomplete: usize,
}

impl RunStats {
    pub(crate) fn new(output: &RunOutput) -> Self {
        let mut stats = Self::default();
        for result in output.test_results() {
            stats.total += 1;
            match result.outcome() {
                TestOutcome::Passed => stats.passed += 1,
                TestOutcome::Failed => stats.failed += 1,
                TestOutcome::Skipped => stats.skipped += 1,
                TestOutcome::Incomplete => stats.incomplete += 1,
            }
        }
        stats
    }

    pub(crate) fn exit_code(&self) -> i32 {
        if self.failed > 0 || self.incomplete > 0 {
            Catch2OutputExitCode::TEST_RUN_FAILED
        } else if self.total == 0 {
            Catch2OutputExitCode::NO_TESTS_RUN
        } else {
            Catch2OutputExitCode::OK
        }
    }
}

/// Writes one status line per test result, followed by a summary line.
pub(crate) fn write_human(
    output: &RunOutput,
    stats: &RunStats,
    styles: &StdoutStyles,
    verbose: bool,
    writer: &mut impl Write,
) -> io::Result<()> {
    for result in output.test_results() {
        let style = match result.outcome() {
            TestOutcome::Passed => styles.pass,
            TestOutcome::Failed => styles.fail,
            TestOutcome::Skipped => styles.skip,
            TestOutcome::Incomplete => styles.incomplete,
        };
        write!(writer, "{:>12} ", result.outcome().label().style(style))?;
        write_duration(result.duration(), writer)?;
        writeln!(writer, "{}", result.name().style(styles.name))?;

        if verbose {
            write_details(result, writer)?;
        }
    }

    write!(writer, "{:>12} ", "Summary".style(styles.count))?;
    write_duration(output.duration(), writer)?;
    let plural = if stats.total == 1 { "" } else { "s" };
    write!(
        writer,
        "{} test case{plural}: {} passed, {} failed, {} skipped",
        stats.total.style(styles.count),
        stats.passed.style(styles.pass),
        stats.failed.style(styles.fail),
        stats.skipped.style(styles.skip),
    )?;
    if stats.incomplete > 0 {
        write!(
            writer,
            ", {} incomplete",
            stats.incomplete.style(styles.incomplete)
        )?;
    }
    writeln!(writer)
}

fn write_duration(duration: Option<Duration>, writer: &mut impl Write) -> io::Result<()> {
    match duration {
        Some(duration) => write!(writer, "[{:>8.3}s] ", duration.as_secs_f64()),
        None => write!(writer, "[{:>9}] ", ""),
    }
}

fn write_details(result: &TestResult, writer: &mut impl Write) -> io::Result<()> {
    let details = match result.outcome() {
        TestOutcome::Failed | TestOutcome::Skipped => [
            result.error_message(),
            result.error_stack_trace(),
            result.standard_out(),
            result.standard_error(),
        ],
        TestOutcome::Incomplete => [Some("(output was cut off)"), None, None, None],
        TestOutcome::Passed => return Ok(()),
    };

    for text in details.into_iter().flatten() {
        for line in text.lines() {
            writeln!(writer, "{:>14}{line}", "")?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct JsonRunOutput<'a> {
    extraction: &'a Extraction,
    is_partial: bool,
    timed_out: bool,
    duration_secs: Option<f64>,
    stats: &'a RunStats,
    overall_results: Option<&'a OverallResults>,
    test_results: &'a [TestResult],
}

/// Writes the results as a single JSON document.
pub(crate) fn write_json(
    output: &RunOutput,
    stats: &RunStats,
    writer: &mut impl Write,
) -> serde_json::Result<()> {
    let document = JsonRunOutput {
        extraction: output.extraction(),
        is_partial: output.is_partial(),
        timed_out: output.timed_out(),
        duration_secs: output.duration().map(|duration| duration.as_secs_f64()),
        stats,
        overall_results: output.overall_results(),
        test_results: output.test_results(),
    };
    serde_json::to_writer_pretty(writer, &document)
}
