// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort extraction of test cases from output that could not be parsed as a whole.

use crate::{
    format::{TEST_CASE_CLOSE_MARKER, TEST_CASE_OPEN_MARKER},
    salvage::salvage,
    settings::ReportSettings,
    test_result::TestResult,
};
use catch2_report::{Element, Reporter};
use tracing::debug;

/// Scans raw output for test-case records and parses each one on its own.
///
/// A record that fails to parse is dropped. An unclosed record at the end of the output is handed
/// to [`salvage`], after which scanning stops.
pub(crate) fn recover(
    raw: &str,
    timed_out: bool,
    reporter: &impl Reporter,
    settings: &ReportSettings,
) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = raw[cursor..].find(TEST_CASE_OPEN_MARKER) {
        let start = cursor + offset;
        let Some(len) = raw[start..].find(TEST_CASE_CLOSE_MARKER) else {
            results.extend(salvage(&raw[start..], timed_out));
            break;
        };

        let end = start + len + TEST_CASE_CLOSE_MARKER.len();
        results.extend(parse_fragment(&raw[start..end], start, reporter, settings));
        cursor = end;
    }

    debug!("recovery: found {} test cases", results.len());
    results
}

/// Parses a single `<TestCase ...>...</TestCase>` record.
fn parse_fragment(
    fragment: &str,
    offset: usize,
    reporter: &impl Reporter,
    settings: &ReportSettings,
) -> Option<TestResult> {
    let element = match Element::parse_document(fragment) {
        Ok(element) => element,
        Err(error) => {
            debug!("recovery: dropping malformed test case at byte {offset}: {error}");
            return None;
        }
    };

    match reporter.test_case(&element) {
        Ok(test_case) => Some(TestResult::from_test_case(test_case, settings)),
        Err(error) => {
            debug!("recovery: dropping invalid test case at byte {offset}: {error}");
            None
        }
    }
}
