// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_result::TestResult;
use quick_xml::escape::unescape;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static TEST_CASE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^<TestCase name="([^"]*)""#).unwrap());

/// Recovers the name of a test case whose record was cut off.
///
/// Returns `None` if the run timed out: the record then belongs to the test that was running
/// when the process was killed, which neither passed nor failed.
pub(crate) fn salvage(tail: &str, timed_out: bool) -> Option<TestResult> {
    if timed_out {
        debug!("salvage: run timed out, discarding unclosed test case");
        return None;
    }

    let Some(captures) = TEST_CASE_NAME_REGEX.captures(tail) else {
        debug!("salvage: no test case name in unclosed record");
        return None;
    };
    let raw_name = captures.get(1).map_or("", |m| m.as_str());
    let name = match unescape(raw_name) {
        Ok(name) => name.into_owned(),
        Err(error) => {
            debug!("salvage: keeping raw name {raw_name:?}: {error}");
            raw_name.to_owned()
        }
    };

    debug!("salvage: recovered unclosed test case {name:?}");
    Some(TestResult::incomplete(name, tail))
}
