// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report format detection and document boundary cleaning.

use serde::Serialize;
use std::fmt;

/// Opening marker of version 2 output.
pub const VERSION_2_ROOT_MARKER: &str = "<Catch name=";
/// Closing marker of version 2 output.
pub const VERSION_2_CLOSE_MARKER: &str = "</Catch>";
/// Opening marker of version 3 output.
pub const VERSION_3_ROOT_MARKER: &str = "<Catch2TestRun name=";
/// Closing marker of version 3 output.
pub const VERSION_3_CLOSE_MARKER: &str = "</Catch2TestRun>";
/// Opening marker of a test-case record, in either format.
pub const TEST_CASE_OPEN_MARKER: &str = "<TestCase ";
/// Closing marker of a test-case record, in either format.
pub const TEST_CASE_CLOSE_MARKER: &str = "</TestCase>";

/// The Catch2 XML report schema found in some output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Catch2 v2: `<Catch>` root with a nested `<Group>`.
    Version2,

    /// Catch2 v3: `<Catch2TestRun>` root.
    Version3,

    /// Neither root marker is present.
    Unknown,
}

impl ReportFormat {
    /// Classifies output by the root marker it contains.
    ///
    /// The version 2 marker is checked first, so text containing both markers is version 2.
    pub fn classify(text: &str) -> Self {
        if text.contains(VERSION_2_ROOT_MARKER) {
            Self::Version2
        } else if text.contains(VERSION_3_ROOT_MARKER) {
            Self::Version3
        } else {
            Self::Unknown
        }
    }

    /// Returns the opening marker of the root element for this format.
    pub fn root_marker(self) -> Option<&'static str> {
        match self {
            Self::Version2 => Some(VERSION_2_ROOT_MARKER),
            Self::Version3 => Some(VERSION_3_ROOT_MARKER),
            Self::Unknown => None,
        }
    }

    /// Returns the name of the root element for this format.
    pub fn root_element(self) -> Option<&'static str> {
        match self {
            Self::Version2 => Some("Catch"),
            Self::Version3 => Some("Catch2TestRun"),
            Self::Unknown => None,
        }
    }

    /// Returns the closing marker of the root element for this format.
    pub fn close_marker(self) -> Option<&'static str> {
        match self {
            Self::Version2 => Some(VERSION_2_CLOSE_MARKER),
            Self::Version3 => Some(VERSION_3_CLOSE_MARKER),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version2 => f.write_str("Catch2 v2"),
            Self::Version3 => f.write_str("Catch2 v3"),
            Self::Unknown => f.write_str("unrecognized"),
        }
    }
}

/// Returns `text` up to and including the first closing root marker.
///
/// Test binaries sometimes print more lines after the report is closed; those are cut off here.
/// Returns an empty string if the format is not recognized or the closing marker is missing,
/// which means no complete document is available.
pub fn trim_document(text: &str) -> &str {
    let Some(close_marker) = ReportFormat::classify(text).close_marker() else {
        return "";
    };
    match text.find(close_marker) {
        Some(index) => &text[..index + close_marker.len()],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(r#"<Catch name="t"><Group/></Catch>"#, ReportFormat::Version2 ; "version 2")]
    #[test_case(r#"<Catch2TestRun name="t"/>"#, ReportFormat::Version3 ; "version 3")]
    #[test_case(
        r#"<Catch2TestRun name="a"></Catch2TestRun><Catch name="b"></Catch>"#,
        ReportFormat::Version2
        ; "both markers prefer version 2"
    )]
    #[test_case(r#"<testsuites name="junit"/>"#, ReportFormat::Unknown ; "other xml")]
    #[test_case("<Catch>", ReportFormat::Unknown ; "root without name attribute")]
    #[test_case("", ReportFormat::Unknown ; "empty")]
    fn classify(input: &str, expected: ReportFormat) {
        let format = ReportFormat::classify(input);
        assert_eq!(format, expected);
        if let Some(marker) = format.root_marker() {
            assert!(input.contains(marker));
        }
    }

    #[test_case(
        "<Catch name=\"t\"><Group/></Catch>\nexit code 0\n</Catch>",
        "<Catch name=\"t\"><Group/></Catch>"
        ; "version 2 cuts after first close"
    )]
    #[test_case(
        "<Catch2TestRun name=\"t\"></Catch2TestRun>trailing",
        "<Catch2TestRun name=\"t\"></Catch2TestRun>"
        ; "version 3 cuts trailing text"
    )]
    #[test_case("<Catch2TestRun name=\"t\"><TestCase ", "" ; "missing close marker")]
    #[test_case("<TestCase name=\"a\"></TestCase>", "" ; "unrecognized")]
    fn trim(input: &str, expected: &str) {
        assert_eq!(trim_document(input), expected);
    }

    #[test_case("<Catch name=\"t\"><Group/></Catch>\nSegmentation fault" ; "version 2")]
    #[test_case("<?xml version=\"1.0\"?><Catch2TestRun name=\"t\"></Catch2TestRun>  " ; "version 3")]
    fn trim_is_idempotent(input: &str) {
        let once = trim_document(input);
        assert!(!once.is_empty());
        assert_eq!(trim_document(once), once);
    }
}
