// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of elements into Catch2 records.

use crate::{
    errors::ReportParseError,
    model::{OverallResults, TestCase},
    node::Element,
};

/// Converts structured nodes into Catch2 records.
///
/// Consumers that extract results from test output are generic over this trait, so the way
/// individual records are interpreted can be substituted without touching the extraction logic.
pub trait Reporter {
    /// Converts a `TestCase` element into a test-case record.
    fn test_case(&self, node: &Element) -> Result<TestCase, ReportParseError>;

    /// Reads the run summary from a result group.
    ///
    /// The group is `Catch/Group` for version 2 output and the `Catch2TestRun` root for
    /// version 3 output.
    fn overall_results(&self, group: &Element) -> Result<OverallResults, ReportParseError>;
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn test_case(&self, node: &Element) -> Result<TestCase, ReportParseError> {
        (**self).test_case(node)
    }

    fn overall_results(&self, group: &Element) -> Result<OverallResults, ReportParseError> {
        (**self).overall_results(group)
    }
}

/// The default [`Reporter`], which reads records as the Catch2 XML reporter writes them.
#[derive(Copy, Clone, Debug, Default)]
pub struct XmlReporter;

impl Reporter for XmlReporter {
    fn test_case(&self, node: &Element) -> Result<TestCase, ReportParseError> {
        TestCase::from_element(node)
    }

    fn overall_results(&self, group: &Element) -> Result<OverallResults, ReportParseError> {
        OverallResults::from_group(group)
    }
}
