// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by catch2-output.

use crate::format::ReportFormat;
use camino::Utf8PathBuf;
use catch2_report::{ReportParseError, XmlParseError};
use std::{error::Error, fmt};
use thiserror::Error;

/// An error that aborts the strict parse of a cleaned document.
///
/// This never escapes [`RunOutput`](crate::RunOutput) construction: it routes extraction to
/// partial recovery and is recorded in
/// [`FallbackReason::Structural`](crate::FallbackReason::Structural).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrictParseError {
    /// Neither report format was recognized in the cleaned text.
    #[error("output is not a recognized Catch2 XML report")]
    UnrecognizedFormat,

    /// The cleaned text is not a well-formed document.
    #[error("output is not a well-formed document")]
    Xml(#[from] XmlParseError),

    /// The root element does not match the detected format.
    #[error("expected root element `{expected}` for {format} output, found `{found}`")]
    UnexpectedRoot {
        /// The detected format.
        format: ReportFormat,

        /// The root element expected for that format.
        expected: &'static str,

        /// The root element that was found.
        found: String,
    },

    /// Version 2 output without a result group.
    #[error("`Catch` element has no `Group` child")]
    MissingGroup,

    /// A test case could not be read.
    #[error("failed to read test case {index}")]
    TestCase {
        /// The zero-based index of the test case in the group.
        index: usize,

        /// The underlying error.
        #[source]
        error: ReportParseError,
    },

    /// The run summary could not be read.
    #[error("failed to read run summary")]
    Summary(#[source] ReportParseError),
}

/// An error that occurs while loading [`ReportSettings`](crate::ReportSettings).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// The settings file was requested explicitly but does not exist.
    #[error("settings file not found at `{path}`")]
    FileNotFound {
        /// The path that was searched.
        path: Utf8PathBuf,
    },

    /// The settings file could not be read.
    #[error("failed to read settings file at `{path}`")]
    Read {
        /// The path to the settings file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The settings file is not valid.
    #[error("failed to parse settings file at `{path}`")]
    Parse {
        /// The path to the settings file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: toml::de::Error,
    },
}

/// An error that occurs while writing a JUnit report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JunitWriteError {
    /// The report file could not be created.
    #[error("failed to create JUnit report at `{path}`")]
    Create {
        /// The path to the report.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The report could not be serialized.
    #[error("failed to serialize JUnit report to `{path}`")]
    Serialize {
        /// The path to the report.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: quick_junit::SerializeError,
    },
}

/// Displays an error along with its chain of sources, separated by `: `.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        let mut source = self.error.source();
        while let Some(error) = source {
            write!(f, ": {error}")?;
            source = error.source();
        }
        Ok(())
    }
}
