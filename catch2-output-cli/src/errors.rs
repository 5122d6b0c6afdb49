// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    exit_codes::Catch2OutputExitCode,
    output::{NO_HEADING_TARGET, StderrStyles},
};
use camino::Utf8PathBuf;
use catch2_output::errors::{JunitWriteError, SettingsError};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are placeholders: errors are meant to be printed with
// display_to_stderr, which colorizes them and prints their sources.

/// An expected failure, reported to the user with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("failed to read input")]
    InputReadFailed {
        /// The input path, or `None` for stdin.
        path: Option<Utf8PathBuf>,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to load settings")]
    SettingsLoadFailed {
        #[from]
        error: SettingsError,
    },
    #[error("failed to write JUnit report")]
    JunitWriteFailed {
        #[from]
        error: JunitWriteError,
    },
    #[error("failed to serialize results")]
    JsonSerializeFailed {
        #[source]
        error: serde_json::Error,
    },
    #[error("failed to write results")]
    WriteOutputFailed {
        #[source]
        error: std::io::Error,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::InputReadFailed { .. } | Self::SettingsLoadFailed { .. } => {
                Catch2OutputExitCode::SETUP_ERROR
            }
            Self::JunitWriteFailed { .. }
            | Self::JsonSerializeFailed { .. }
            | Self::WriteOutputFailed { .. } => Catch2OutputExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::InputReadFailed { path, error } => {
                match path {
                    Some(path) => {
                        error!("failed to read input from `{}`", path.style(styles.bold))
                    }
                    None => error!("failed to read input from stdin"),
                }
                Some(error as &dyn Error)
            }
            Self::SettingsLoadFailed { error } => {
                error!("{error}");
                error.source()
            }
            Self::JunitWriteFailed { error } => {
                error!("{error}");
                error.source()
            }
            Self::JsonSerializeFailed { error } => {
                error!("failed to serialize results as JSON");
                Some(error as &dyn Error)
            }
            Self::WriteOutputFailed { error } => {
                error!("failed to write results to stdout");
                Some(error as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
