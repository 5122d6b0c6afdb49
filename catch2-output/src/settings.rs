// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings that control how test results are described.
//!
//! Settings are read from the `[report]` table of a TOML file:
//!
//! ```toml
//! [report]
//! message-format = "stats-only"
//! stack-trace-format = "short-info"
//! stack-trace-max-length = 60
//! ```
//!
//! Extraction never looks at these settings. They are forwarded to
//! [`TestResult::from_test_case`](crate::TestResult::from_test_case).

use crate::errors::SettingsError;
use camino::Utf8Path;
use serde::Deserialize;
use std::{collections::BTreeSet, io};
use tracing::{debug, warn};

/// How error messages are built for failed test cases.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MessageFormat {
    /// No error message.
    None,

    /// Only a line with assertion counts.
    StatsOnly,

    /// Assertion counts followed by a description of every failure.
    #[default]
    AdditionalInfo,
}

/// How stack traces are built for failed test cases.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StackTraceFormat {
    /// No stack trace.
    None,

    /// One line per failure location.
    #[default]
    ShortInfo,
}

/// Settings forwarded to test result construction.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReportSettings {
    /// How error messages are built.
    pub message_format: MessageFormat,

    /// How stack traces are built.
    pub stack_trace_format: StackTraceFormat,

    /// The maximum number of characters used to describe a failure location in a stack trace.
    pub stack_trace_max_length: usize,
}

impl ReportSettings {
    /// The default value of [`Self::stack_trace_max_length`].
    pub const DEFAULT_STACK_TRACE_MAX_LENGTH: usize = 80;

    /// Loads settings from a TOML file.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_path(path: &Utf8Path) -> Result<Self, SettingsError> {
        Self::from_path_with_warnings(path, &mut DefaultSettingsWarnings)
    }

    fn from_path_with_warnings(
        path: &Utf8Path,
        warnings: &mut impl SettingsWarnings,
    ) -> Result<Self, SettingsError> {
        debug!("settings: loading from {path}");
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(SettingsError::FileNotFound {
                    path: path.to_owned(),
                });
            }
            Err(error) => {
                return Err(SettingsError::Read {
                    path: path.to_owned(),
                    error,
                });
            }
        };

        let (settings, unknown) =
            Self::deserialize_toml(&contents).map_err(|error| SettingsError::Parse {
                path: path.to_owned(),
                error,
            })?;
        if !unknown.is_empty() {
            warnings.unknown_settings_keys(path, &unknown);
        }

        debug!("settings: loaded from {path}: {settings:?}");
        Ok(settings)
    }

    /// Deserializes TOML content and returns the settings along with any unknown keys.
    fn deserialize_toml(contents: &str) -> Result<(Self, BTreeSet<String>), toml::de::Error> {
        let deserializer = toml::Deserializer::parse(contents)?;
        let mut unknown = BTreeSet::new();
        let file: DeserializedSettingsFile = serde_ignored::deserialize(deserializer, |path| {
            unknown.insert(path.to_string());
        })?;
        Ok((file.report, unknown))
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            message_format: MessageFormat::default(),
            stack_trace_format: StackTraceFormat::default(),
            stack_trace_max_length: Self::DEFAULT_STACK_TRACE_MAX_LENGTH,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct DeserializedSettingsFile {
    #[serde(default)]
    report: ReportSettings,
}

trait SettingsWarnings {
    fn unknown_settings_keys(&mut self, path: &Utf8Path, unknown: &BTreeSet<String>);
}

struct DefaultSettingsWarnings;

impl SettingsWarnings for DefaultSettingsWarnings {
    fn unknown_settings_keys(&mut self, path: &Utf8Path, unknown: &BTreeSet<String>) {
        let mut unknown_str = String::new();
        if let [key] = &unknown.iter().collect::<Vec<_>>()[..] {
            // Print this on the same line.
            unknown_str.push_str("key: ");
            unknown_str.push_str(key);
        } else {
            unknown_str.push_str("keys:\n");
            for key in unknown {
                unknown_str.push('\n');
                unknown_str.push_str("  - ");
                unknown_str.push_str(key);
            }
        }

        warn!("in settings file {path}, ignoring unknown configuration {unknown_str}");
    }
}
