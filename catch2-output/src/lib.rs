// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Best-effort extraction of test results from the XML output of Catch2 test binaries.
//!
//! Test binaries don't always produce a complete report: they crash, get killed after a timeout,
//! or print more text after the report is closed. [`RunOutput`] reads as much as it can from
//! whatever was captured:
//!
//! 1. The report format is detected and anything after the closing root tag is cut off.
//! 2. The cleaned report is parsed as a whole.
//! 3. If that fails, the raw output is scanned for individual `<TestCase>` records, and a record
//!    that was cut off is reported as incomplete.
//!
//! ```
//! use catch2_output::{ReportSettings, RunOutput, TestOutcome};
//!
//! let xml = r#"<Catch2TestRun name="tests">
//!   <TestCase name="adds">
//!     <OverallResult success="true"/>
//!   </TestCase>
//!   <TestCase name="divides">
//! "#;
//! let output = RunOutput::new(xml, false, &ReportSettings::default());
//! assert!(output.is_partial());
//! assert_eq!(
//!     output.find_test_result("divides").map(|result| result.outcome()),
//!     Some(TestOutcome::Incomplete),
//! );
//! ```

pub mod errors;
mod format;
mod junit;
mod output;
mod recovery;
mod salvage;
mod settings;
mod strict;
mod test_result;

pub use catch2_report::{OverallResults, Reporter, TestCase, XmlReporter};
pub use format::*;
pub use output::*;
pub use settings::*;
pub use test_result::*;
