// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front-end for [`catch2_output`].
//!
//! Reads the captured XML output of a Catch2 test binary, prints one line per test case and
//! optionally writes a JUnit report. Output that was cut off or surrounded by other text is
//! read on a best-effort basis.

#![warn(missing_docs)]

mod dispatch;
mod display;
mod errors;
mod exit_codes;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use exit_codes::*;
#[doc(hidden)]
pub use output::{Color, OutputContext, OutputWriter, StderrStyles};
