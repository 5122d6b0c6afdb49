// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `catch2-output`.
///
/// Unknown or unexpected failures always result in exit code 1.
pub enum Catch2OutputExitCode {}

impl Catch2OutputExitCode {
    /// Every extracted test case passed or was skipped.
    pub const OK: i32 = 0;

    /// No test cases were found in the output, but no other errors occurred.
    pub const NO_TESTS_RUN: i32 = 4;

    /// A user issue happened while setting up, such as an unreadable input or settings file.
    pub const SETUP_ERROR: i32 = 96;

    /// One or more test cases failed or were cut off.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// Writing results to stdout or to a report file produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
