// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    display::{RunStats, write_human, write_json},
    errors::{ExpectedError, Result},
    output::{OutputContext, OutputOpts, OutputWriter, clap_styles},
};
use camino::{Utf8Path, Utf8PathBuf};
use catch2_output::{Extraction, ReportSettings, RunOutput};
use clap::{Parser, ValueEnum};
use std::io::{Read, Write};
use tracing::{debug, info, warn};

static STDIN_PATH: &str = "-";

/// Extract test results from the captured XML output of a Catch2 test binary.
///
/// Output that was cut off by a crash or a timeout, or followed by extra text, is read on a
/// best-effort basis: every complete test case is reported, and a test case that was cut off is
/// reported as incomplete.
#[derive(Debug, Parser)]
#[command(
    name = "catch2-output",
    version,
    styles = clap_styles::style(),
    max_term_width = 100
)]
pub struct Catch2OutputApp {
    /// Captured output of the test binary, or `-` to read from stdin
    #[arg(value_name = "FILE", default_value = STDIN_PATH)]
    input: Utf8PathBuf,

    /// The test binary was killed after a timeout
    ///
    /// A test case that was cut off at the end of the output is then not reported, since it was
    /// still running when the binary was killed.
    #[arg(long)]
    timed_out: bool,

    /// Settings file with a `[report]` table
    #[arg(long, value_name = "PATH", env = "CATCH2_OUTPUT_SETTINGS")]
    settings: Option<Utf8PathBuf>,

    /// Also write a JUnit XML report to this path
    #[arg(long, value_name = "PATH")]
    junit: Option<Utf8PathBuf>,

    /// Name of the JUnit report and its test suite
    #[arg(long, value_name = "NAME", default_value = "catch2")]
    report_name: String,

    /// Format to print results in
    #[arg(long, value_enum, default_value_t, value_name = "FORMAT")]
    message_format: MessageFormatOpt,

    #[clap(flatten)]
    output: OutputOpts,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum MessageFormatOpt {
    /// One line per test case, followed by a summary
    #[default]
    Human,

    /// A single JSON document
    Json,
}

impl Catch2OutputApp {
    /// Initializes logging and returns the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let settings = match &self.settings {
            Some(path) => ReportSettings::from_path(path)?,
            None => ReportSettings::default(),
        };
        let xml = read_input(&self.input)?;

        let run_output = RunOutput::new(xml, self.timed_out, &settings);
        if let Extraction::Partial(reason) = run_output.extraction() {
            warn!(
                "{reason}: recovered {} test cases from partial output",
                run_output.test_results().len()
            );
        }

        if let Some(path) = &self.junit {
            run_output.write_junit(&self.report_name, path)?;
            info!("wrote JUnit report to {path}");
        }

        let stats = RunStats::new(&run_output);
        let mut writer = output_writer.stdout_writer();
        match self.message_format {
            MessageFormatOpt::Human => write_human(
                &run_output,
                &stats,
                &output.stdout_styles(),
                output.verbose,
                &mut writer,
            )
            .map_err(|error| ExpectedError::WriteOutputFailed { error })?,
            MessageFormatOpt::Json => {
                write_json(&run_output, &stats, &mut writer)
                    .map_err(|error| ExpectedError::JsonSerializeFailed { error })?;
                writeln!(writer).map_err(|error| ExpectedError::WriteOutputFailed { error })?;
            }
        }
        writer
            .flush()
            .map_err(|error| ExpectedError::WriteOutputFailed { error })?;

        Ok(stats.exit_code())
    }
}

fn read_input(path: &Utf8Path) -> Result<String> {
    let mut buf = Vec::new();
    if path == STDIN_PATH {
        debug!("reading input from stdin");
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|error| ExpectedError::InputReadFailed { path: None, error })?;
    } else {
        debug!("reading input from {path}");
        buf = std::fs::read(path).map_err(|error| ExpectedError::InputReadFailed {
            path: Some(path.to_owned()),
            error,
        })?;
    }

    // Test binaries can print arbitrary bytes, so invalid UTF-8 is replaced rather than rejected.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
