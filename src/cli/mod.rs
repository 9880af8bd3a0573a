//! CLI module for duck_test
//!
//! ## Commands
//!
//! - `sample` - Run the bundled sample suite and audit its claimed coverage
//! - `coverage` - Print claimed coverage for the sample suite without running it
//! - `list` - List the sample suite's tests in registration order
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::{ReportFormat, RunConfig};
use crate::error::HarnessError;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        // Render through miette so diagnostic codes and help text reach the user.
        let report = miette::Report::new(err);
        CliError::failure(format!("{report:?}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Declared-coverage test harness
#[derive(Parser, Debug)]
#[command(name = "duck-test")]
#[command(version = VERSION)]
#[command(about = "Run registered tests and report claimed coverage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Output options shared by the reporting commands
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Emit a JSON document instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Disable ANSI colors (also set by any non-empty `NO_COLOR`)
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_no_color)]
    pub no_color: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the bundled sample suite, then print claimed coverage and unclaimed members
    Sample {
        /// Verbose output (per-test status, timing, error causes)
        #[arg(short, long)]
        verbose: bool,
        /// Exit 0 even when tests fail or error
        #[arg(long = "no-strict")]
        no_strict: bool,
        /// Do not print panic messages from test bodies
        #[arg(short, long = "quiet-panics")]
        quiet_panics: bool,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print claimed coverage for the sample suite without running it
    Coverage {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the sample suite's tests in registration order
    List,
}

/// `NO_COLOR` disables color for any non-empty value, `0` included.
///
/// `false` is what clap substitutes when the flag is absent.
fn parse_no_color(value: &str) -> Result<bool, Infallible> {
    Ok(!value.is_empty() && value != "false")
}

impl OutputArgs {
    fn format(&self) -> ReportFormat {
        if self.json {
            ReportFormat::Json
        } else {
            ReportFormat::Console
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Sample {
            verbose,
            no_strict,
            quiet_panics,
            output,
        } => {
            let config = RunConfig::new()
                .with_verbose(verbose)
                .with_color(!output.no_color && output.output.is_none())
                .with_quiet_panics(quiet_panics)
                .with_strict_exit(!no_strict)
                .with_format(output.format());
            commands::run_sample(&config, output.output.as_deref())
        }
        Command::Coverage { output } => commands::print_coverage(output.format(), output.output.as_deref()),
        Command::List => commands::list_tests(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_sample() {
        let cli = Cli::try_parse_from(["duck-test", "sample", "-v", "--no-strict", "--json"]).unwrap();
        if let Command::Sample {
            verbose,
            no_strict,
            quiet_panics,
            output,
        } = cli.command
        {
            assert!(verbose);
            assert!(no_strict);
            assert!(!quiet_panics);
            assert!(output.json);
            assert_eq!(output.format(), ReportFormat::Json);
        } else {
            panic!("Expected Sample command");
        }
    }

    #[test]
    fn test_cli_parse_output_file() {
        let cli = Cli::try_parse_from(["duck-test", "coverage", "-o", "report.json", "--json"]).unwrap();
        if let Command::Coverage { output } = cli.command {
            assert_eq!(output.output.as_deref(), Some(std::path::Path::new("report.json")));
        } else {
            panic!("Expected Coverage command");
        }
    }

    #[test]
    fn test_no_color_accepts_any_non_empty_value() {
        assert!(parse_no_color("1").unwrap());
        assert!(parse_no_color("0").unwrap());
        assert!(parse_no_color("true").unwrap());
        assert!(!parse_no_color("").unwrap());
        assert!(!parse_no_color("false").unwrap());
    }

    #[test]
    fn test_cli_parse_no_color_flag() {
        let cli = Cli::try_parse_from(["duck-test", "coverage", "--no-color"]).unwrap();
        if let Command::Coverage { output } = cli.command {
            assert!(output.no_color);
        } else {
            panic!("Expected Coverage command");
        }
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::try_parse_from(["duck-test", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["duck-test"]).is_err());
    }

    #[test]
    fn test_harness_error_converts_to_failure() {
        let err: CliError = HarnessError::Io(std::io::Error::other("disk full")).into();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("disk full"));
    }
}
