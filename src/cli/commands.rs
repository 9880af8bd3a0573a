//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::{ReportFormat, RunConfig};
use crate::coverage::CoverageReport;
use crate::error::HarnessError;
use crate::runner::{Report, Runner};
use crate::sample;

use super::{CliError, CliResult, ExitCode};

/// Open the report destination: a file when `output` is given, stdout otherwise.
fn open_output(output: Option<&Path>) -> CliResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::failure(format!("Cannot create report file '{}': {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Exit code for a finished run.
///
/// Non-strict runs always succeed; strict runs fail when any test failed or errored.
pub fn exit_code_for(report: &Report, config: &RunConfig) -> ExitCode {
    if config.strict_exit && !report.is_clean() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Run the sample suite and audit it against the sample namespace.
pub fn run_sample(config: &RunConfig, output: Option<&Path>) -> CliResult<ExitCode> {
    let mut ledger = sample::ledger();
    let namespace = sample::namespace();

    let out = open_output(output)?;
    let report = Runner::new(config.clone()).run_script(&mut ledger, &namespace, out)?;

    if let Some(path) = output {
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(exit_code_for(&report, config))
}

/// Print claimed coverage for the sample suite without running any test.
pub fn print_coverage(format: ReportFormat, output: Option<&Path>) -> CliResult<ExitCode> {
    let ledger = sample::ledger();
    let coverage = CoverageReport::new(ledger.coverage_counts(), &sample::namespace());

    let mut out = open_output(output)?;
    match format {
        ReportFormat::Console => {
            for (name, count) in &coverage.claimed {
                writeln!(out, "{name}: {count}").map_err(HarnessError::from)?;
            }
            writeln!(out, "Missing: {:?}", coverage.uncovered).map_err(HarnessError::from)?;
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &coverage).map_err(HarnessError::from)?;
            writeln!(out).map_err(HarnessError::from)?;
        }
    }
    out.flush().map_err(HarnessError::from)?;
    Ok(ExitCode::SUCCESS)
}

/// List the sample suite's tests in registration order.
pub fn list_tests() -> CliResult<ExitCode> {
    let ledger = sample::ledger();
    let mut out = io::stdout().lock();
    for case in ledger.discovered() {
        writeln!(out, "{}", case.name()).map_err(HarnessError::from)?;
    }
    writeln!(out, "{} test(s)", ledger.discovered().len()).map_err(HarnessError::from)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ledger::ErrorRecord;

    fn report(clean: bool) -> Report {
        Report {
            total: 1,
            successes: if clean { vec!["t".into()] } else { Vec::new() },
            failures: Vec::new(),
            errors: if clean {
                Vec::new()
            } else {
                vec![ErrorRecord {
                    name: "t".into(),
                    cause: "boom".into(),
                }]
            },
            duration: std::time::Duration::ZERO,
        }
    }

    #[test]
    fn test_strict_exit_fails_on_errors() {
        let config = RunConfig::default();
        assert_eq!(exit_code_for(&report(false), &config), ExitCode::FAILURE);
        assert_eq!(exit_code_for(&report(true), &config), ExitCode::SUCCESS);
    }

    #[test]
    fn test_non_strict_exit_always_succeeds() {
        let config = RunConfig::default().with_strict_exit(false);
        assert_eq!(exit_code_for(&report(false), &config), ExitCode::SUCCESS);
    }

    #[test]
    fn test_open_output_reports_bad_path() {
        let err = open_output(Some(Path::new("/nonexistent-dir/for/duck-test/report.json"))).err().unwrap();
        assert!(err.message.contains("Cannot create report file"));
    }
}
