//! Run reporting
//!
//! ## TestReporter Trait
//!
//! The runner drives a `TestReporter` so that output format is separate from execution. Two implementations
//! ship with the crate: [`ConsoleReporter`] (plain text) and [`JsonReporter`] (a single JSON document).
//!
//! Reporter I/O errors never abort a run; the runner logs them and carries on.

use std::io::{self, Write};
use std::time::Duration;

use serde::Serialize;

use crate::case::TestCase;
use crate::coverage::CoverageReport;
use crate::error::HarnessResult;
use crate::outcome::Outcome;
use crate::runner::Report;

// ============================================================================
// Test Reporter Trait
// ============================================================================

/// Receives run events, in order: collection, per-test start/complete, run complete, then coverage.
pub trait TestReporter {
    /// Called once the discovered tests are known
    fn on_collection_complete(&mut self, _test_count: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called before a test body runs
    fn on_test_start(&mut self, test: &TestCase) -> io::Result<()>;

    /// Called after a test body has been classified
    fn on_test_complete(&mut self, test: &TestCase, outcome: &Outcome, duration: Duration) -> io::Result<()>;

    /// Called when every discovered test has run
    fn on_run_complete(&mut self, report: &Report) -> io::Result<()>;

    /// Called with the claimed-coverage audit, when one is requested
    fn on_coverage(&mut self, _coverage: &CoverageReport) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Console
// ============================================================================

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Plain text reporter.
///
/// Prints `Testing <name>` per test, then a summary of successes, failures (with descriptions) and errors
/// (by name; verbose mode adds the cause).
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    verbose: bool,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, verbose: bool, color: bool) -> Self {
        Self { out, verbose, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_collection_complete(&mut self, test_count: usize) -> io::Result<()> {
        if test_count == 0 {
            writeln!(self.out, "No tests collected")?;
        }
        Ok(())
    }

    fn on_test_start(&mut self, test: &TestCase) -> io::Result<()> {
        if self.verbose {
            write!(self.out, "Testing {} ... ", test.name())?;
            self.out.flush()
        } else {
            writeln!(self.out, "Testing {}", test.name())
        }
    }

    fn on_test_complete(&mut self, _test: &TestCase, outcome: &Outcome, duration: Duration) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }

        let color = match outcome {
            Outcome::Success => GREEN,
            Outcome::Failure { .. } => RED,
            Outcome::Error { .. } => YELLOW,
        };
        let status = self.paint(color, outcome.label());
        writeln!(self.out, "{} ({}ms)", status, duration.as_millis())?;

        match outcome {
            Outcome::Failure { message: Some(message) } => writeln!(self.out, "    {message}"),
            Outcome::Error { cause } => writeln!(self.out, "    {cause}"),
            _ => Ok(()),
        }
    }

    fn on_run_complete(&mut self, report: &Report) -> io::Result<()> {
        let successes = self.paint(GREEN, &format!("** {} successes", report.successes.len()));
        writeln!(self.out, "{successes}")?;

        let failures = format!("** {} failures", report.failures.len());
        let failures = if report.failures.is_empty() {
            failures
        } else {
            self.paint(RED, &failures)
        };
        writeln!(self.out, "{failures}")?;
        for failure in &report.failures {
            writeln!(self.out, "{failure}")?;
        }

        let errors = format!("** {} other errors", report.errors.len());
        let errors = if report.errors.is_empty() {
            errors
        } else {
            self.paint(YELLOW, &errors)
        };
        writeln!(self.out, "{errors}")?;
        for error in &report.errors {
            if self.verbose {
                writeln!(self.out, "{}: {}", error.name, error.cause)?;
            } else {
                writeln!(self.out, "{}", error.name)?;
            }
        }

        if self.verbose {
            writeln!(self.out, "====== {} tests in {:.2}s ======", report.total, report.duration.as_secs_f64())?;
        }
        Ok(())
    }

    fn on_coverage(&mut self, coverage: &CoverageReport) -> io::Result<()> {
        writeln!(self.out, "Thoroughness: Found test cases for {:?}", coverage.claimed_names())?;
        writeln!(self.out, "Missing: {:?}", coverage.uncovered)
    }
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Debug, Serialize)]
struct TestRecord {
    name: String,
    #[serde(flatten)]
    outcome: Outcome,
    duration_ms: f64,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: usize,
    successes: usize,
    failures: usize,
    errors: usize,
}

#[derive(Debug, Default, Serialize)]
struct JsonDocument {
    tests: Vec<TestRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<CoverageReport>,
}

/// Collects events and writes one JSON document on [`JsonReporter::finish`].
pub struct JsonReporter<W: Write = io::Stdout> {
    out: W,
    pretty: bool,
    document: JsonDocument,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self {
            out,
            pretty,
            document: JsonDocument::default(),
        }
    }

    /// Write the document and hand back the writer.
    pub fn finish(mut self) -> HarnessResult<W> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &self.document)?;
        } else {
            serde_json::to_writer(&mut self.out, &self.document)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TestReporter for JsonReporter<W> {
    fn on_test_start(&mut self, _test: &TestCase) -> io::Result<()> {
        Ok(())
    }

    fn on_test_complete(&mut self, test: &TestCase, outcome: &Outcome, duration: Duration) -> io::Result<()> {
        self.document.tests.push(TestRecord {
            name: test.name().to_string(),
            outcome: outcome.clone(),
            duration_ms: duration.as_secs_f64() * 1000.0,
        });
        Ok(())
    }

    fn on_run_complete(&mut self, report: &Report) -> io::Result<()> {
        self.document.summary = Some(Summary {
            total: report.total,
            successes: report.successes.len(),
            failures: report.failures.len(),
            errors: report.errors.len(),
        });
        Ok(())
    }

    fn on_coverage(&mut self, coverage: &CoverageReport) -> io::Result<()> {
        self.document.coverage = Some(coverage.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ledger::ErrorRecord;

    fn report() -> Report {
        Report {
            total: 3,
            successes: vec!["test_ok".into()],
            failures: vec!["test_bad(): boom".into()],
            errors: vec![ErrorRecord {
                name: "test_err".into(),
                cause: "not implemented".into(),
            }],
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_console_summary_plain() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false, false);
        reporter.on_run_complete(&report()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "** 1 successes\n** 1 failures\ntest_bad(): boom\n** 1 other errors\ntest_err\n"
        );
    }

    #[test]
    fn test_console_verbose_shows_error_cause() {
        let mut reporter = ConsoleReporter::new(Vec::new(), true, false);
        reporter.on_run_complete(&report()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("test_err: not implemented"));
        assert!(text.contains("3 tests in"));
    }

    #[test]
    fn test_console_color_wraps_counts() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false, true);
        reporter.on_run_complete(&report()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("\x1b[32m** 1 successes\x1b[0m"));
    }

    #[test]
    fn test_console_empty_collection() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false, false);
        reporter.on_collection_complete(0).unwrap();
        assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(), "No tests collected\n");
    }

    #[test]
    fn test_json_document_shape() {
        let mut reporter = JsonReporter::new(Vec::new(), false);
        reporter.on_run_complete(&report()).unwrap();
        let bytes = reporter.finish().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["summary"]["failures"], 1);
        assert!(value.get("coverage").is_none());
    }
}
