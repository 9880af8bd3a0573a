//! Running a suite.
//!
//! The runner invokes every discovered test exactly once, in registration order. A failing or erroring test
//! never stops the run.

use std::io::{self, Write};
use std::panic;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::case::TestCase;
use crate::config::{ReportFormat, RunConfig};
use crate::coverage::{CoverageReport, Namespace};
use crate::error::HarnessResult;
use crate::ledger::{ErrorRecord, Ledger};
use crate::reporter::{ConsoleReporter, JsonReporter, TestReporter};

/// Outcomes of one `run_all` call.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Number of discovered tests that were run.
    pub total: usize,
    pub successes: Vec<String>,
    /// `name()` or `name(): message` entries.
    pub failures: Vec<String>,
    pub errors: Vec<ErrorRecord>,
    #[serde(skip)]
    pub duration: Duration,
}

impl Report {
    /// No failures and no errors.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.errors.is_empty()
    }

    pub fn error_names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.name.as_str()).collect()
    }

    /// Slice out the outcomes recorded after `mark`.
    fn since(ledger: &Ledger, mark: Mark, total: usize, duration: Duration) -> Self {
        Self {
            total,
            successes: ledger.successes()[mark.successes..].to_vec(),
            failures: ledger.failures()[mark.failures..].to_vec(),
            errors: ledger.errors()[mark.errors..].to_vec(),
            duration,
        }
    }
}

/// Ledger outcome list lengths at the start of a run.
#[derive(Debug, Clone, Copy)]
struct Mark {
    successes: usize,
    failures: usize,
    errors: usize,
}

impl Mark {
    fn of(ledger: &Ledger) -> Self {
        Self {
            successes: ledger.successes().len(),
            failures: ledger.failures().len(),
            errors: ledger.errors().len(),
        }
    }
}

type PanicHook = Box<dyn Fn(&panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Process-wide quiet-hook state: how many guards are live, and the hook to restore after the last one.
struct QuietState {
    depth: usize,
    previous: Option<PanicHook>,
}

static QUIET_STATE: Mutex<QuietState> = Mutex::new(QuietState {
    depth: 0,
    previous: None,
});

fn quiet_state() -> MutexGuard<'static, QuietState> {
    QUIET_STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the panic hook with one that only traces while at least one guard is alive.
///
/// The first guard saves the current hook and the last one to drop restores it, so overlapping runs on
/// different threads can drop their guards in any order.
struct QuietPanics;

impl QuietPanics {
    fn install() -> Self {
        let mut state = quiet_state();
        if state.depth == 0 {
            state.previous = Some(panic::take_hook());
            panic::set_hook(Box::new(|info| {
                tracing::trace!(%info, "panic in test body");
            }));
        }
        state.depth += 1;
        QuietPanics
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        let mut state = quiet_state();
        state.depth = state.depth.saturating_sub(1);
        if state.depth == 0 {
            if let Some(previous) = state.previous.take() {
                panic::set_hook(previous);
            }
        }
    }
}

fn log_reporter_error(result: io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "reporter failed to write");
    }
}

/// Runs a ledger's discovered tests.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run every discovered test once, in order, and report the outcomes of this run.
    #[tracing::instrument(skip_all, fields(tests = ledger.discovered().len()))]
    pub fn run(&self, ledger: &mut Ledger, reporter: &mut dyn TestReporter) -> Report {
        let _quiet = self.config.quiet_panics.then(QuietPanics::install);

        let cases: Vec<TestCase> = ledger.discovered().to_vec();
        let mark = Mark::of(ledger);
        let start = Instant::now();

        log_reporter_error(reporter.on_collection_complete(cases.len()));
        for case in &cases {
            log_reporter_error(reporter.on_test_start(case));
            tracing::debug!(test = case.name(), "running");
            let started = Instant::now();
            let outcome = case.run(ledger);
            log_reporter_error(reporter.on_test_complete(case, &outcome, started.elapsed()));
        }

        let report = Report::since(ledger, mark, cases.len(), start.elapsed());
        tracing::info!(
            successes = report.successes.len(),
            failures = report.failures.len(),
            errors = report.errors.len(),
            "run complete"
        );
        log_reporter_error(reporter.on_run_complete(&report));
        report
    }

    /// Run the suite, then audit claimed coverage against `namespace`, writing everything to `out` in the
    /// configured format.
    pub fn run_script<W: Write>(&self, ledger: &mut Ledger, namespace: &Namespace, out: W) -> HarnessResult<Report> {
        match self.config.format {
            ReportFormat::Console => {
                let mut reporter = ConsoleReporter::new(out, self.config.verbose, self.config.color);
                let report = self.run(ledger, &mut reporter);
                reporter.on_coverage(&CoverageReport::new(ledger.coverage_counts(), namespace))?;
                reporter.into_inner().flush()?;
                Ok(report)
            }
            ReportFormat::Json => {
                let mut reporter = JsonReporter::new(out, self.config.verbose);
                let report = self.run(ledger, &mut reporter);
                reporter.on_coverage(&CoverageReport::new(ledger.coverage_counts(), namespace))?;
                reporter.finish()?;
                Ok(report)
            }
        }
    }
}

/// Run every discovered test with the default configuration.
pub fn run_all(ledger: &mut Ledger, reporter: &mut dyn TestReporter) -> Report {
    Runner::default().run(ledger, reporter)
}

/// Script mode: run all tests, print the summary, claimed coverage and unclaimed members to stdout.
pub fn run_script(ledger: &mut Ledger, namespace: &Namespace, config: &RunConfig) -> HarnessResult<Report> {
    Runner::new(config.clone()).run_script(ledger, namespace, io::stdout().lock())
}
