//! The outcome ledger: discovered tests, classified outcomes, and claimed-coverage counts.
//!
//! A [`Ledger`] is owned by the caller and passed to registration, the runner and the coverage audit.
//! Independent suites use independent ledgers.

use indexmap::IndexMap;
use serde::Serialize;

use crate::case::TestCase;
use crate::coverage::{self, Namespace};
use crate::outcome::{Outcome, describe_failure};
use crate::registrar::Registrar;
use crate::subject::{SubjectRef, Subjects};

/// An error outcome: the test name plus the cause that escaped its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub name: String,
    pub cause: String,
}

/// Run state for one suite.
#[derive(Debug, Default)]
pub struct Ledger {
    discovered: Vec<TestCase>,
    successes: Vec<String>,
    failures: Vec<String>,
    errors: Vec<ErrorRecord>,
    coverage_counts: IndexMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all state: discovered tests, outcomes and coverage counts together.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start a registration claiming `subjects`.
    ///
    /// `subjects` is anything convertible into [`Subjects`]: `()`, a single [`SubjectRef`], a `Vec` or an
    /// array of them.
    pub fn test_case(&mut self, subjects: impl Into<Subjects>) -> Registrar<'_> {
        Registrar::new(self, subjects.into())
    }

    /// Tests in registration order.
    pub fn discovered(&self) -> &[TestCase] {
        &self.discovered
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Failure entries, formatted as `name()` or `name(): message`.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn error_names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.name.as_str()).collect()
    }

    /// Subject name to number of registrations claiming it, in first-claim order.
    pub fn coverage_counts(&self) -> &IndexMap<String, usize> {
        &self.coverage_counts
    }

    /// How many registrations claimed `name`.
    pub fn coverage_count(&self, name: &str) -> usize {
        self.coverage_counts.get(name).copied().unwrap_or(0)
    }

    /// Names of every subject claimed at least once, in first-claim order.
    pub fn coverage(&self) -> Vec<String> {
        self.coverage_counts.keys().cloned().collect()
    }

    /// Function and type members of `namespace` that no registration claimed.
    pub fn uncovered(&self, namespace: &Namespace) -> Vec<String> {
        coverage::uncovered(&self.coverage_counts, namespace)
    }

    /// Number of outcomes recorded so far, across all three lists.
    pub fn recorded(&self) -> usize {
        self.successes.len() + self.failures.len() + self.errors.len()
    }

    pub(crate) fn push_discovered(&mut self, case: TestCase) {
        self.discovered.push(case);
    }

    pub(crate) fn claim(&mut self, subject: &SubjectRef) {
        coverage::record(&mut self.coverage_counts, subject);
    }

    pub(crate) fn record(&mut self, name: &str, outcome: &Outcome) {
        match outcome {
            Outcome::Success => {
                tracing::debug!(test = name, "passed");
                self.successes.push(name.to_string());
            }
            Outcome::Failure { message } => {
                match message {
                    Some(message) => tracing::warn!(test = name, "{message}"),
                    None => tracing::warn!(test = name, "assertion failed"),
                }
                self.failures.push(describe_failure(name, message.as_deref()));
            }
            Outcome::Error { cause } => {
                tracing::debug!(test = name, cause = %cause, "errored");
                self.errors.push(ErrorRecord {
                    name: name.to_string(),
                    cause: cause.clone(),
                });
            }
        }
    }
}
