//! Harness-level errors.
//!
//! Test outcomes are never errors at this level; a failing or erroring test is recorded in the ledger and the
//! run carries on. These cover the reporting surface around a run.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("failed to serialize report: {0}")]
    #[diagnostic(code(duck_test::report::serialize))]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    #[diagnostic(code(duck_test::report::io), help("check that the output path is writable"))]
    Io(#[from] std::io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
