#![forbid(unsafe_code)]
//! duck_test: a small test-registration and reporting harness
//!
//! Ordinary functions are registered as test cases against a caller-owned [`Ledger`], run in registration
//! order behind a panic boundary, and classified as success, assertion failure or error. Each registration
//! may claim the functions and types it exercises; the ledger can then report which members of a
//! [`Namespace`] no test claimed (declared coverage, not traced coverage).
//!
//! ```
//! use duck_test::{Ledger, Namespace, RunConfig, Runner, Subject, ConsoleReporter, check, test_case};
//!
//! #[derive(Subject)]
//! struct A;
//! #[derive(Subject)]
//! struct B;
//!
//! fn test_zero() {
//!     check!(0 == 0);
//! }
//!
//! fn test_pair() {
//!     check!(false, "boom");
//! }
//!
//! let mut ledger = Ledger::new();
//! test_case!(ledger, fn test_zero);
//! test_case!(ledger, [A, B], fn test_pair);
//!
//! let mut reporter = ConsoleReporter::new(Vec::new(), false, false);
//! let report = Runner::new(RunConfig::default()).run(&mut ledger, &mut reporter);
//! assert_eq!(report.successes, ["test_zero"]);
//! assert_eq!(report.failures, ["test_pair(): boom"]);
//! assert_eq!(ledger.coverage(), ["A", "B"]);
//!
//! let namespace = Namespace::new("m").of_type::<A>().of_type::<B>().function("helper");
//! assert_eq!(ledger.uncovered(&namespace), ["helper"]);
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//! - **Test bodies**: panics are the assertion mechanism; the harness catches them.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

extern crate self as duck_test;

pub mod case;
pub mod cli;
pub mod config;
pub mod coverage;
pub mod error;
pub mod ledger;
pub mod outcome;
pub mod registrar;
pub mod reporter;
pub mod runner;
pub mod sample;
pub mod subject;
pub mod testing;

pub use case::TestCase;
pub use config::{ReportFormat, RunConfig};
pub use coverage::{CoverageReport, Namespace};
pub use error::{HarnessError, HarnessResult};
pub use ledger::{ErrorRecord, Ledger};
pub use outcome::{AssertionFailure, Outcome, TestReturn};
pub use registrar::Registrar;
pub use reporter::{ConsoleReporter, JsonReporter, TestReporter};
pub use runner::{Report, Runner, run_all, run_script};
pub use subject::{MemberKind, Subject, SubjectRef, Subjects};

pub use duck_test_derive::Subject;
