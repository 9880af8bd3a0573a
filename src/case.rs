//! The isolated execution wrapper around one test body.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::ledger::Ledger;
use crate::outcome::{Outcome, TestReturn, classify_panic};

type Body = dyn Fn() -> Result<(), String>;

/// A registered test: a named, zero-argument body behind a panic boundary.
///
/// Cloning is cheap; clones share the body.
#[derive(Clone)]
pub struct TestCase {
    name: Rc<str>,
    body: Rc<Body>,
}

impl TestCase {
    pub(crate) fn new<F, R>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: TestReturn,
    {
        let name: String = name.into();
        Self {
            name: name.into(),
            body: Rc::new(move || body().into_result()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the body and classify what happened, without recording anything.
    ///
    /// Panics inside the body never escape this call.
    pub fn execute(&self) -> Outcome {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.body)())) {
            Ok(Ok(())) => Outcome::Success,
            Ok(Err(cause)) => Outcome::Error { cause },
            Err(payload) => classify_panic(payload),
        }
    }

    /// Run the body and record exactly one outcome in `ledger`.
    ///
    /// Calling this more than once records one outcome per call.
    pub fn run(&self, ledger: &mut Ledger) -> Outcome {
        let outcome = self.execute();
        ledger.record(self.name(), &outcome);
        outcome
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish_non_exhaustive()
    }
}
