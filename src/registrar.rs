//! Test registration.
//!
//! Registration wraps a zero-argument body in a [`TestCase`], appends it to the ledger's discovered list and
//! records the claimed subjects. It never fails.

use crate::case::TestCase;
use crate::ledger::Ledger;
use crate::outcome::TestReturn;
use crate::subject::Subjects;

/// A pending registration, created by [`Ledger::test_case`].
pub struct Registrar<'a> {
    ledger: &'a mut Ledger,
    subjects: Subjects,
}

impl<'a> Registrar<'a> {
    pub(crate) fn new(ledger: &'a mut Ledger, subjects: Subjects) -> Self {
        Self { ledger, subjects }
    }

    /// Register `body` under `name` and return its wrapper.
    ///
    /// Names are not deduplicated: registering the same name twice yields two independent tests.
    pub fn register<F, R>(self, name: impl Into<String>, body: F) -> TestCase
    where
        F: Fn() -> R + 'static,
        R: TestReturn,
    {
        let case = TestCase::new(name, body);

        if self.ledger.discovered().iter().any(|t| t.name() == case.name()) {
            tracing::warn!(test = case.name(), "a test with this name is already registered");
        }

        self.ledger.push_discovered(case.clone());
        for subject in self.subjects.iter() {
            self.ledger.claim(subject);
        }

        tracing::trace!(
            test = case.name(),
            subjects = self.subjects.iter().count(),
            "registered test"
        );
        case
    }
}

/// Register a test function by name.
///
/// - `test_case!(ledger, fn test_empty)` claims nothing
/// - `test_case!(ledger, [Branch, Leaf], fn test_small)` claims each listed subject (see [`subjects!`](crate::subjects))
/// - `test_case!(ledger, subject!(Leaf), fn test_leaf)` claims any `impl Into<Subjects>` expression
///
/// ```
/// use duck_test::{Ledger, Subject, check, test_case};
///
/// struct Leaf;
/// impl Subject for Leaf {
///     const NAME: &'static str = "Leaf";
/// }
///
/// fn test_leaf() {
///     check!(1 == 1);
/// }
///
/// let mut ledger = Ledger::new();
/// test_case!(ledger, [Leaf], fn test_leaf);
/// assert_eq!(ledger.discovered()[0].name(), "test_leaf");
/// assert_eq!(ledger.coverage(), ["Leaf"]);
/// ```
#[macro_export]
macro_rules! test_case {
    ($ledger:expr, fn $test:ident $(,)?) => {
        $ledger.test_case(()).register(stringify!($test), $test)
    };
    ($ledger:expr, [$($subjects:tt)*], fn $test:ident $(,)?) => {
        $ledger
            .test_case($crate::subjects![$($subjects)*])
            .register(stringify!($test), $test)
    };
    ($ledger:expr, $subjects:expr, fn $test:ident $(,)?) => {
        $ledger.test_case($subjects).register(stringify!($test), $test)
    };
}
