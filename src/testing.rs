//! Assertion helpers for test bodies.
//!
//! These raise the same panic-based signal as `assert!`, but with an [`AssertionFailure`] payload so the
//! harness can tell an assertion failure apart from any other panic, with or without a message.

use std::fmt::Debug;
use std::panic;

use crate::outcome::AssertionFailure;

/// Raise an assertion failure with an optional message.
///
/// # Panics
///
/// Always panics with an [`AssertionFailure`] payload.
#[cold]
#[track_caller]
pub fn fail_assertion(message: Option<String>) -> ! {
    panic::panic_any(AssertionFailure::new(message))
}

/// Assert that a condition is true.
///
/// # Panics
///
/// Panics if `condition` is false.
#[track_caller]
pub fn assert(condition: bool) {
    if !condition {
        fail_assertion(None);
    }
}

/// Assert that two values are equal.
///
/// # Panics
///
/// Panics if `left != right`.
#[track_caller]
pub fn assert_eq<T: PartialEq + Debug>(left: T, right: T) {
    if left != right {
        fail_assertion(Some(format!("left != right\n  left:  {left:?}\n  right: {right:?}")));
    }
}

/// Assert that two values are not equal.
///
/// # Panics
///
/// Panics if `left == right`.
#[track_caller]
pub fn assert_ne<T: PartialEq + Debug>(left: T, right: T) {
    if left == right {
        fail_assertion(Some(format!("left == right\n  left:  {left:?}\n  right: {right:?}")));
    }
}

/// Explicitly fail a test with a message.
///
/// # Panics
///
/// Always panics with the provided `msg`.
#[track_caller]
pub fn fail(msg: impl Into<String>) -> ! {
    fail_assertion(Some(msg.into()))
}

/// `check!(cond)` / `check!(cond, "format", args...)`: fail the current test when `cond` is false.
///
/// The message, when given, ends up in the failure entry as `name(): message`.
///
/// ```
/// use duck_test::{Ledger, check};
///
/// let mut ledger = Ledger::new();
/// let case = ledger.test_case(()).register("test_boom", || check!(1 + 1 == 3, "boom"));
/// case.run(&mut ledger);
/// assert_eq!(ledger.failures(), ["test_boom(): boom"]);
/// ```
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::testing::fail_assertion(::std::option::Option::None);
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::testing::fail_assertion(::std::option::Option::Some(::std::format!($($arg)+)));
        }
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::panic::catch_unwind;

    use super::*;

    fn payload_of(f: impl FnOnce() + panic::UnwindSafe) -> AssertionFailure {
        let payload = catch_unwind(f).unwrap_err();
        *payload.downcast::<AssertionFailure>().unwrap()
    }

    #[test]
    fn test_assert_passes() {
        assert(true);
        assert_eq(1, 1);
        assert_ne("a", "b");
    }

    #[test]
    fn test_assert_without_message() {
        assert_eq!(payload_of(|| assert(false)).message, None);
    }

    #[test]
    fn test_assert_eq_message_shows_both_sides() {
        let message = payload_of(|| assert_eq(1, 2)).message.unwrap();
        assert!(message.contains("left:  1"));
        assert!(message.contains("right: 2"));
    }

    #[test]
    fn test_fail_message() {
        let failure = payload_of(|| {
            fail("nope");
        });
        assert_eq!(failure.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_check_macro() {
        assert_eq!(payload_of(|| check!(false)).message, None);
        assert_eq!(
            payload_of(|| check!(2 > 3, "{} > {}", 2, 3)).message.as_deref(),
            Some("2 > 3")
        );
    }
}
