//! Outcome classification for a single test invocation.
//!
//! A test body runs inside a panic boundary. What escapes the boundary decides the outcome, first match wins:
//!
//! 1. Normal return (or `Ok(())`) is a success.
//! 2. An assertion-failure panic is a failure. Assertion failures are panics carrying an [`AssertionFailure`]
//!    payload (raised by `check!` and the [`testing`](crate::testing) helpers) or a std `assert!(cond)`,
//!    `assert_eq!` or `assert_ne!` panic. Only the message the caller wrote is kept; the generated text (the
//!    condition, `left`/`right` values) goes to the log.
//!
//!    `assert!(cond, "msg")` panics with the bare message, which is indistinguishable from `panic!("msg")`,
//!    so it lands in rule 3. Use `check!(cond, "msg")` for a failure with a message.
//! 3. Any other panic, or an `Err` returned by the body, is an error. The cause text is kept.

use std::any::Any;
use std::fmt;

use serde::Serialize;

/// Panic payload marking an assertion failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    pub message: Option<String>,
}

impl AssertionFailure {
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "assertion failed: {message}"),
            None => write!(f, "assertion failed"),
        }
    }
}

/// The classified result of one test invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure { message: Option<String> },
    Error { cause: String },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "PASSED",
            Outcome::Failure { .. } => "FAILED",
            Outcome::Error { .. } => "ERROR",
        }
    }
}

/// Format a failure entry: `name()` or `name(): message`.
pub fn describe_failure(name: &str, message: Option<&str>) -> String {
    match message {
        Some(message) => format!("{name}(): {message}"),
        None => format!("{name}()"),
    }
}

/// Return types a test body may have.
///
/// `()` always succeeds; `Result<(), E>` reports `Err` as an error with `E`'s display text as the cause.
pub trait TestReturn {
    fn into_result(self) -> Result<(), String>;
}

impl TestReturn for () {
    fn into_result(self) -> Result<(), String> {
        Ok(())
    }
}

impl<E: fmt::Display> TestReturn for Result<(), E> {
    fn into_result(self) -> Result<(), String> {
        self.map_err(|e| e.to_string())
    }
}

/// Classify a caught panic payload.
pub(crate) fn classify_panic(payload: Box<dyn Any + Send>) -> Outcome {
    let payload = match payload.downcast::<AssertionFailure>() {
        Ok(failure) => return Outcome::Failure { message: failure.message },
        Err(payload) => payload,
    };

    match panic_message(&*payload) {
        Some(text) if is_std_assertion(text) => {
            tracing::warn!(panic = text, "assertion failed");
            Outcome::Failure {
                message: std_assertion_message(text).map(str::to_string),
            }
        }
        Some(text) => Outcome::Error {
            cause: text.to_string(),
        },
        None => Outcome::Error {
            cause: "test panicked with a non-string payload".to_string(),
        },
    }
}

/// Text of a `&str` / `String` panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Some(s)
    } else {
        payload.downcast_ref::<String>().map(String::as_str)
    }
}

/// `assert!(cond)` panics with `assertion failed: cond`; `assert_eq!`/`assert_ne!` with
/// ``assertion `left == right` failed``.
fn is_std_assertion(text: &str) -> bool {
    text.starts_with("assertion failed") || text.starts_with("assertion `")
}

/// The caller's message in a std assertion panic, if any.
///
/// `assert_eq!(a, b, "msg")` panics with ``assertion `left == right` failed: msg`` followed by the
/// `left`/`right` lines. `assert!(cond)` never carries one.
fn std_assertion_message(text: &str) -> Option<&str> {
    if !text.starts_with("assertion `") {
        return None;
    }
    let first_line = text.lines().next()?;
    let (_, message) = first_line.split_once("` failed: ")?;
    Some(message).filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_failure() {
        assert_eq!(describe_failure("test_x", Some("boom")), "test_x(): boom");
        assert_eq!(describe_failure("test_x", None), "test_x()");
    }

    #[test]
    fn test_classify_assertion_payload() {
        let outcome = classify_panic(Box::new(AssertionFailure::new(Some("boom".into()))));
        assert_eq!(
            outcome,
            Outcome::Failure {
                message: Some("boom".into())
            }
        );
    }

    #[test]
    fn test_classify_std_assert_has_no_message() {
        let outcome = classify_panic(Box::new("assertion failed: 1 == 2"));
        assert_eq!(outcome, Outcome::Failure { message: None });

        let outcome = classify_panic(Box::new(String::from(
            "assertion `left == right` failed\n  left: 1\n right: 2",
        )));
        assert_eq!(outcome, Outcome::Failure { message: None });
    }

    #[test]
    fn test_classify_std_assert_eq_keeps_only_user_message() {
        let outcome = classify_panic(Box::new(String::from(
            "assertion `left == right` failed: boom\n  left: 1\n right: 2",
        )));
        assert_eq!(
            outcome,
            Outcome::Failure {
                message: Some("boom".into())
            }
        );

        let outcome = classify_panic(Box::new(String::from(
            "assertion `left != right` failed: same values\n  left: 3\n right: 3",
        )));
        assert_eq!(
            outcome,
            Outcome::Failure {
                message: Some("same values".into())
            }
        );
    }

    #[test]
    fn test_std_assertion_message() {
        assert_eq!(std_assertion_message("assertion failed: x > 0"), None);
        assert_eq!(std_assertion_message("assertion `left == right` failed\n  left: 1"), None);
        assert_eq!(
            std_assertion_message("assertion `left == right` failed: off by one\n  left: 1"),
            Some("off by one")
        );
    }

    #[test]
    fn test_classify_other_panic_is_error_with_cause() {
        let outcome = classify_panic(Box::new(String::from("not implemented: count")));
        assert_eq!(
            outcome,
            Outcome::Error {
                cause: "not implemented: count".into()
            }
        );
    }

    #[test]
    fn test_classify_opaque_payload() {
        let outcome = classify_panic(Box::new(42_u32));
        assert!(matches!(outcome, Outcome::Error { .. }));
    }

    #[test]
    fn test_result_return() {
        assert_eq!(().into_result(), Ok(()));
        let err: Result<(), String> = Err("bad input".into());
        assert_eq!(err.into_result(), Err("bad input".to_string()));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Success.label(), "PASSED");
        assert_eq!(Outcome::Failure { message: None }.label(), "FAILED");
        assert_eq!(Outcome::Error { cause: String::new() }.label(), "ERROR");
    }
}
