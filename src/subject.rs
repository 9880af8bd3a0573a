//! Subjects: the functions and types a test claims to exercise.
//!
//! A subject is only a name plus a member kind. The harness never calls through a subject; it only counts
//! how many registrations named it (claimed coverage).

use std::fmt;

use serde::Serialize;

/// Kind of a namespace member.
///
/// Only [`MemberKind::Function`] and [`MemberKind::Type`] members take part in coverage audits; `Data`
/// members (constants, statics) are listed for completeness and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Function,
    Type,
    Data,
}

impl MemberKind {
    /// Whether members of this kind are audited for coverage.
    pub fn is_auditable(self) -> bool {
        matches!(self, MemberKind::Function | MemberKind::Type)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Function => write!(f, "function"),
            MemberKind::Type => write!(f, "type"),
            MemberKind::Data => write!(f, "data"),
        }
    }
}

/// A reference to a function or type under test, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectRef {
    name: String,
    kind: MemberKind,
}

impl SubjectRef {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Function,
        }
    }

    pub fn of_type(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Type,
        }
    }

    /// Subject for a type implementing [`Subject`].
    pub fn of<T: Subject>() -> Self {
        Self::of_type(T::NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A type that can be claimed as a test subject.
///
/// Usually derived with `#[derive(Subject)]`.
pub trait Subject {
    /// Stable name used as the coverage key.
    const NAME: &'static str;
}

/// The subjects a single registration claims.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Subjects {
    /// No coverage claim.
    #[default]
    None,
    Single(SubjectRef),
    /// Claims each element, in order. Repeated elements are claimed once per occurrence.
    Many(Vec<SubjectRef>),
}

impl Subjects {
    /// Iterate the claimed subjects in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SubjectRef> {
        let slice: &[SubjectRef] = match self {
            Subjects::None => &[],
            Subjects::Single(subject) => std::slice::from_ref(subject),
            Subjects::Many(subjects) => subjects,
        };
        slice.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl From<()> for Subjects {
    fn from(_: ()) -> Self {
        Subjects::None
    }
}

impl From<SubjectRef> for Subjects {
    fn from(subject: SubjectRef) -> Self {
        Subjects::Single(subject)
    }
}

impl From<Option<SubjectRef>> for Subjects {
    fn from(subject: Option<SubjectRef>) -> Self {
        subject.map_or(Subjects::None, Subjects::Single)
    }
}

impl From<Vec<SubjectRef>> for Subjects {
    fn from(subjects: Vec<SubjectRef>) -> Self {
        Subjects::Many(subjects)
    }
}

impl<const N: usize> From<[SubjectRef; N]> for Subjects {
    fn from(subjects: [SubjectRef; N]) -> Self {
        Subjects::Many(subjects.into())
    }
}

/// Build a [`SubjectRef`].
///
/// - `subject!(Branch)` for a type implementing [`Subject`]
/// - `subject!(fn nonsense)` for a function in scope (the path must resolve, so typos fail to compile)
///
/// ```
/// use duck_test::{subject, MemberKind};
///
/// fn leaf_fn() {}
///
/// let s = subject!(fn leaf_fn);
/// assert_eq!(s.name(), "leaf_fn");
/// assert_eq!(s.kind(), MemberKind::Function);
/// ```
#[macro_export]
macro_rules! subject {
    (fn $func:ident) => {{
        let _ = &$func;
        $crate::SubjectRef::function(stringify!($func))
    }};
    ($ty:ty) => {
        $crate::SubjectRef::of::<$ty>()
    };
}

/// Build a [`Subjects::Many`] from a list of `subject!` arguments.
///
/// ```
/// use duck_test::{subjects, Subject, Subjects};
///
/// struct A;
/// impl Subject for A {
///     const NAME: &'static str = "A";
/// }
/// fn leaf_fn() {}
///
/// let claimed = subjects![A, fn leaf_fn];
/// let names: Vec<_> = claimed.iter().map(|s| s.name()).collect();
/// assert_eq!(names, ["A", "leaf_fn"]);
/// # let _ = Subjects::None;
/// ```
#[macro_export]
macro_rules! subjects {
    () => {
        $crate::Subjects::Many(::std::vec::Vec::new())
    };
    ($($tail:tt)+) => {{
        let mut claimed = ::std::vec::Vec::new();
        $crate::__push_subjects!(claimed; $($tail)+);
        $crate::Subjects::Many(claimed)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __push_subjects {
    ($acc:ident;) => {};
    ($acc:ident; fn $func:ident $(, $($rest:tt)*)?) => {
        $acc.push($crate::subject!(fn $func));
        $crate::__push_subjects!($acc; $($($rest)*)?);
    };
    ($acc:ident; $ty:ty $(, $($rest:tt)*)?) => {
        $acc.push($crate::subject!($ty));
        $crate::__push_subjects!($acc; $($($rest)*)?);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    impl Subject for Alpha {
        const NAME: &'static str = "Alpha";
    }

    fn helper() {}

    #[test]
    fn test_subject_macro_type() {
        let s = subject!(Alpha);
        assert_eq!(s.name(), "Alpha");
        assert_eq!(s.kind(), MemberKind::Type);
    }

    #[test]
    fn test_subject_macro_fn() {
        let s = subject!(fn helper);
        assert_eq!(s.name(), "helper");
        assert_eq!(s.kind(), MemberKind::Function);
    }

    #[test]
    fn test_subjects_macro_mixed_order() {
        let claimed = subjects![Alpha, fn helper, Alpha];
        let names: Vec<_> = claimed.iter().map(SubjectRef::name).collect();
        assert_eq!(names, vec!["Alpha", "helper", "Alpha"]);
    }

    #[test]
    fn test_subjects_conversions() {
        assert_eq!(Subjects::from(()), Subjects::None);
        assert!(Subjects::from(()).is_empty());
        assert!(matches!(Subjects::from(subject!(Alpha)), Subjects::Single(_)));
        assert!(matches!(Subjects::from([subject!(Alpha)]), Subjects::Many(v) if v.len() == 1));
        assert_eq!(Subjects::from(None::<SubjectRef>), Subjects::None);
    }

    #[test]
    fn test_member_kind_auditable() {
        assert!(MemberKind::Function.is_auditable());
        assert!(MemberKind::Type.is_auditable());
        assert!(!MemberKind::Data.is_auditable());
    }
}
