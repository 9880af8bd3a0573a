//! Claimed coverage: recording subject claims and auditing a namespace for unclaimed members.
//!
//! Coverage here is declared, not traced. A member counts as covered as soon as any registration names it as
//! a subject, whether or not the test body ever calls it.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::subject::{MemberKind, Subject, SubjectRef};

/// Increment the claim count for `subject`, creating the entry on first claim.
pub fn record(counts: &mut IndexMap<String, usize>, subject: &SubjectRef) {
    *counts.entry(subject.name().to_string()).or_insert(0) += 1;
}

/// Auditable members of `namespace` with no claim in `counts`, in namespace order.
pub fn uncovered(counts: &IndexMap<String, usize>, namespace: &Namespace) -> Vec<String> {
    namespace
        .auditable_members()
        .filter(|(name, _)| !counts.contains_key(*name))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// An explicit listing of the members of a module under audit.
///
/// Members are kept sorted by name, so enumeration order does not depend on the order they were listed in.
/// Listing the same name twice keeps the last kind given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    members: BTreeMap<String, MemberKind>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member(mut self, name: impl Into<String>, kind: MemberKind) -> Self {
        self.members.insert(name.into(), kind);
        self
    }

    pub fn function(self, name: impl Into<String>) -> Self {
        self.member(name, MemberKind::Function)
    }

    /// Add a type member by its [`Subject`] name.
    pub fn of_type<T: Subject>(self) -> Self {
        self.member(T::NAME, MemberKind::Type)
    }

    /// Add a type member by name, for types that do not implement [`Subject`] (traits, foreign types).
    pub fn type_named(self, name: impl Into<String>) -> Self {
        self.member(name, MemberKind::Type)
    }

    /// Add a data member (constant or static). Data members are never audited.
    pub fn data(self, name: impl Into<String>) -> Self {
        self.member(name, MemberKind::Data)
    }

    /// All members, sorted by name.
    pub fn members(&self) -> impl Iterator<Item = (&str, MemberKind)> {
        self.members.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Function and type members, sorted by name.
    pub fn auditable_members(&self) -> impl Iterator<Item = (&str, MemberKind)> {
        self.members().filter(|(_, kind)| kind.is_auditable())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Snapshot of claimed coverage against one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub namespace: String,
    /// `(subject, claim count)` in first-claim order.
    pub claimed: Vec<(String, usize)>,
    pub uncovered: Vec<String>,
}

impl CoverageReport {
    pub fn new(counts: &IndexMap<String, usize>, namespace: &Namespace) -> Self {
        Self {
            namespace: namespace.name().to_string(),
            claimed: counts.iter().map(|(name, count)| (name.clone(), *count)).collect(),
            uncovered: uncovered(counts, namespace),
        }
    }

    pub fn claimed_names(&self) -> Vec<&str> {
        self.claimed.iter().map(|(name, _)| name.as_str()).collect()
    }
}
