//! Bundled sample: a tree model, a suite that tests it, and the namespace to audit it against.
//!
//! `duck-test sample` runs this end to end.

pub mod subject;
pub mod suite;

use crate::coverage::Namespace;
use subject::{Branch, Empty, Leaf, Sapling};

/// The public members of [`subject`].
pub fn namespace() -> Namespace {
    Namespace::new("duck_test::sample::subject")
        .of_type::<Branch>()
        .of_type::<Empty>()
        .of_type::<Leaf>()
        .of_type::<Sapling>()
        .type_named("Tree")
        .function("nonsense")
        .data("DEFAULT_LEAF")
}

/// A fresh ledger with the sample suite registered.
pub fn ledger() -> crate::Ledger {
    let mut ledger = crate::Ledger::new();
    suite::register(&mut ledger);
    ledger
}
