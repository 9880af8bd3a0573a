//! The sample suite: tests for [`super::subject`], registered against a caller-owned ledger.

use super::subject::{Branch, Empty, Leaf, Sapling, Tree};
use crate::{Ledger, check, test_case};

fn callee() {}

fn caller() {
    callee();
}

fn test_empty() {
    check!(Empty.count() == 0);
}

fn test_bare() {
    let bare_tree = Branch::new(Empty, Leaf::new("foo"));
    check!(bare_tree.count() == 1, "((),foo) -> 1");

    let bare_tree = Branch::new(Leaf::new("bar"), Empty);
    check!(bare_tree.count() == 1, "(foo, ()) -> 1");
}

fn test_small() {
    let min_tree = Branch::new(Leaf::new("foo"), Leaf::new("bar"));
    check!(min_tree.count() == 2);
}

fn test_deeper() {
    let min_tree = Branch::new(
        Branch::new(Leaf::new("a"), Empty),
        Branch::new(Leaf::new("b"), Leaf::new("c")),
    );
    check!(min_tree.count() == 3, "Should have three non-empty leaves");
}

fn test_sapling() {
    check!(Sapling.count() == 0);
}

/// Register the sample tests, in order.
pub fn register(ledger: &mut Ledger) {
    test_case!(ledger, fn caller);
    test_case!(ledger, fn test_empty);
    test_case!(ledger, fn test_bare);
    test_case!(ledger, [Branch, Leaf], fn test_small);
    test_case!(ledger, [Branch, Empty, Leaf], fn test_deeper);
    test_case!(ledger, [Sapling], fn test_sapling);
}
