//! A small tree model used as the subject of the bundled sample suite.

use std::any::type_name;

use crate::Subject;

/// Label given to leaves built with [`Leaf::default`].
pub const DEFAULT_LEAF: &str = "leaf";

/// Anything that can count its non-empty leaves.
pub trait Tree {
    /// Number of non-empty leaves.
    ///
    /// # Panics
    ///
    /// The default body panics: every tree shape must provide its own count.
    fn count(&self) -> usize {
        let full = type_name::<Self>();
        let short = full.rsplit("::").next().unwrap_or(full);
        unimplemented!("No implementation of count in {short}")
    }
}

#[derive(Subject)]
pub struct Branch {
    pub left: Box<dyn Tree>,
    pub right: Box<dyn Tree>,
}

impl Branch {
    pub fn new(left: impl Tree + 'static, right: impl Tree + 'static) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Tree for Branch {
    fn count(&self) -> usize {
        self.left.count() + self.right.count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subject)]
pub struct Leaf {
    pub value: String,
}

impl Leaf {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

impl Default for Leaf {
    fn default() -> Self {
        Self::new(DEFAULT_LEAF)
    }
}

impl Tree for Leaf {
    fn count(&self) -> usize {
        1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subject)]
pub struct Empty;

impl Tree for Empty {
    fn count(&self) -> usize {
        0
    }
}

/// A tree shape that never got its own `count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subject)]
pub struct Sapling;

impl Tree for Sapling {}

/// Deliberately left without tests.
pub fn nonsense() {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::panic::catch_unwind;

    use super::*;
    use crate::outcome::panic_message;

    #[test]
    fn test_counts() {
        assert_eq!(Empty.count(), 0);
        assert_eq!(Leaf::new("a").count(), 1);
        let tree = Branch::new(Branch::new(Leaf::new("a"), Empty), Branch::new(Leaf::new("b"), Leaf::new("c")));
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn test_default_count_names_the_type() {
        let payload = catch_unwind(|| Sapling.count()).unwrap_err();
        let message = panic_message(&*payload).unwrap();
        assert!(message.ends_with("No implementation of count in Sapling"), "{message}");
    }

    #[test]
    fn test_subject_names() {
        assert_eq!(Branch::NAME, "Branch");
        assert_eq!(Sapling::NAME, "Sapling");
    }

    #[test]
    fn test_default_leaf() {
        assert_eq!(Leaf::default().value, DEFAULT_LEAF);
    }
}
