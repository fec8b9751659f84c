//! Arena nodes of the disjoint-set forest.

use std::{cell::Cell, fmt, sync::Arc};

/// Stable identifier of an element inside a [`crate::KeyedDisjointSet`].
///
/// Elements are never removed, so an id handed out by a set stays valid for
/// the lifetime of that set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena position of the element, which is also its
    /// insertion rank.
    ///
    /// # Examples
    /// ```
    /// use sigforest_core::{KeyCodec, KeyedDisjointSet};
    /// # struct Plain;
    /// # impl KeyCodec for Plain {
    /// #     type Item = String;
    /// #     type Error = std::convert::Infallible;
    /// #     fn key_of(&self, item: &String) -> String { item.clone() }
    /// #     fn from_key(&self, key: &str) -> Result<String, Self::Error> { Ok(key.to_owned()) }
    /// # }
    ///
    /// let mut set = KeyedDisjointSet::new(Plain);
    /// let first = set.resolve_or_insert(&"a".to_owned());
    /// let second = set.resolve_or_insert(&"b".to_owned());
    /// assert_eq!((first.index(), second.index()), (0, 1));
    /// ```
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A forest node.
///
/// `rank`, `size`, `prev`, `next` and `preferred` are only meaningful while
/// the element is a root. `parent` sits in a [`Cell`] so root resolution can
/// compress paths through a shared borrow.
#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub(crate) key: Arc<str>,
    pub(crate) parent: Cell<Option<ElementId>>,
    pub(crate) rank: u32,
    pub(crate) size: usize,
    pub(crate) prev: Option<ElementId>,
    pub(crate) next: Option<ElementId>,
    pub(crate) preferred: ElementId,
}

impl Element {
    /// Builds a singleton root that prefers itself.
    pub(crate) fn singleton(id: ElementId, key: Arc<str>, prev: Option<ElementId>) -> Self {
        Self {
            key,
            parent: Cell::new(None),
            rank: 0,
            size: 1,
            prev,
            next: None,
            preferred: id,
        }
    }

    pub(crate) fn is_root(&self) -> bool {
        self.parent.get().is_none()
    }
}
