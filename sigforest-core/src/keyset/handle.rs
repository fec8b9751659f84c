//! Lazily re-rooting component cursors.

use std::iter::FusedIterator;

use crate::{codec::KeyCodec, error::ReconstructionError};

use super::{ElementId, KeyedDisjointSet};

/// Cheap, copyable cursor naming one live component.
///
/// The handle remembers *some* element of its component, not necessarily the
/// root: merges may demote the element it was created from. Every
/// observation therefore resolves the anchor to the current root first, so a
/// handle stays meaningful across any number of later merges. The
/// past-the-end position is represented by `None`.
#[derive(Clone, Copy, Debug)]
pub struct ComponentHandle {
    anchor: ElementId,
}

impl ComponentHandle {
    pub(crate) const fn new(anchor: ElementId) -> Self {
        Self { anchor }
    }

    pub(crate) const fn anchor(self) -> ElementId {
        self.anchor
    }

    /// Returns the current root element of the component.
    #[must_use]
    pub fn root<C>(self, set: &KeyedDisjointSet<C>) -> ElementId {
        set.find(self.anchor)
    }

    /// Returns the number of items in the component.
    #[must_use]
    pub fn size<C>(self, set: &KeyedDisjointSet<C>) -> usize {
        set.element(self.root(set)).size
    }

    /// Returns the key of the component's preferred representative.
    #[must_use]
    pub fn representative_key<C>(self, set: &KeyedDisjointSet<C>) -> &str {
        let preferred = set.element(self.root(set)).preferred;
        set.key_of_element(preferred)
    }

    /// Reconstructs the component's preferred representative.
    ///
    /// # Errors
    /// Returns [`ReconstructionError`] when the representative's key is
    /// rejected by the codec. This is the first point at which a malformed
    /// key from a bulk load is noticed.
    pub fn representative<C: KeyCodec>(
        self,
        set: &KeyedDisjointSet<C>,
    ) -> Result<C::Item, ReconstructionError> {
        let key = self.representative_key(set);
        set.codec()
            .from_key(key)
            .map_err(|source| ReconstructionError::new(key, source))
    }

    /// Returns the next component in list order, or `None` past the end.
    #[must_use]
    pub fn next<C>(self, set: &KeyedDisjointSet<C>) -> Option<Self> {
        set.element(self.root(set)).next.map(Self::new)
    }

    /// Returns the previous component in list order, or `None` before the
    /// start.
    #[must_use]
    pub fn prev<C>(self, set: &KeyedDisjointSet<C>) -> Option<Self> {
        set.element(self.root(set)).prev.map(Self::new)
    }

    /// Returns whether both handles name the same component.
    #[must_use]
    pub fn same_component<C>(self, other: Self, set: &KeyedDisjointSet<C>) -> bool {
        self.root(set) == other.root(set)
    }
}

/// Iterator over the live components of a set, in list order.
#[derive(Debug)]
pub struct Components<'a, C> {
    set: &'a KeyedDisjointSet<C>,
    front: Option<ComponentHandle>,
    back: Option<ComponentHandle>,
    remaining: usize,
}

impl<'a, C> Components<'a, C> {
    pub(super) fn new(set: &'a KeyedDisjointSet<C>) -> Self {
        Self {
            set,
            front: set.components(),
            back: set.last_component(),
            remaining: set.component_count(),
        }
    }
}

impl<C> Iterator for Components<'_, C> {
    type Item = ComponentHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front?;
        self.remaining -= 1;
        self.front = current.next(self.set);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<C> DoubleEndedIterator for Components<'_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back?;
        self.remaining -= 1;
        self.back = current.prev(self.set);
        Some(current)
    }
}

impl<C> ExactSizeIterator for Components<'_, C> {}

impl<C> FusedIterator for Components<'_, C> {}
