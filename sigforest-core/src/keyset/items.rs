//! Whole-collection iteration over the key index.

use std::{collections::btree_map, iter::FusedIterator, sync::Arc};

use crate::{codec::KeyCodec, error::ReconstructionError};

/// Iterator over every stored key, in lexicographic order.
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    inner: btree_map::Keys<'a, Arc<str>, super::ElementId>,
}

impl<'a> Keys<'a> {
    pub(super) const fn new(inner: btree_map::Keys<'a, Arc<str>, super::ElementId>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|key| &**key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Keys<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|key| &**key)
    }
}

impl ExactSizeIterator for Keys<'_> {}

impl FusedIterator for Keys<'_> {}

/// Iterator reconstructing every stored item, in key order.
///
/// Each key is reconstructed only when the iterator reaches it, so a
/// malformed key yields an error for that position alone.
pub struct Items<'a, C> {
    codec: &'a C,
    keys: Keys<'a>,
}

impl<'a, C> Items<'a, C> {
    pub(super) const fn new(
        codec: &'a C,
        inner: btree_map::Keys<'a, Arc<str>, super::ElementId>,
    ) -> Self {
        Self {
            codec,
            keys: Keys::new(inner),
        }
    }
}

impl<C: KeyCodec> Items<'_, C> {
    fn reconstruct(&self, key: &str) -> Result<C::Item, ReconstructionError> {
        self.codec
            .from_key(key)
            .map_err(|source| ReconstructionError::new(key, source))
    }
}

impl<C: KeyCodec> Iterator for Items<'_, C> {
    type Item = Result<C::Item, ReconstructionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(self.reconstruct(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<C: KeyCodec> DoubleEndedIterator for Items<'_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        Some(self.reconstruct(key))
    }
}

impl<C: KeyCodec> ExactSizeIterator for Items<'_, C> {}

impl<C: KeyCodec> FusedIterator for Items<'_, C> {}
