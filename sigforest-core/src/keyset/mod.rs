//! Keyed disjoint-set forest with ordered component enumeration.
//!
//! Items are identified by the canonical keys their [`KeyCodec`] derives.
//! Every distinct key owns one arena element; elements are grouped into
//! components by a union-find forest (full path compression, union by rank).
//! The roots of all live components are additionally threaded into a
//! doubly-linked list so callers can walk the components in a stable order
//! while merging them.
//!
//! Merging decouples three choices that plain union-find conflates:
//!
//! - which root survives is picked purely by rank, for balance;
//! - the merged component always takes the list slot of the *first* argument;
//! - the merged component's representative is whichever side the caller
//!   prefers.

mod element;
mod handle;
mod items;
mod load;


use std::{collections::BTreeMap, sync::Arc};

use tracing::trace;

use crate::codec::KeyCodec;

pub use self::{
    element::ElementId,
    handle::{ComponentHandle, Components},
    items::{Items, Keys},
};

use self::element::Element;

const MEMORY_SOURCE: &str = "memory";

/// Union-find over canonically keyed items.
///
/// See the [module documentation](self) for the merge semantics.
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
/// set.extend_keys(["A", "B", "C"]);
/// assert!(set.merge_keys("A", "B", true));
/// assert_eq!(set.component_count(), 2);
///
/// let first = set.components().expect("set is not empty");
/// assert_eq!(first.representative_key(&set), "A");
/// assert_eq!(first.size(&set), 2);
/// ```
#[derive(Clone, Debug)]
pub struct KeyedDisjointSet<C> {
    codec: C,
    name: Arc<str>,
    index: BTreeMap<Arc<str>, ElementId>,
    elements: Vec<Element>,
    component_count: usize,
    head: Option<ElementId>,
    tail: Option<ElementId>,
}

impl<C> KeyedDisjointSet<C> {
    /// Creates an empty set named `"memory"`.
    #[must_use]
    pub fn new(codec: C) -> Self {
        Self::with_name(codec, MEMORY_SOURCE)
    }

    /// Creates an empty set with a descriptive name used in diagnostics.
    #[must_use]
    pub fn with_name(codec: C, name: impl Into<Arc<str>>) -> Self {
        Self {
            codec,
            name: name.into(),
            index: BTreeMap::new(),
            elements: Vec::new(),
            component_count: 0,
            head: None,
            tail: None,
        }
    }

    /// Returns the name given to the set or its bulk source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the codec used to derive and reconstruct keys.
    #[must_use]
    pub const fn codec(&self) -> &C {
        &self.codec
    }

    /// Returns the number of distinct items ever inserted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether no item has been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of live components.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.component_count
    }

    /// Looks up the element holding `key`, without inserting it.
    #[must_use]
    pub fn element_id(&self, key: &str) -> Option<ElementId> {
        self.index.get(key).copied()
    }

    /// Returns the key stored for `id`.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this set.
    #[must_use]
    pub fn key_of_element(&self, id: ElementId) -> &str {
        &self.element(id).key
    }

    /// Inserts `key` as a new singleton component unless it is already
    /// present, returning its element either way.
    ///
    /// The key is stored verbatim; it is neither validated nor reconstructed.
    pub fn insert_key(&mut self, key: impl Into<Arc<str>>) -> ElementId {
        let key = key.into();
        if let Some(&existing) = self.index.get(&key) {
            return existing;
        }

        let id = ElementId::new(self.elements.len());
        self.elements
            .push(Element::singleton(id, Arc::clone(&key), self.tail));
        match self.tail {
            Some(tail) => self.element_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.index.insert(key, id);
        self.component_count += 1;
        id
    }

    /// Inserts every key from `keys` as in [`Self::insert_key`], preserving
    /// their order as the list order of the new components.
    ///
    /// Returns how many keys were new.
    pub fn extend_keys<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Arc<str>>,
    {
        let before = self.len();
        for key in keys {
            self.insert_key(key);
        }
        self.len() - before
    }

    /// Resolves `id` to the root of its component, compressing the path.
    ///
    /// Every element visited on the way is re-parented directly onto the
    /// root. A root resolves to itself.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this set.
    #[must_use]
    pub fn find(&self, id: ElementId) -> ElementId {
        if self.element(id).is_root() {
            return id;
        }
        let mut root = id;
        while let Some(parent) = self.element(root).parent.get() {
            root = parent;
        }

        let mut node = id;
        while let Some(parent) = self.element(node).parent.get() {
            if parent != root {
                self.element(node).parent.set(Some(root));
            }
            node = parent;
        }

        root
    }

    /// Merges the components holding keys `first` and `second`, inserting
    /// either key first if it is unseen.
    ///
    /// Semantics match [`Self::merge`].
    pub fn merge_keys(
        &mut self,
        first: impl Into<Arc<str>>,
        second: impl Into<Arc<str>>,
        prefer_first: bool,
    ) -> bool {
        let first = self.insert_key(first);
        let second = self.insert_key(second);
        self.merge_elements(first, second, prefer_first)
    }

    /// Returns a handle on the first live component in list order.
    #[must_use]
    pub fn components(&self) -> Option<ComponentHandle> {
        self.head.map(ComponentHandle::new)
    }

    /// Returns a handle on the last live component in list order.
    #[must_use]
    pub fn last_component(&self) -> Option<ComponentHandle> {
        self.tail.map(ComponentHandle::new)
    }

    /// Iterates the live components in list order.
    ///
    /// The iterator borrows the set, so it suits read-only enumeration. Use
    /// [`Self::components`] and [`ComponentHandle::next`] to merge while
    /// walking.
    #[must_use]
    pub fn iter_components(&self) -> Components<'_, C> {
        Components::new(self)
    }

    /// Compares two possibly past-the-end handles.
    ///
    /// Live handles are equal when they resolve to the same root; `None` is
    /// only equal to `None`.
    #[must_use]
    pub fn handles_equal(
        &self,
        left: Option<ComponentHandle>,
        right: Option<ComponentHandle>,
    ) -> bool {
        match (left, right) {
            (Some(left), Some(right)) => left.same_component(right, self),
            (None, None) => true,
            _ => false,
        }
    }

    /// Iterates every stored key in lexicographic order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self.index.keys())
    }

    fn merge_elements(&mut self, first: ElementId, second: ElementId, prefer_first: bool) -> bool {
        let first_root = self.find(first);
        let second_root = self.find(second);
        if first_root == second_root {
            return false;
        }

        let preferred = if prefer_first {
            self.element(first_root).preferred
        } else {
            self.element(second_root).preferred
        };
        let merged_size = self.element(first_root).size + self.element(second_root).size;
        let first_rank = self.element(first_root).rank;
        let second_rank = self.element(second_root).rank;

        let (survivor, absorbed) = if first_rank > second_rank {
            (first_root, second_root)
        } else {
            if first_rank == second_rank {
                let rank = &mut self.element_mut(second_root).rank;
                *rank = rank.saturating_add(1);
            }
            (second_root, first_root)
        };

        self.unlink(second_root);
        if survivor == second_root {
            self.take_slot(first_root, second_root);
        }

        self.element(absorbed).parent.set(Some(survivor));
        let root = self.element_mut(survivor);
        root.size = merged_size;
        root.preferred = preferred;
        self.component_count -= 1;

        trace!(
            survivor = %survivor,
            absorbed = %absorbed,
            size = merged_size,
            components = self.component_count,
            "merged components"
        );
        true
    }

    /// Removes the root `id` from the component list.
    fn unlink(&mut self, id: ElementId) {
        let (prev, next) = {
            let element = self.element_mut(id);
            (element.prev.take(), element.next.take())
        };
        match prev {
            Some(prev) => self.element_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.element_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Moves the unlinked root `heir` into the list slot held by `holder`,
    /// leaving `holder` out of the list.
    fn take_slot(&mut self, holder: ElementId, heir: ElementId) {
        let (prev, next) = {
            let element = self.element_mut(holder);
            (element.prev.take(), element.next.take())
        };
        match prev {
            Some(prev) => self.element_mut(prev).next = Some(heir),
            None => self.head = Some(heir),
        }
        match next {
            Some(next) => self.element_mut(next).prev = Some(heir),
            None => self.tail = Some(heir),
        }
        let element = self.element_mut(heir);
        element.prev = prev;
        element.next = next;
    }

    fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.index()]
    }
}

impl<C: KeyCodec> KeyedDisjointSet<C> {
    /// Returns the element for `item`, inserting it as a new singleton
    /// component when its key has not been seen before.
    pub fn resolve_or_insert(&mut self, item: &C::Item) -> ElementId {
        let key = self.codec.key_of(item);
        self.insert_key(key)
    }

    /// Merges the components containing `first` and `second`.
    ///
    /// Unseen items are inserted first. Returns `false`, changing nothing,
    /// when both items already share a component. Otherwise the merged
    /// component occupies the list slot previously held by `first`'s
    /// component and carries `first`'s representative when `prefer_first` is
    /// set, or `second`'s otherwise.
    pub fn merge(&mut self, first: &C::Item, second: &C::Item, prefer_first: bool) -> bool {
        let first = self.resolve_or_insert(first);
        let second = self.resolve_or_insert(second);
        self.merge_elements(first, second, prefer_first)
    }

    /// Variant of [`Self::merge`] whose first side is an existing component.
    ///
    /// Skips key derivation and lookup for that side.
    pub fn merge_component(
        &mut self,
        component: ComponentHandle,
        item: &C::Item,
        prefer_first: bool,
    ) -> bool {
        let second = self.resolve_or_insert(item);
        self.merge_elements(component.anchor(), second, prefer_first)
    }

    /// Iterates every stored item in key order, reconstructing each one.
    ///
    /// Ignores the component structure entirely.
    #[must_use]
    pub fn items(&self) -> Items<'_, C> {
        Items::new(&self.codec, self.index.keys())
    }
}
