#![forbid(unsafe_code)]

//! Immutable, ordered item storage.
//!
//! An [`ItemIndex`] maps logical positions `0..N-1` to the display sources the
//! host loaded at construction. Indices are assigned here, so they are always
//! contiguous; the sequence never changes after construction.

use std::ops::Index;

/// A single loaded carousel item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<S> {
    index: usize,
    source: S,
}

impl<S> Item<S> {
    /// Logical position of this item.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The opaque display handle supplied by the host.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}

/// Ordered, immutable sequence of [`Item`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIndex<S> {
    items: Vec<Item<S>>,
}

impl<S> ItemIndex<S> {
    /// Build an index from display sources, in order.
    #[must_use]
    pub fn new(sources: impl IntoIterator<Item = S>) -> Self {
        let items = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| Item { index, source })
            .collect();
        Self { items }
    }

    /// Number of items (N).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the index holds no items. A carousel over an empty index is inert.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item<S>> {
        self.items.get(index)
    }

    /// Last valid index, or `None` when empty.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }

    /// Iterate items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item<S>> {
        self.items.iter()
    }
}

impl<S> Default for ItemIndex<S> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<S> FromIterator<S> for ItemIndex<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S> From<Vec<S>> for ItemIndex<S> {
    fn from(sources: Vec<S>) -> Self {
        Self::new(sources)
    }
}

impl<S> Index<usize> for ItemIndex<S> {
    type Output = Item<S>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a, S> IntoIterator for &'a ItemIndex<S> {
    type Item = &'a Item<S>;
    type IntoIter = std::slice::Iter<'a, Item<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
