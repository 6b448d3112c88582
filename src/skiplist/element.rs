use core::fmt;

use crate::raw::{Arena, Handle, Node};

/// A stable reference to one entry of a [`Skiplist`](crate::Skiplist).
///
/// Returned by [`insert`](crate::Skiplist::insert) and [`set`](crate::Skiplist::set), and
/// accepted by [`remove_element`](crate::Skiplist::remove_element),
/// [`entry`](crate::Skiplist::entry) and friends. It stays valid until its entry is removed.
/// Using it after that is a logic error: the list panics, or if the slot has been reused,
/// resolves it to the entry that took its place.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ElementRef(pub(super) Handle);

/// A borrowed view of one entry of a [`Skiplist`](crate::Skiplist).
///
/// Elements can walk forward through the list with [`next`](Element::next), which takes
/// constant time per step.
///
/// # Examples
///
/// ```
/// use rank_skiplist::Skiplist;
///
/// let list = Skiplist::from([(2, "b"), (1, "a"), (3, "c")]);
///
/// let mut keys = Vec::new();
/// let mut element = list.front();
/// while let Some(e) = element {
///     keys.push(*e.key());
///     element = e.next();
/// }
/// assert_eq!(keys, [1, 2, 3]);
/// ```
pub struct Element<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    node: &'a Node<K, V>,
    handle: Handle,
}

impl<'a, K, V> Element<'a, K, V> {
    /// Resolves `handle` in `nodes`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` no longer refers to a stored node.
    pub(super) fn new(nodes: &'a Arena<Node<K, V>>, handle: Handle) -> Self {
        Element { nodes, node: nodes.get(handle), handle }
    }

    /// Returns the key of this entry.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.node.key()
    }

    /// Returns the value of this entry.
    #[must_use]
    pub fn value(&self) -> &'a V {
        self.node.value()
    }

    /// Returns a stable reference to this entry that outlives the borrow of the list.
    #[must_use]
    pub fn handle(&self) -> ElementRef {
        ElementRef(self.handle)
    }

    /// Returns the entry after this one in list order.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn next(&self) -> Option<Element<'a, K, V>> {
        self.node.next().map(|handle| Element::new(self.nodes, handle))
    }
}

impl<K, V> Clone for Element<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Element<'_, K, V> {}

impl<K, V> PartialEq for Element<'_, K, V> {
    /// Two elements are equal when they view the same entry of the same list.
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.nodes, other.nodes) && self.handle == other.handle
    }
}

impl<K, V> Eq for Element<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Element<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("key", self.key()).field("value", self.value()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Element<'_, K, V> {
    /// Formats the entry as `key:value`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key(), self.value())
    }
}
