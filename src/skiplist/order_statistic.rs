use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::{Element, Skiplist};
use crate::Rank;
use crate::order::KeyOrder;

impl<K, V, O, R> Skiplist<K, V, O, R> {
    /// Returns the entry at position `rank` in list order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let list = Skiplist::from([("c", 3), ("a", 1), ("b", 2)]);
    ///
    /// let element = list.find_at(1).unwrap();
    /// assert_eq!((element.key(), element.value()), (&"b", &2));
    /// assert!(list.find_at(3).is_none());
    /// ```
    #[must_use]
    pub fn find_at(&self, rank: usize) -> Option<Element<'_, K, V>> {
        self.raw.handle_at(rank).map(|handle| Element::new(self.raw.nodes(), handle))
    }

    /// Returns the key-value pair at position `rank` in list order.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// list.insert("a", 10);
    /// list.insert("c", 30);
    /// list.insert("b", 20);
    ///
    /// assert_eq!(list.get_by_rank(1), Some((&"b", &20)));
    /// assert!(list.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.handle_at(rank)?);
        Some((node.key(), node.value()))
    }

    /// Returns the key and a mutable reference to the value at position `rank` in list order.
    ///
    /// The key is returned as a shared reference because mutating it could break the list
    /// order.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// list.insert(10, "a");
    /// list.insert(5, "b");
    ///
    /// if let Some((key, value)) = list.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(list.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.handle_at(rank)?;
        Some(self.raw.node_mut(handle).entry_mut())
    }

    /// Returns the rank of the youngest entry whose key equals `key`, or `None` if there is
    /// no such entry.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// list.insert(10, "a");
    /// list.insert(20, "b");
    /// list.insert(20, "c");
    ///
    /// assert_eq!(list.position_of(&20), Some(1));
    /// assert_eq!(list.position_of(&15), None);
    /// ```
    #[must_use]
    pub fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.admit(key);
        self.raw.find(key).map(|(_, rank)| rank)
    }
}

/// Indexes into the list by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rank_skiplist::{Rank, Skiplist};
///
/// let list = Skiplist::from([("b", 2), ("a", 1)]);
///
/// assert_eq!(list[Rank(0)], 1);
/// ```
impl<K, V, O, R> Index<Rank> for Skiplist<K, V, O, R> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the list by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rank_skiplist::{Rank, Skiplist};
///
/// let mut list = Skiplist::from([("a", 1), ("b", 2)]);
/// list[Rank(1)] = 5;
///
/// assert_eq!(list.get("b"), Some(&5));
/// ```
impl<K, V, O, R> IndexMut<Rank> for Skiplist<K, V, O, R> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
