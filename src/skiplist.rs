use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::Error;
use crate::key::Key;
use crate::order::{Ascending, Descending, KeyOrder};
use crate::raw::RawSkiplist;

mod capacity;
mod element;
mod iter;
mod order_statistic;
mod visualize;

pub use crate::Rank;
pub use element::{Element, ElementRef};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use visualize::Visualize;

/// Seed of the level generator for constructors that do not take one.
pub const DEFAULT_SEED: u64 = 42;

/// An ordered multimap based on an indexable [skip list].
///
/// Entries are kept in key order under the list's [`KeyOrder`], which is chosen when the list
/// is built and never changes. Duplicate keys are allowed: [`insert`](Skiplist::insert) puts a
/// new entry in front of any entries with an equal key, so equal keys are kept youngest first,
/// while [`set`](Skiplist::set) replaces the youngest one.
///
/// Every link in the list records how many positions it skips, so entries can be reached by
/// rank (their zero-based position in list order) as fast as by key. Keys also project to a
/// monotonic `f64` score (see [`Key`](crate::Key)), and searches compare scores before
/// falling back to the key's `less` predicate.
///
/// Node heights come from a pseudo-random generator owned by the list, seeded with
/// [`DEFAULT_SEED`] unless another seed or generator is supplied. The same operations on a
/// list with the same seed always build the same structure.
///
/// It is a logic error for a key to be modified in such a way that its order relative to any
/// other key changes while it is in the list. The behavior resulting from such a logic error
/// is not specified, but will be encapsulated to the `Skiplist` that observed the logic error
/// and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rank_skiplist::Skiplist;
///
/// let mut scores = Skiplist::new();
/// scores.insert(87, "ann");
/// scores.insert(92, "bob");
/// scores.insert(87, "cid");
/// scores.insert(75, "dee");
///
/// // Equal keys are kept youngest first.
/// assert_eq!(scores.to_string(), "{75:dee 87:cid 87:ann 92:bob}");
/// assert_eq!(scores.get_all(&87), [&"cid", &"ann"]);
///
/// // Reach entries by rank...
/// assert_eq!(scores.get_by_rank(3), Some((&92, &"bob")));
///
/// // ...and ranks by key.
/// assert_eq!(scores.position_of(&92), Some(3));
///
/// // Removing by key takes the youngest entry.
/// assert_eq!(scores.remove(&87), Some((87, "cid")));
/// assert_eq!(scores.len(), 3);
/// ```
///
/// A `Skiplist` with a known list of entries can be initialized from an array:
///
/// ```
/// use rank_skiplist::Skiplist;
///
/// let planets = Skiplist::from([("Mercury", 0.4), ("Venus", 0.7), ("Earth", 1.0)]);
/// assert_eq!(planets.keys().copied().collect::<Vec<_>>(), ["Earth", "Mercury", "Venus"]);
/// ```
///
/// [skip list]: https://en.wikipedia.org/wiki/Skip_list
#[derive(Clone)]
pub struct Skiplist<K, V, O = Ascending, R = Xoshiro256PlusPlus> {
    raw: RawSkiplist<K, V, O, R>,
}

impl<K, V> Skiplist<K, V> {
    /// Makes a new, empty `Skiplist` sorted from least to greatest key.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    ///
    /// // entries can now be inserted into the empty list
    /// list.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Like [`new`](Skiplist::new), except the level generator is seeded with `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::with_seed(7);
    /// list.insert("k", "v");
    /// assert_eq!(list.get("k"), Some(&"v"));
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Skiplist::with_order_and_rng(Ascending, Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl<K, V> Skiplist<K, V, Descending> {
    /// Makes a new, empty `Skiplist` sorted from greatest to least key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::descending();
    /// list.insert(1, 1);
    /// list.insert(2, 2);
    /// list.insert(3, 3);
    ///
    /// assert_eq!(list.values().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn descending() -> Self {
        Skiplist::with_order(Descending)
    }
}

impl<K, V, O> Skiplist<K, V, O> {
    /// Makes a new, empty `Skiplist` bound to `order`, with the default seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::{ByOrd, Skiplist};
    ///
    /// // Tuples have no score, so order them by `Ord` alone.
    /// let mut list = Skiplist::with_order(ByOrd);
    /// list.insert((2, 'a'), ());
    /// list.insert((1, 'z'), ());
    /// assert_eq!(list.first_key_value(), Some((&(1, 'z'), &())));
    /// ```
    #[must_use]
    pub fn with_order(order: O) -> Self {
        Skiplist::with_order_and_rng(order, Xoshiro256PlusPlus::seed_from_u64(DEFAULT_SEED))
    }
}

impl<K, V, O, R> Skiplist<K, V, O, R> {
    /// Makes a new, empty `Skiplist` bound to `order` that draws node heights from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand_xoshiro::Xoshiro256PlusPlus;
    /// use rank_skiplist::{Ascending, Skiplist};
    ///
    /// let rng = Xoshiro256PlusPlus::seed_from_u64(1);
    /// let mut list = Skiplist::with_order_and_rng(Ascending, rng);
    /// list.insert(1, ());
    /// assert_eq!(list.len(), 1);
    /// ```
    #[must_use]
    pub fn with_order_and_rng(order: O, rng: R) -> Self {
        Skiplist {
            raw: RawSkiplist::new(order, rng),
        }
    }

    /// Returns the ordering this list is bound to.
    #[must_use]
    pub fn order(&self) -> &O {
        self.raw.order()
    }

    /// Returns the number of entries in the list.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut a = Skiplist::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// a.insert(1, "b");
    /// assert_eq!(a.len(), 2);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the list contains no entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the list, removing all entries.
    ///
    /// The ordering and the state of the level generator are kept.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut a = Skiplist::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first entry in list order.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let list = Skiplist::from([(3, "c"), (1, "a")]);
    /// assert_eq!(list.front().map(|e| *e.key()), Some(1));
    /// ```
    #[must_use]
    pub fn front(&self) -> Option<Element<'_, K, V>> {
        self.raw.first().map(|handle| Element::new(self.raw.nodes(), handle))
    }

    /// Returns the first key-value pair in list order.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// assert_eq!(list.first_key_value(), None);
    /// list.insert(1, "b");
    /// list.insert(2, "a");
    /// assert_eq!(list.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.first()?);
        Some((node.key(), node.value()))
    }

    /// Returns the last key-value pair in list order.
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
    /// list.insert(1, "b");
    /// list.insert(2, "a");
    /// assert_eq!(list.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((node.key(), node.value()))
    }

    /// Removes and returns the entry at position `rank` in list order.
    ///
    /// Returns `None` if `rank` is out of bounds.
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
    /// let mut list = Skiplist::from([(30, 3), (10, 1), (20, 2)]);
    /// assert_eq!(list.remove_at(0), Some((10, 1)));
    /// assert_eq!(list.remove_at(0), Some((20, 2)));
    /// assert_eq!(list.remove_at(0), Some((30, 3)));
    /// assert_eq!(list.remove_at(0), None);
    /// ```
    pub fn remove_at(&mut self, rank: usize) -> Option<(K, V)> {
        self.raw.remove_at(rank)
    }

    /// Removes and returns the first entry in list order.
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
    /// let mut list = Skiplist::from([(1, "a"), (2, "b")]);
    /// while let Some((key, _)) = list.pop_first() {
    ///     assert!(list.iter().all(|(k, _)| *k > key));
    /// }
    /// assert!(list.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.remove_at(0)
    }

    /// Removes and returns the last entry in list order.
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
    /// let mut list = Skiplist::from([(1, "a"), (2, "b")]);
    /// assert_eq!(list.pop_last(), Some((2, "b")));
    /// assert_eq!(list.pop_last(), Some((1, "a")));
    /// assert_eq!(list.pop_last(), None);
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.remove_at(self.len().checked_sub(1)?)
    }

    /// Returns a view of the entry `element` refers to.
    ///
    /// # Panics
    ///
    /// Panics if the entry has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// let b = list.insert('b', 2);
    /// list.insert('a', 1);
    ///
    /// let element = list.entry(b);
    /// assert_eq!((element.key(), element.value()), (&'b', &2));
    /// ```
    #[must_use]
    pub fn entry(&self, element: ElementRef) -> Element<'_, K, V> {
        Element::new(self.raw.nodes(), element.0)
    }

    /// Returns the key of the entry `element` refers to.
    ///
    /// # Panics
    ///
    /// Panics if the entry has been removed.
    #[must_use]
    pub fn key(&self, element: ElementRef) -> &K {
        self.raw.node(element.0).key()
    }

    /// Returns the value of the entry `element` refers to.
    ///
    /// # Panics
    ///
    /// Panics if the entry has been removed.
    #[must_use]
    pub fn value(&self, element: ElementRef) -> &V {
        self.raw.node(element.0).value()
    }

    /// Returns a mutable reference to the value of the entry `element` refers to.
    ///
    /// # Panics
    ///
    /// Panics if the entry has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// let handle = list.insert(1, 10);
    /// *list.value_mut(handle) += 5;
    /// assert_eq!(list.value(handle), &15);
    /// ```
    pub fn value_mut(&mut self, element: ElementRef) -> &mut V {
        self.raw.node_mut(element.0).value_mut()
    }

    /// Gets an iterator over the entries of the list, in list order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// list.insert(3, "c");
    /// list.insert(2, "b");
    /// list.insert(1, "a");
    ///
    /// for (key, value) in list.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = list.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, O, R> {
        Iter::new(&self.raw)
    }

    /// Gets an iterator over the keys of the list, in list order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let list = Skiplist::from([(2, "b"), (1, "a"), (2, "c")]);
    /// let keys: Vec<_> = list.keys().copied().collect();
    /// assert_eq!(keys, [1, 2, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V, O, R> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the list, in list order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let list = Skiplist::from([(1, "hello"), (2, "goodbye")]);
    /// let values: Vec<_> = list.values().copied().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V, O, R> {
        Values { inner: self.iter() }
    }
}

impl<K, V, O, R> Skiplist<K, V, O, R> {
    /// Checks `key` against the ordering's binding, panicking on a rejected key.
    fn admit<Q>(&self, key: &Q)
    where
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        if let Err(err) = self.raw.order().bind(key) {
            panic!("{err}");
        }
    }

    /// Returns the youngest entry whose key equals `key`, together with its rank.
    ///
    /// The key may be any borrowed form of the list's key type, but the ordering and score
    /// of the borrowed form *must* match those of the key type.
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
    /// let list = Skiplist::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// let (element, rank) = list.find("b").unwrap();
    /// assert_eq!((*element.value(), rank), (2, 1));
    /// assert!(list.find("z").is_none());
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<(Element<'_, K, V>, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.admit(key);
        let (handle, rank) = self.raw.find(key)?;
        Some((Element::new(self.raw.nodes(), handle), rank))
    }

    /// Returns the youngest entry whose key equals `key`.
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
    /// list.insert(1, "old");
    /// list.insert(1, "new");
    ///
    /// assert_eq!(list.element(&1).map(|e| *e.value()), Some("new"));
    /// ```
    #[must_use]
    pub fn element<Q>(&self, key: &Q) -> Option<Element<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.find(key).map(|(element, _)| element)
    }

    /// Returns a reference to the value of the youngest entry whose key equals `key`.
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
    /// list.insert(1, "a");
    /// assert_eq!(list.get(&1), Some(&"a"));
    /// assert_eq!(list.get(&2), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.admit(key);
        let (handle, _) = self.raw.find(key)?;
        Some(self.raw.node(handle).value())
    }

    /// Returns a mutable reference to the value of the youngest entry whose key equals `key`.
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
    /// list.insert(1, "a");
    /// if let Some(x) = list.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(list[rank_skiplist::Rank(0)], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.admit(key);
        let (handle, _) = self.raw.find(key)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns the values of every entry whose key equals `key`, youngest first.
    ///
    /// # Complexity
    ///
    /// O(log n + m) for `m` matching entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// list.insert(1, 1);
    /// list.insert(1, 2);
    /// list.insert(2, 3);
    ///
    /// assert_eq!(list.get_all(&1), [&2, &1]);
    /// assert!(list.get_all(&3).is_empty());
    /// ```
    #[must_use]
    pub fn get_all<Q>(&self, key: &Q) -> Vec<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.admit(key);
        self.raw.find_all(key).into_iter().map(|handle| self.raw.node(handle).value()).collect()
    }

    /// Returns `true` if the list contains an entry whose key equals `key`.
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
    /// list.insert(1, "a");
    /// assert!(list.contains_key(&1));
    /// assert!(!list.contains_key(&2));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.admit(key);
        self.raw.find(key).is_some()
    }

    /// Removes the youngest entry whose key equals `key` and returns it.
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
    /// list.insert(1, "a");
    /// list.insert(1, "b");
    /// assert_eq!(list.remove(&1), Some((1, "b")));
    /// assert_eq!(list.remove(&1), Some((1, "a")));
    /// assert_eq!(list.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.admit(key);
        self.raw.remove(key)
    }
}

impl<K, V, O: KeyOrder<K>, R: RngCore> Skiplist<K, V, O, R> {
    /// Inserts an entry in front of any entries with an equal key and returns a handle to it.
    ///
    /// # Panics
    ///
    /// Panics if the list's ordering rejects the key; see [`try_insert`](Skiplist::try_insert).
    ///
    /// # Complexity
    ///
    /// O(log n) expected.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// list.insert(37, "a");
    /// list.insert(37, "b");
    ///
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> ElementRef {
        self.admit(&key);
        ElementRef(self.raw.insert(key, value))
    }

    /// Replaces the youngest entry whose key equals `key`, or inserts a new entry if there is
    /// none, and returns a handle to it.
    ///
    /// Older entries with an equal key are left alone.
    ///
    /// # Panics
    ///
    /// Panics if the list's ordering rejects the key; see [`try_set`](Skiplist::try_set).
    ///
    /// # Complexity
    ///
    /// O(log n) expected.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// list.set(37, "a");
    /// list.set(37, "b");
    ///
    /// assert_eq!(list.len(), 1);
    /// assert_eq!(list.get(&37), Some(&"b"));
    /// ```
    pub fn set(&mut self, key: K, value: V) -> ElementRef {
        self.admit(&key);
        let (handle, _) = self.raw.set(key, value);
        ElementRef(handle)
    }

    /// Like [`insert`](Skiplist::insert), except a key the ordering rejects is returned as an
    /// error instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKeyType`] if the list is bound to a different key kind.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<ElementRef, Error> {
        self.raw.order().bind(&key)?;
        Ok(ElementRef(self.raw.insert(key, value)))
    }

    /// Like [`set`](Skiplist::set), except a key the ordering rejects is returned as an error
    /// instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKeyType`] if the list is bound to a different key kind.
    pub fn try_set(&mut self, key: K, value: V) -> Result<ElementRef, Error> {
        self.raw.order().bind(&key)?;
        let (handle, _) = self.raw.set(key, value);
        Ok(ElementRef(handle))
    }
}

impl<K, V, O: KeyOrder<K>, R> Skiplist<K, V, O, R> {
    /// Removes the entry `element` refers to and returns it.
    ///
    /// Unlike [`remove`](Skiplist::remove), this reaches any entry among equal keys, not
    /// only the youngest.
    ///
    /// # Panics
    ///
    /// Panics if the entry has already been removed.
    ///
    /// # Complexity
    ///
    /// O(log n + m) for `m` entries with an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// let old = list.insert(1, "old");
    /// list.insert(1, "new");
    ///
    /// assert_eq!(list.remove_element(old), (1, "old"));
    /// assert_eq!(list.get_all(&1), [&"new"]);
    /// ```
    pub fn remove_element(&mut self, element: ElementRef) -> (K, V) {
        self.raw.remove_handle(element.0)
    }

    /// Retains only the entries specified by the predicate.
    ///
    /// Removes every entry `(k, v)` for which `f(&k, &mut v)` returns `false`. The entries
    /// are visited in list order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list: Skiplist<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the entries with even-numbered keys.
    /// list.retain(|&k, _| k % 2 == 0);
    /// assert!(list.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f);
    }
}

impl<K: PartialEq, V: PartialEq, O, R> PartialEq for Skiplist<K, V, O, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, O, R> Eq for Skiplist<K, V, O, R> {}

impl<K: fmt::Debug, V: fmt::Debug, O, R> fmt::Debug for Skiplist<K, V, O, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, O, R> fmt::Display for Skiplist<K, V, O, R> {
    /// Formats the entries in list order as `{key:value key:value}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut element = self.front();
        while let Some(current) = element {
            write!(f, "{current}")?;
            element = current.next();
            if element.is_some() {
                f.write_str(" ")?;
            }
        }
        f.write_str("}")
    }
}

impl<K, V, O: Default> Default for Skiplist<K, V, O> {
    /// Creates an empty `Skiplist` with the default ordering and seed.
    fn default() -> Self {
        Skiplist::with_order(O::default())
    }
}

impl<K, V, O: KeyOrder<K> + Default> FromIterator<(K, V)> for Skiplist<K, V, O> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut list = Skiplist::default();
        list.extend(iter);
        list
    }
}

impl<K, V, O: KeyOrder<K>, R: RngCore> Extend<(K, V)> for Skiplist<K, V, O, R> {
    /// Inserts every entry, keeping duplicates.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Key, V, const N: usize> From<[(K, V); N]> for Skiplist<K, V> {
    /// Converts a `[(K, V); N]` into a `Skiplist<K, V>`, inserting every entry.
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V, O, R> IntoIterator for &'a Skiplist<K, V, O, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, O, R>;

    fn into_iter(self) -> Iter<'a, K, V, O, R> {
        self.iter()
    }
}

impl<K, V, O, R> IntoIterator for Skiplist<K, V, O, R> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the list, in list order.
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}
