use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{DEFAULT_SEED, Skiplist};
use crate::order::Ascending;
use crate::raw::RawSkiplist;

impl<K, V> Skiplist<K, V> {
    /// Creates an empty list with room for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let list: Skiplist<i32, i32> = Skiplist::with_capacity(32);
    /// assert!(list.is_empty());
    /// assert!(list.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Skiplist {
            raw: RawSkiplist::with_capacity(capacity, Ascending, Xoshiro256PlusPlus::seed_from_u64(DEFAULT_SEED)),
        }
    }
}

impl<K, V, O, R> Skiplist<K, V, O, R> {
    /// Returns the number of entries the list can hold without reallocating its node
    /// storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let list: Skiplist<i32, i32> = Skiplist::with_capacity(32);
    /// assert!(list.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
