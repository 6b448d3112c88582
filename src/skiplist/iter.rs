use core::fmt;
use core::iter::FusedIterator;

use rand_xoshiro::Xoshiro256PlusPlus;

use crate::order::Ascending;
use crate::raw::{Handle, RawSkiplist};

/// An iterator over the entries of a [`Skiplist`](crate::Skiplist), in list order.
///
/// This `struct` is created by the [`iter`](crate::Skiplist::iter) method. Forward steps
/// follow level 0 links. Backward steps look the entry up by rank, so they take O(log n).
///
/// # Examples
///
/// ```
/// use rank_skiplist::Skiplist;
///
/// let list = Skiplist::from([(1, "a"), (2, "b")]);
/// let mut iter = list.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, O = Ascending, R = Xoshiro256PlusPlus> {
    raw: &'a RawSkiplist<K, V, O, R>,
    front: Option<Handle>,
    front_rank: usize,
    remaining: usize,
}

impl<'a, K, V, O, R> Iter<'a, K, V, O, R> {
    pub(super) fn new(raw: &'a RawSkiplist<K, V, O, R>) -> Self {
        Iter {
            raw,
            front: raw.first(),
            front_rank: 0,
            remaining: raw.len(),
        }
    }
}

impl<'a, K, V, O, R> Iterator for Iter<'a, K, V, O, R> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.raw.node(self.front?);
        self.front = node.next();
        self.front_rank += 1;
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, O, R> DoubleEndedIterator for Iter<'_, K, V, O, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.raw.node(self.raw.handle_at(self.front_rank + self.remaining)?);
        Some((node.key(), node.value()))
    }
}

impl<K, V, O, R> ExactSizeIterator for Iter<'_, K, V, O, R> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, O, R> FusedIterator for Iter<'_, K, V, O, R> {}

impl<K, V, O, R> Clone for Iter<'_, K, V, O, R> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<K, V, O, R> fmt::Debug for Iter<'_, K, V, O, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

/// An iterator over the keys of a [`Skiplist`](crate::Skiplist), in list order.
///
/// This `struct` is created by the [`keys`](crate::Skiplist::keys) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, O = Ascending, R = Xoshiro256PlusPlus> {
    pub(super) inner: Iter<'a, K, V, O, R>,
}

impl<'a, K, V, O, R> Iterator for Keys<'a, K, V, O, R> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, O, R> DoubleEndedIterator for Keys<'_, K, V, O, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, O, R> ExactSizeIterator for Keys<'_, K, V, O, R> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, O, R> FusedIterator for Keys<'_, K, V, O, R> {}

impl<K, V, O, R> Clone for Keys<'_, K, V, O, R> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, O, R> fmt::Debug for Keys<'_, K, V, O, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of a [`Skiplist`](crate::Skiplist), in list order.
///
/// This `struct` is created by the [`values`](crate::Skiplist::values) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, O = Ascending, R = Xoshiro256PlusPlus> {
    pub(super) inner: Iter<'a, K, V, O, R>,
}

impl<'a, K, V, O, R> Iterator for Values<'a, K, V, O, R> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, O, R> DoubleEndedIterator for Values<'_, K, V, O, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, O, R> ExactSizeIterator for Values<'_, K, V, O, R> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, O, R> FusedIterator for Values<'_, K, V, O, R> {}

impl<K, V, O, R> Clone for Values<'_, K, V, O, R> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug, O, R> fmt::Debug for Values<'_, K, V, O, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the entries of a [`Skiplist`](crate::Skiplist), in list order.
///
/// This `struct` is created by the [`into_iter`](IntoIterator::into_iter) method on
/// `Skiplist`.
///
/// # Examples
///
/// ```
/// use rank_skiplist::Skiplist;
///
/// let list = Skiplist::from([(1, "a"), (2, "b")]);
/// let mut iter = list.into_iter();
/// assert_eq!(iter.next(), Some((1, "a")));
/// assert_eq!(iter.next_back(), Some((2, "b")));
/// assert_eq!(iter.next(), None);
/// ```
pub struct IntoIter<K, V> {
    pub(super) inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
