use core::fmt;

use crate::error::Error;
use crate::key::Key;

/// The ordering strategy a [`Skiplist`](crate::Skiplist) is bound to for its whole lifetime.
///
/// A strategy supplies the strict `less` predicate and the monotonic `score` used by the
/// list's fast-path comparison: two keys compare by score first, and by `less` only when
/// their scores tie. `less(a, b)` must imply `score(a) <= score(b)`.
///
/// Strategies that learn the key type at runtime can reject keys in [`bind`](KeyOrder::bind),
/// which the list calls before every operation that takes a key.
pub trait KeyOrder<K: ?Sized> {
    /// Returns `true` if `a` sorts strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Returns the monotonic score of `key`.
    fn score(&self, key: &K) -> f64;

    /// Checks that `key` can be ordered by this strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKeyType`] if `key` is of a kind the strategy cannot
    /// compare with the keys it has already seen.
    fn bind(&self, key: &K) -> Result<(), Error> {
        let _ = key;
        Ok(())
    }
}

/// Sorts [`Key`]s from least to greatest. This is the default ordering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Ascending;

impl<K: Key + ?Sized> KeyOrder<K> for Ascending {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a.less(b)
    }

    #[inline]
    fn score(&self, key: &K) -> f64 {
        key.score()
    }
}

/// Sorts [`Key`]s from greatest to least by inverting the predicate and negating the score.
///
/// # Examples
///
/// ```
/// use rank_skiplist::Skiplist;
///
/// let mut list = Skiplist::descending();
/// list.insert(1, "a");
/// list.insert(3, "c");
/// list.insert(2, "b");
///
/// assert_eq!(list.to_string(), "{3:c 2:b 1:a}");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Descending;

impl<K: Key + ?Sized> KeyOrder<K> for Descending {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        b.less(a)
    }

    #[inline]
    fn score(&self, key: &K) -> f64 {
        -key.score()
    }
}

/// Orders any [`Ord`] type by its `Ord` implementation, without a score.
///
/// Every comparison falls back to `Ord`, so this is an ordinary skip list search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ByOrd;

impl<K: Ord + ?Sized> KeyOrder<K> for ByOrd {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn score(&self, _key: &K) -> f64 {
        0.0
    }
}

/// Orders keys with a caller-supplied less-than closure, without a score.
///
/// # Examples
///
/// ```
/// use rank_skiplist::{LessFn, Skiplist};
///
/// let mut list = Skiplist::with_order(LessFn(|a: &(u8, u8), b: &(u8, u8)| a.1 < b.1));
/// list.insert((1, 9), "x");
/// list.insert((2, 0), "y");
///
/// assert_eq!(list.front().map(|e| *e.value()), Some("y"));
/// ```
#[derive(Clone, Copy, Default)]
pub struct LessFn<F>(pub F);

impl<K: ?Sized, F: Fn(&K, &K) -> bool> KeyOrder<K> for LessFn<F> {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }

    #[inline]
    fn score(&self, _key: &K) -> f64 {
        0.0
    }
}

impl<F> fmt::Debug for LessFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LessFn")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn ascending_delegates_to_key() {
        assert!(Ascending.less(&1, &2));
        assert!(!Ascending.less(&2, &2));
        assert_eq!(KeyOrder::<i32>::score(&Ascending, &7), 7.0);
        assert!(Ascending.bind(&1).is_ok());
    }

    #[test]
    fn descending_inverts_ascending() {
        assert!(Descending.less(&2, &1));
        assert!(!Descending.less(&1, &2));
        assert!(Descending.less("b", "a"));
        assert_eq!(KeyOrder::<i32>::score(&Descending, &7), -7.0);
    }

    #[test]
    fn by_ord_has_constant_score() {
        assert!(ByOrd.less(&(1, 2), &(1, 3)));
        assert_eq!(ByOrd.score(&(9, 9)), 0.0);
    }

    #[test]
    fn less_fn_calls_closure() {
        let order = LessFn(|a: &i32, b: &i32| a.abs() < b.abs());
        assert!(order.less(&1, &-2));
        assert!(!order.less(&-3, &2));
        assert_eq!(order.score(&100), 0.0);
        assert_eq!(alloc::format!("{order:?}"), "LessFn");
    }
}
