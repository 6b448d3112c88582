use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Reverse;

/// Number of leading bytes a byte-string key projects into its score.
const BYTES_SCORE_PREFIX: usize = 8;

/// Bits reserved for one character in a text key's score. Unicode scalar values fit in 21 bits.
const CHAR_SCORE_BITS: u32 = 21;

/// A key type with a strict ordering and an optional fast-path score.
///
/// `less` must be a strict weak ordering. `score` is a cheap numeric projection of the key
/// that never decreases as keys increase: `a.less(&b)` implies `a.score() <= b.score()`.
/// It does not need to be injective. Lists compare scores first and only call `less` when
/// two scores tie, so a good score turns most comparisons into a single float compare.
///
/// Types that only implement `less` keep the default constant score, and every comparison
/// falls back to `less`.
///
/// # Examples
///
/// A key ordered by the sum of its fields, with a matching score:
///
/// ```
/// use rank_skiplist::{Key, Skiplist};
///
/// #[derive(Debug)]
/// struct Pair(i32, i32);
///
/// impl Key for Pair {
///     fn less(&self, other: &Self) -> bool {
///         self.0 + self.1 < other.0 + other.1
///     }
///
///     fn score(&self) -> f64 {
///         f64::from(self.0 + self.1)
///     }
/// }
///
/// let mut list = Skiplist::new();
/// list.insert(Pair(1, 2), 1);
/// list.insert(Pair(5, 6), 2);
/// list.insert(Pair(3, 4), 3);
///
/// let values: Vec<_> = list.values().copied().collect();
/// assert_eq!(values, [1, 3, 2]);
/// ```
pub trait Key {
    /// Returns `true` if `self` sorts strictly before `other`.
    fn less(&self, other: &Self) -> bool;

    /// Returns the monotonic score of this key.
    fn score(&self) -> f64 {
        0.0
    }
}

macro_rules! impl_integer_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl Key for $t {
                #[inline]
                fn less(&self, other: &Self) -> bool {
                    self < other
                }

                #[inline]
                #[allow(clippy::cast_lossless)]
                fn score(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_integer_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Key for f32 {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self < other
    }

    #[inline]
    fn score(&self) -> f64 {
        f64::from(*self)
    }
}

impl Key for f64 {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self < other
    }

    #[inline]
    fn score(&self) -> f64 {
        *self
    }
}

impl Key for char {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self < other
    }

    #[inline]
    fn score(&self) -> f64 {
        f64::from(u32::from(*self))
    }
}

impl Key for str {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self < other
    }

    // The first two characters, packed as code points. A missing character counts as zero,
    // which keeps prefixes at or below their extensions.
    fn score(&self) -> f64 {
        let mut chars = self.chars();
        let first = chars.next().map_or(0, u64::from);
        let second = chars.next().map_or(0, u64::from);
        ((first << CHAR_SCORE_BITS) | second) as f64
    }
}

impl Key for String {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self.as_str().less(other.as_str())
    }

    #[inline]
    fn score(&self) -> f64 {
        self.as_str().score()
    }
}

impl Key for [u8] {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self < other
    }

    // The leading bytes, big-endian and zero padded.
    fn score(&self) -> f64 {
        let mut prefix = [0u8; BYTES_SCORE_PREFIX];
        let len = self.len().min(BYTES_SCORE_PREFIX);
        prefix[..len].copy_from_slice(&self[..len]);
        u64::from_be_bytes(prefix) as f64
    }
}

impl Key for Vec<u8> {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self.as_slice().less(other.as_slice())
    }

    #[inline]
    fn score(&self) -> f64 {
        self.as_slice().score()
    }
}

impl<T: Key + ?Sized> Key for &T {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        (**self).less(*other)
    }

    #[inline]
    fn score(&self) -> f64 {
        (**self).score()
    }
}

impl<T: Key + ?Sized> Key for Box<T> {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        (**self).less(&**other)
    }

    #[inline]
    fn score(&self) -> f64 {
        (**self).score()
    }
}

impl<T: Key> Key for Reverse<T> {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        other.0.less(&self.0)
    }

    #[inline]
    fn score(&self) -> f64 {
        -self.0.score()
    }
}
