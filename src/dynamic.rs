//! Keys whose type is decided at runtime.
//!
//! A [`DynSkiplist`] accepts any [`DynKey`], but the first key it sees binds the list to that
//! key's [`KeyKind`]. Keys of other kinds are rejected with [`Error::UnsupportedKeyType`]:
//! [`try_insert`](crate::Skiplist::try_insert) and [`try_set`](crate::Skiplist::try_set)
//! return the error, and every other operation panics with it.
//!
//! # Examples
//!
//! ```
//! use rank_skiplist::Error;
//! use rank_skiplist::dynamic::{DynKey, DynSkiplist};
//!
//! let mut list = DynSkiplist::inferred();
//! list.insert(DynKey::from("b"), 2);
//! list.insert(DynKey::from("a"), 1);
//! assert_eq!(list.to_string(), "{a:1 b:2}");
//!
//! let err = list.try_insert(DynKey::from(3_i64), 3).unwrap_err();
//! assert_eq!(err, Error::UnsupportedKeyType { bound: "text", found: "int" });
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use crate::error::Error;
use crate::key::Key;
use crate::order::KeyOrder;
use crate::skiplist::Skiplist;

/// A skip list keyed by [`DynKey`] whose key kind is bound by the first key it sees.
pub type DynSkiplist<V> = Skiplist<DynKey, V, Inferred>;

/// A key of one of the natively supported kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum DynKey {
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A float. `NaN` keys are a logic error.
    Float(f64),
    /// A text string.
    Text(String),
    /// A byte string.
    Bytes(Vec<u8>),
}

/// The kind of a [`DynKey`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum KeyKind {
    /// [`DynKey::Int`].
    Int,
    /// [`DynKey::Uint`].
    Uint,
    /// [`DynKey::Float`].
    Float,
    /// [`DynKey::Text`].
    Text,
    /// [`DynKey::Bytes`].
    Bytes,
}

impl KeyKind {
    /// Returns the name used for this kind in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            KeyKind::Int => "int",
            KeyKind::Uint => "uint",
            KeyKind::Float => "float",
            KeyKind::Text => "text",
            KeyKind::Bytes => "bytes",
        }
    }
}

impl DynKey {
    /// Returns the kind of this key.
    #[must_use]
    pub const fn kind(&self) -> KeyKind {
        match self {
            DynKey::Int(_) => KeyKind::Int,
            DynKey::Uint(_) => KeyKind::Uint,
            DynKey::Float(_) => KeyKind::Float,
            DynKey::Text(_) => KeyKind::Text,
            DynKey::Bytes(_) => KeyKind::Bytes,
        }
    }

    // Keys of different kinds sort by kind. A bound list never compares them.
    fn less(&self, other: &Self) -> bool {
        match (self, other) {
            (DynKey::Int(a), DynKey::Int(b)) => a.less(b),
            (DynKey::Uint(a), DynKey::Uint(b)) => a.less(b),
            (DynKey::Float(a), DynKey::Float(b)) => a.less(b),
            (DynKey::Text(a), DynKey::Text(b)) => a.less(b),
            (DynKey::Bytes(a), DynKey::Bytes(b)) => a.less(b),
            (a, b) => a.kind() < b.kind(),
        }
    }

    fn score(&self) -> f64 {
        match self {
            DynKey::Int(key) => key.score(),
            DynKey::Uint(key) => key.score(),
            DynKey::Float(key) => key.score(),
            DynKey::Text(key) => key.score(),
            DynKey::Bytes(key) => key.score(),
        }
    }
}

impl fmt::Display for DynKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynKey::Int(key) => write!(f, "{key}"),
            DynKey::Uint(key) => write!(f, "{key}"),
            DynKey::Float(key) => write!(f, "{key}"),
            DynKey::Text(key) => f.write_str(key),
            DynKey::Bytes(key) => write!(f, "{key:?}"),
        }
    }
}

impl From<i64> for DynKey {
    fn from(key: i64) -> Self {
        DynKey::Int(key)
    }
}

impl From<i32> for DynKey {
    fn from(key: i32) -> Self {
        DynKey::Int(key.into())
    }
}

impl From<u64> for DynKey {
    fn from(key: u64) -> Self {
        DynKey::Uint(key)
    }
}

impl From<u32> for DynKey {
    fn from(key: u32) -> Self {
        DynKey::Uint(key.into())
    }
}

impl From<f64> for DynKey {
    fn from(key: f64) -> Self {
        DynKey::Float(key)
    }
}

impl From<&str> for DynKey {
    fn from(key: &str) -> Self {
        DynKey::Text(key.into())
    }
}

impl From<String> for DynKey {
    fn from(key: String) -> Self {
        DynKey::Text(key)
    }
}

impl From<&[u8]> for DynKey {
    fn from(key: &[u8]) -> Self {
        DynKey::Bytes(key.into())
    }
}

impl From<Vec<u8>> for DynKey {
    fn from(key: Vec<u8>) -> Self {
        DynKey::Bytes(key)
    }
}

/// Ordering for [`DynKey`] that binds to the kind of the first key it sees.
///
/// The binding lives in a [`Cell`], so a bound list is not `Sync`.
#[derive(Clone, Debug, Default)]
pub struct Inferred {
    bound: Cell<Option<KeyKind>>,
    descending: bool,
}

impl Inferred {
    /// Returns an unbound ordering that sorts from least to greatest.
    #[must_use]
    pub const fn ascending() -> Self {
        Inferred {
            bound: Cell::new(None),
            descending: false,
        }
    }

    /// Returns an unbound ordering that sorts from greatest to least.
    #[must_use]
    pub const fn descending() -> Self {
        Inferred {
            bound: Cell::new(None),
            descending: true,
        }
    }

    /// Returns the kind this ordering is bound to, if any key has been seen yet.
    #[must_use]
    pub fn bound(&self) -> Option<KeyKind> {
        self.bound.get()
    }
}

impl KeyOrder<DynKey> for Inferred {
    fn less(&self, a: &DynKey, b: &DynKey) -> bool {
        if self.descending { b.less(a) } else { a.less(b) }
    }

    fn score(&self, key: &DynKey) -> f64 {
        if self.descending { -key.score() } else { key.score() }
    }

    fn bind(&self, key: &DynKey) -> Result<(), Error> {
        let found = key.kind();
        match self.bound.get() {
            None => {
                tracing::debug!(kind = found.name(), "bound skiplist key kind");
                self.bound.set(Some(found));
                Ok(())
            }
            Some(bound) if bound == found => Ok(()),
            Some(bound) => Err(Error::UnsupportedKeyType {
                bound: bound.name(),
                found: found.name(),
            }),
        }
    }
}

impl<V> Skiplist<DynKey, V, Inferred> {
    /// Makes a new, empty list whose key kind is bound by the first key it sees.
    ///
    /// Uses the same fixed seed as [`Skiplist::new`].
    #[must_use]
    pub fn inferred() -> Self {
        Skiplist::with_order(Inferred::ascending())
    }

    /// Like [`inferred`](Self::inferred), except keys sort from greatest to least.
    #[must_use]
    pub fn inferred_descending() -> Self {
        Skiplist::with_order(Inferred::descending())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn first_key_binds_kind() {
        let order = Inferred::ascending();
        assert_eq!(order.bound(), None);
        assert!(order.bind(&DynKey::from(1_i64)).is_ok());
        assert_eq!(order.bound(), Some(KeyKind::Int));
        assert!(order.bind(&DynKey::from(-5_i32)).is_ok());
        assert_eq!(
            order.bind(&DynKey::from("x")),
            Err(Error::UnsupportedKeyType {
                bound: "int",
                found: "text"
            })
        );
        assert_eq!(order.bound(), Some(KeyKind::Int));
    }

    #[test]
    fn descending_inverts_predicate_and_score() {
        let order = Inferred::descending();
        let (a, b) = (DynKey::from(1_u64), DynKey::from(2_u64));
        assert!(order.less(&b, &a));
        assert!(!order.less(&a, &b));
        assert_eq!(order.score(&b), -2.0);
    }

    #[test]
    fn kinds_compare_by_value() {
        let order = Inferred::ascending();
        assert!(order.less(&DynKey::from(-1.5), &DynKey::from(0.5)));
        assert!(order.less(&DynKey::from(b"ab".as_slice()), &DynKey::from(b"b".as_slice())));
        assert!(order.less(&DynKey::from("ab"), &DynKey::from("b")));
    }

    #[test]
    fn display_matches_inner_value() {
        assert_eq!(DynKey::from(7_i64).to_string(), "7");
        assert_eq!(DynKey::from("seven").to_string(), "seven");
        assert_eq!(DynKey::from(alloc::vec![1_u8, 2]).to_string(), "[1, 2]");
    }

    #[test]
    fn error_message_names_both_kinds() {
        let err = Error::UnsupportedKeyType {
            bound: "uint",
            found: "bytes",
        };
        assert_eq!(err.to_string(), "skiplist: bytes keys are not supported by a list bound to uint keys");
    }
}
