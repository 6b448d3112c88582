/// A zero-based rank into the sorted order of a [`Skiplist`](crate::Skiplist).
///
/// Ranks count every entry, so duplicate keys occupy consecutive ranks with the
/// youngest entry first.
///
/// # Examples
///
/// ```
/// use rank_skiplist::{Rank, Skiplist};
///
/// let mut list = Skiplist::new();
/// list.insert("a", 10);
/// list.insert("b", 20);
/// list.insert("a", 5);
///
/// assert_eq!(list[Rank(0)], 5);
/// assert_eq!(list[Rank(2)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
