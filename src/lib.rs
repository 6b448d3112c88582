//! Indexable skip list multimap for Rust.
//!
//! This crate provides [`Skiplist`], an ordered map that tolerates duplicate keys and
//! addresses its entries either by key or by rank (zero-based position in sorted order):
//!
//! - [`find`](Skiplist::find) - Get the youngest entry for a key together with its rank
//! - [`find_at`](Skiplist::find_at) - Get the entry at a given sorted position
//! - [`remove_at`](Skiplist::remove_at) - Remove the entry at a given sorted position
//! - Indexing by [`Rank`] - e.g., `list[Rank(0)]` for the first value
//!
//! # Example
//!
//! ```
//! use rank_skiplist::{Rank, Skiplist};
//!
//! let mut list = Skiplist::new();
//! list.set("one", "un");
//! list.set("two", "two");
//! list.set("three", "trois");
//!
//! // `set` replaces the youngest entry for a key...
//! list.set("two", "deux");
//! assert_eq!(list.to_string(), "{one:un three:trois two:deux}");
//!
//! // ...while `insert` adds another one in front of it.
//! list.insert("three", "3");
//! assert_eq!(list.get_all("three"), [&"3", &"trois"]);
//! assert_eq!(list.get("three"), Some(&"3"));
//!
//! // Rank operations (O(log n))
//! assert_eq!(list.position_of("two"), Some(3));
//! assert_eq!(list[Rank(0)], "un");
//! assert_eq!(list.remove_at(0), Some(("one", "un")));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Map or multimap** - [`set`](Skiplist::set) replaces, [`insert`](Skiplist::insert) stacks
//!   duplicates youngest-first
//! - **O(log n) rank operations** - Every link carries the number of positions it spans
//! - **Fast key ordering** - Keys project to a monotonic `f64` score so most comparisons are a
//!   single float compare; see [`Key`]
//! - **Reproducible** - The level generator is an explicit, seeded PRNG owned by each list
//!
//! # Implementation
//!
//! The list is a skip list whose elements live in an arena and link to each other by handle.
//! The number of levels follows the element count (`floor(log2(len)) + 1`), growing and
//! shrinking as the count crosses powers of two.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// Scores are lossy projections of keys.
#![allow(clippy::cast_precision_loss)]

extern crate alloc;

mod error;
mod key;
mod order;
mod order_statistic;
mod raw;

pub mod dynamic;
pub mod skiplist;

pub use error::Error;
pub use key::Key;
pub use order::{Ascending, ByOrd, Descending, KeyOrder, LessFn};
pub use order_statistic::Rank;
pub use skiplist::{Element, ElementRef, Skiplist};
