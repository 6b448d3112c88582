use alloc::string::String;
use core::fmt::{self, Write};

use super::Skiplist;
use crate::raw::RawSkiplist;

/// Characters drawn per unit of link width.
const CELL: usize = 3;

/// A diagnostic drawing of a [`Skiplist`]'s levels, created by
/// [`visualize`](Skiplist::visualize).
///
/// Each level is drawn top first as a row of arrows, one per link, each as long as the link
/// is wide. Terminal links are drawn one cell longer and end in `/`. Two rows of hex digits
/// below name the keys: the high and the low nibble of each key's last byte.
///
/// ```text
/// L2 |---------------------->/
/// L1 |---------->|---->|---->/
/// L0 |->|->|->|->|->|->|->|->/
///       0  0  0  0  0  0  0
///       0  1  2  3  4  5  6
/// ```
pub struct Visualize<'a, K, V, O, R> {
    raw: &'a RawSkiplist<K, V, O, R>,
}

impl<K, V, O, R> Skiplist<K, V, O, R> {
    /// Returns a drawing of the list's levels and link widths, for debugging.
    ///
    /// The drawing depends only on the keys and the level generator, so two lists built
    /// with the same seed and the same operations draw the same.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_skiplist::Skiplist;
    ///
    /// let mut list = Skiplist::new();
    /// list.insert(0x21, ());
    ///
    /// assert_eq!(list.visualize().to_string(), "L0 |->|->/\n      2\n      1");
    /// ```
    pub fn visualize(&self) -> Visualize<'_, K, V, O, R>
    where
        K: fmt::LowerHex,
    {
        Visualize { raw: &self.raw }
    }
}

fn arrow(f: &mut fmt::Formatter<'_>, width: usize) -> fmt::Result {
    match width * CELL {
        0 => f.write_char('X'),
        1 => f.write_char('>'),
        cells => {
            f.write_char('|')?;
            for _ in 2..cells {
                f.write_char('-')?;
            }
            f.write_char('>')
        }
    }
}

impl<K: fmt::LowerHex, V, O, R> Visualize<'_, K, V, O, R> {
    fn key_row(&self, f: &mut fmt::Formatter<'_>, nibble: usize) -> fmt::Result {
        let mut digits = String::new();
        f.write_str("    ")?;
        let mut cursor = self.raw.first();
        while let Some(handle) = cursor {
            let node = self.raw.node(handle);
            digits.clear();
            write!(digits, "{:02x}", node.key())?;
            let digit = digits.chars().rev().nth(nibble).unwrap_or('0');
            write!(f, "  {digit}")?;
            cursor = node.next();
        }
        Ok(())
    }
}

impl<K: fmt::LowerHex, V, O, R> fmt::Display for Visualize<'_, K, V, O, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in (0..self.raw.levels()).rev() {
            write!(f, "L{level} ")?;
            let mut origin = None;
            loop {
                let link = self.raw.link(origin, level);
                match link.to {
                    Some(to) => {
                        arrow(f, link.width)?;
                        origin = Some(to);
                    }
                    None => {
                        arrow(f, link.width + 1)?;
                        break;
                    }
                }
            }
            f.write_str("/\n")?;
        }
        self.key_row(f, 1)?;
        f.write_char('\n')?;
        self.key_row(f, 0)
    }
}

impl<K: fmt::LowerHex, V, O, R> fmt::Debug for Visualize<'_, K, V, O, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
