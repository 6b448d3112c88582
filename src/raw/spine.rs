use rand::RngCore;

use super::node::Link;
use super::raw_skiplist::RawSkiplist;

impl<K, V, O, R> RawSkiplist<K, V, O, R> {
    /// Counts one more element, adding a level when the count reaches a power of two.
    ///
    /// Called before the insert trace is taken. The new top level has no nodes yet, so its
    /// head link spans every element already stored.
    pub(super) fn grow(&mut self) {
        self.len += 1;
        if self.len.is_power_of_two() {
            self.head.push(Link::terminal(self.len - 1));
            tracing::trace!(levels = self.head.len(), len = self.len, "skiplist spine grew");
        }
    }

    /// Counts one less element, dropping the top level when the count was a power of two.
    ///
    /// Called after the removed node is unlinked. Nodes still reaching the dropped level are
    /// cut down to the new spine height.
    pub(super) fn shrink(&mut self) {
        if self.len.is_power_of_two() {
            let top = self.head.len() - 1;
            let mut cursor = self.head[top].to;
            while let Some(handle) = cursor {
                let node = self.nodes.get_mut(handle);
                cursor = node.link(top).to;
                node.truncate(top);
            }
            self.head.pop();
            tracing::trace!(levels = self.head.len(), len = self.len - 1, "skiplist spine shrank");
        }
        self.len -= 1;
    }

    /// Draws a node height: `h` with probability `2^-h`, capped at the spine height, which
    /// takes the remaining probability.
    pub(super) fn random_height(&mut self) -> usize
    where
        R: RngCore,
    {
        let tails = self.rng.next_u64().trailing_zeros() as usize;
        (tails + 1).min(self.head.len())
    }
}
