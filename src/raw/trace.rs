use core::borrow::Borrow;

use smallvec::SmallVec;

use super::handle::Handle;
use super::node::{Link, Node};
use super::raw_skiplist::RawSkiplist;
use crate::order::KeyOrder;

/// The predecessor link at one level of a top-down search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Step {
    /// Owner of the predecessor link. `None` is the spine head.
    pub(crate) origin: Option<Handle>,
    /// Position of `origin`: 0 for the head, `rank + 1` for a node.
    pub(crate) position: usize,
}

impl Step {
    const HEAD: Step = Step {
        origin: None,
        position: 0,
    };
}

/// Predecessor trace, indexed by level.
pub(crate) type Trace = SmallVec<[Step; Handle::MAX_LEVELS]>;

/// Compares a stored node against a search key: scores first, `less` only on a tie.
#[inline]
#[allow(clippy::float_cmp)]
pub(crate) fn precedes<K, V, Q, O>(order: &O, node: &Node<K, V>, key: &Q, score: f64) -> bool
where
    K: Borrow<Q>,
    Q: ?Sized,
    O: KeyOrder<Q>,
{
    if node.score() == score {
        order.less(node.key().borrow(), key)
    } else {
        node.score() < score
    }
}

impl<K, V, O, R> RawSkiplist<K, V, O, R> {
    /// Returns the link leaving `origin` at `level`.
    #[inline]
    pub(crate) fn link(&self, origin: Option<Handle>, level: usize) -> &Link {
        match origin {
            None => &self.head[level],
            Some(handle) => self.nodes.get(handle).link(level),
        }
    }

    #[inline]
    pub(super) fn link_mut(&mut self, origin: Option<Handle>, level: usize) -> &mut Link {
        match origin {
            None => &mut self.head[level],
            Some(handle) => self.nodes.get_mut(handle).link_mut(level),
        }
    }

    /// Returns the node right after the bottom step of `trace`.
    #[inline]
    pub(crate) fn candidate(&self, trace: &Trace) -> Option<Handle> {
        let step = trace.first()?;
        self.link(step.origin, 0).to
    }

    /// Searches from the top level down. At each level the walk moves right while `advance`
    /// accepts the next node (given that node and its position), then records where it
    /// stopped and drops a level without revisiting passed positions.
    fn descend<F>(&self, mut advance: F) -> Trace
    where
        F: FnMut(&Node<K, V>, usize) -> bool,
    {
        let levels = self.head.len();
        let mut trace: Trace = SmallVec::from_elem(Step::HEAD, levels);
        let mut origin = None;
        let mut position = 0;

        for level in (0..levels).rev() {
            loop {
                let link = self.link(origin, level);
                let Some(to) = link.to else { break };
                let destination = position + link.width;
                if !advance(self.nodes.get(to), destination) {
                    break;
                }
                origin = Some(to);
                position = destination;
            }
            trace[level] = Step { origin, position };
        }

        trace
    }

    /// Traces the predecessors of the first node at or after `rank`.
    pub(crate) fn trace_rank(&self, rank: usize) -> Trace {
        self.descend(|_, position| position <= rank)
    }

    /// Traces the predecessors of the first node that does not precede `key`.
    ///
    /// The bottom step's position is that node's rank, which is also where `key` would
    /// be inserted ahead of any equal keys.
    pub(crate) fn trace<Q>(&self, key: &Q, score: f64) -> Trace
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        self.descend(|node, _| precedes(&self.order, node, key, score))
    }

    /// Returns `true` if the node at `handle`, which does not precede `key`, is equal to it.
    #[inline]
    #[allow(clippy::float_cmp)]
    pub(crate) fn matches<Q>(&self, handle: Handle, key: &Q, score: f64) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        let node = self.nodes.get(handle);
        node.score() == score && !self.order.less(key, node.key().borrow())
    }
}
