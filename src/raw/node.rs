use smallvec::SmallVec;

use super::handle::Handle;

/// Links kept inline per node. Heights follow a geometric distribution with mean two.
const INLINE_LINKS: usize = 2;

/// One forward link at one level.
///
/// `width` is the number of positions the link advances: the destination's position minus
/// the origin's. A terminal link (`to == None`) spans the positions left after its origin,
/// so the widths along any level sum to the element count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Link {
    pub(crate) to: Option<Handle>,
    pub(crate) width: usize,
}

impl Link {
    pub(crate) const fn terminal(width: usize) -> Self {
        Link { to: None, width }
    }
}

pub(crate) type Links = SmallVec<[Link; INLINE_LINKS]>;

/// A stored entry: its key, the key's cached score, its value, and one link per level of
/// its height.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    score: f64,
    links: Links,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, score: f64, height: usize) -> Self {
        debug_assert!(height > 0, "nodes are at least one level tall");
        Node {
            key,
            value,
            score,
            links: SmallVec::from_elem(Link::default(), height),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    #[inline]
    pub(crate) fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub(crate) fn link(&self, level: usize) -> &Link {
        &self.links[level]
    }

    #[inline]
    pub(crate) fn link_mut(&mut self, level: usize) -> &mut Link {
        &mut self.links[level]
    }

    /// Returns the next node at level 0.
    #[inline]
    pub(crate) fn next(&self) -> Option<Handle> {
        self.links[0].to
    }

    /// Drops links above `height`, used when the list loses its top level.
    pub(crate) fn truncate(&mut self, height: usize) {
        self.links.truncate(height);
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_has_unlinked_levels() {
        let node = Node::new("k", 1, 0.5, 3);
        assert_eq!(node.height(), 3);
        assert_eq!(node.score(), 0.5);
        assert_eq!(*node.link(2), Link::default());
        assert_eq!(node.next(), None);
    }

    #[test]
    fn truncate_lowers_height() {
        let mut node = Node::new(1, 'a', 1.0, 4);
        node.link_mut(3).width = 9;
        node.truncate(2);
        assert_eq!(node.height(), 2);
        assert_eq!(node.into_entry(), (1, 'a'));
    }
}
