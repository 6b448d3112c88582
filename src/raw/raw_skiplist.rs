use alloc::vec::Vec;
use core::borrow::Borrow;

use rand::RngCore;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Link, Node};
use super::trace::Trace;
use crate::order::KeyOrder;

/// The core skip list behind `Skiplist`.
///
/// Level `i` of the spine (`head[i]`) is the first link of level `i`. The spine always has
/// `floor(log2(len)) + 1` levels, and no node is taller than the spine.
#[derive(Clone)]
pub(crate) struct RawSkiplist<K, V, O, R> {
    /// Arena storing all nodes.
    pub(super) nodes: Arena<Node<K, V>>,
    /// Head link of every level, bottom first.
    pub(super) head: SmallVec<[Link; Handle::MAX_LEVELS]>,
    /// Number of stored entries.
    pub(super) len: usize,
    /// Ordering bound at construction.
    pub(super) order: O,
    /// Source of node heights.
    pub(super) rng: R,
}

impl<K, V, O, R> RawSkiplist<K, V, O, R> {
    /// Creates a new, empty list.
    pub(crate) fn new(order: O, rng: R) -> Self {
        Self {
            nodes: Arena::new(),
            head: SmallVec::new(),
            len: 0,
            order,
            rng,
        }
    }

    /// Creates a new list with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize, order: O, rng: R) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            ..Self::new(order, rng)
        }
    }

    /// Returns the number of entries.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of levels in the spine.
    pub(crate) fn levels(&self) -> usize {
        self.head.len()
    }

    /// Returns the capacity of the node arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the ordering.
    pub(crate) fn order(&self) -> &O {
        &self.order
    }

    /// Returns the nodes arena, for views that walk it without the rest of the list.
    pub(crate) fn nodes(&self) -> &Arena<Node<K, V>> {
        &self.nodes
    }

    /// Returns a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable node by handle.
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns the first node, if any.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.head.first()?.to
    }

    /// Returns the node at `rank`, if `rank < len`.
    pub(crate) fn handle_at(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }
        self.candidate(&self.trace_rank(rank))
    }

    /// Returns the last node, if any.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.handle_at(self.len.checked_sub(1)?)
    }

    /// Removes every entry. The ordering and generator state are kept.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head.clear();
        self.len = 0;
    }

    /// Drains all entries in order by walking level 0.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            let node = self.nodes.remove(handle);
            cursor = node.next();
            entries.push(node.into_entry());
        }
        self.clear();
        entries
    }

    /// Links a new node in after the predecessors in `trace`.
    ///
    /// The spine must already have grown for the new entry.
    fn splice(&mut self, trace: &Trace, key: K, value: V, score: f64) -> Handle
    where
        R: RngCore,
    {
        let height = self.random_height();
        let position = trace[0].position + 1;
        let handle = self.nodes.insert(Node::new(key, value, score, height));

        for (level, step) in trace.iter().enumerate() {
            let link = *self.link(step.origin, level);
            if level < height {
                // Split the predecessor's span at the new node.
                *self.nodes.get_mut(handle).link_mut(level) = Link {
                    to: link.to,
                    width: step.position + link.width + 1 - position,
                };
                *self.link_mut(step.origin, level) = Link {
                    to: Some(handle),
                    width: position - step.position,
                };
            } else {
                self.link_mut(step.origin, level).width += 1;
            }
        }

        handle
    }

    /// Unlinks the node at `handle`, whose predecessors are `trace`, and frees it.
    fn unlink(&mut self, trace: &Trace, handle: Handle) -> (K, V) {
        let height = self.nodes.get(handle).height();

        for (level, step) in trace.iter().enumerate() {
            if level < height {
                let removed = *self.nodes.get(handle).link(level);
                let link = self.link_mut(step.origin, level);
                debug_assert_eq!(link.to, Some(handle), "trace does not precede the node at level {level}");
                link.to = removed.to;
                link.width = link.width + removed.width - 1;
            } else {
                self.link_mut(step.origin, level).width -= 1;
            }
        }

        self.shrink();
        self.nodes.remove(handle).into_entry()
    }

    /// Removes the entry at `rank`.
    pub(crate) fn remove_at(&mut self, rank: usize) -> Option<(K, V)> {
        if rank >= self.len {
            return None;
        }
        let trace = self.trace_rank(rank);
        let handle = self.candidate(&trace)?;
        Some(self.unlink(&trace, handle))
    }
}

impl<K, V, O: KeyOrder<K>, R: RngCore> RawSkiplist<K, V, O, R> {
    /// Inserts an entry ahead of any entries with an equal key.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Handle {
        let score = self.order.score(&key);
        self.insert_scored(key, value, score)
    }

    fn insert_scored(&mut self, key: K, value: V, score: f64) -> Handle {
        self.grow();
        let trace = self.trace(&key, score);
        self.splice(&trace, key, value, score)
    }

    /// Removes the youngest entry with an equal key, if any, then inserts.
    ///
    /// Returns the new node and the replaced entry.
    pub(crate) fn set(&mut self, key: K, value: V) -> (Handle, Option<(K, V)>) {
        let score = self.order.score(&key);
        let trace = self.trace(&key, score);
        let replaced = self
            .candidate(&trace)
            .filter(|&handle| self.matches(handle, &key, score))
            .map(|handle| self.unlink(&trace, handle));
        (self.insert_scored(key, value, score), replaced)
    }
}

impl<K, V, O: KeyOrder<K>, R> RawSkiplist<K, V, O, R> {
    /// Removes the node at `handle`, wherever it sits among entries with an equal key.
    ///
    /// The key trace lands on the youngest equal entry, so the walk continues along level 0
    /// to the target and then moves each level's predecessor up to it.
    pub(crate) fn remove_handle(&mut self, handle: Handle) -> (K, V) {
        let node = self.nodes.get(handle);
        let mut trace = self.trace(node.key(), node.score());

        let mut position = trace[0].position + 1;
        let mut cursor = self.candidate(&trace);
        while cursor != Some(handle) {
            let current = cursor.expect("`RawSkiplist::remove_handle()` - handle is not linked!");
            cursor = self.nodes.get(current).next();
            position += 1;
        }

        for (level, step) in trace.iter_mut().enumerate() {
            loop {
                let link = *self.link(step.origin, level);
                // Terminal links reach `len`, so the walk stops before running off a level.
                if step.position + link.width >= position {
                    break;
                }
                step.origin = link.to;
                step.position += link.width;
            }
        }

        self.unlink(&trace, handle)
    }

    /// Keeps only the entries for which `keep` returns `true`, visiting them in order.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut doomed = Vec::new();
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            let node = self.nodes.get_mut(handle);
            let (key, value) = node.entry_mut();
            if !keep(key, value) {
                doomed.push(handle);
            }
            cursor = node.next();
        }
        for handle in doomed {
            self.remove_handle(handle);
        }
    }
}

impl<K, V, O, R> RawSkiplist<K, V, O, R> {
    /// Returns the youngest node with a key equal to `key`, and its rank.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<(Handle, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        let score = self.order.score(key);
        let trace = self.trace(key, score);
        let handle = self.candidate(&trace)?;
        self.matches(handle, key, score).then_some((handle, trace[0].position))
    }

    /// Returns every node with a key equal to `key`, youngest first.
    pub(crate) fn find_all<Q>(&self, key: &Q) -> Vec<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        let score = self.order.score(key);
        let trace = self.trace(key, score);
        let mut run = Vec::new();
        let mut cursor = self.candidate(&trace);
        while let Some(handle) = cursor.filter(|&handle| self.matches(handle, key, score)) {
            run.push(handle);
            cursor = self.nodes.get(handle).next();
        }
        run
    }

    /// Removes the youngest entry with a key equal to `key`.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOrder<Q>,
    {
        let score = self.order.score(key);
        let trace = self.trace(key, score);
        let handle = self.candidate(&trace)?;
        if !self.matches(handle, key, score) {
            return None;
        }
        Some(self.unlink(&trace, handle))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::order::Ascending;
    use crate::raw::trace::precedes;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    type Raw = RawSkiplist<i32, u32, Ascending, Xoshiro256PlusPlus>;

    fn raw(seed: u64) -> Raw {
        RawSkiplist::new(Ascending, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    impl<K, V, O: KeyOrder<K>, R> RawSkiplist<K, V, O, R> {
        /// Validates every structural invariant. Panics with a descriptive message if any are
        /// violated.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            let expected_levels = if self.len == 0 { 0 } else { self.len.ilog2() as usize + 1 };
            if self.head.len() != expected_levels {
                errors.push(alloc::format!("spine has {} levels, expected {expected_levels}", self.head.len()));
            }
            if self.nodes.len() != self.len {
                errors.push(alloc::format!("arena holds {} nodes, len is {}", self.nodes.len(), self.len));
            }

            // 1. Walk level 0, numbering positions and checking order.
            let mut positions: BTreeMap<usize, usize> = BTreeMap::new();
            let mut heights: Vec<usize> = Vec::new();
            let mut previous: Option<Handle> = None;
            let mut cursor = self.first();
            while let Some(handle) = cursor {
                if heights.len() > self.len {
                    errors.push(String::from("level 0 is longer than len"));
                    break;
                }
                let node = self.nodes.get(handle);
                heights.push(node.height());
                positions.insert(handle.slot(), heights.len());
                if node.height() > self.head.len() {
                    errors.push(alloc::format!("node at position {} is taller than the spine", heights.len()));
                }
                if let Some(previous) = previous {
                    let previous = self.nodes.get(previous);
                    if precedes(&self.order, node, previous.key(), previous.score()) {
                        errors.push(alloc::format!("node at position {} precedes its predecessor", heights.len()));
                    }
                }
                previous = Some(handle);
                cursor = node.next();
            }
            if heights.len() != self.len {
                errors.push(alloc::format!("level 0 has {} nodes, len is {}", heights.len(), self.len));
            }

            // 2. Check every level's widths against level 0 positions.
            for level in 0..self.head.len() {
                let mut origin = None;
                let mut origin_position = 0;
                let mut sum = 0;
                let mut visited = 0;
                loop {
                    let link = *self.link(origin, level);
                    sum += link.width;
                    let Some(to) = link.to else {
                        if self.len.checked_sub(origin_position) != Some(link.width) {
                            errors.push(alloc::format!("terminal width {} wrong at level {level}", link.width));
                        }
                        break;
                    };
                    let Some(&to_position) = positions.get(&to.slot()) else {
                        errors.push(alloc::format!("level {level} links a node missing from level 0"));
                        break;
                    };
                    if to_position.checked_sub(origin_position) != Some(link.width) {
                        errors.push(alloc::format!(
                            "width {} from position {origin_position} to {to_position} at level {level}",
                            link.width
                        ));
                        break;
                    }
                    origin = Some(to);
                    origin_position = to_position;
                    visited += 1;
                }
                if sum != self.len {
                    errors.push(alloc::format!("widths at level {level} sum to {sum}, len is {}", self.len));
                }
                let tall = heights.iter().filter(|&&height| height > level).count();
                if visited != tall {
                    errors.push(alloc::format!("level {level} links {visited} of {tall} tall nodes"));
                }
            }

            assert!(errors.is_empty(), "Skiplist invariant violations:\n{}", errors.join("\n"));
        }
    }

    fn keys(raw: &Raw) -> Vec<(i32, u32)> {
        let mut entries = Vec::new();
        let mut cursor = raw.first();
        while let Some(handle) = cursor {
            let node = raw.node(handle);
            entries.push((*node.key(), *node.value()));
            cursor = node.next();
        }
        entries
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Set(i32),
        Remove(i32),
        RemoveAt(usize),
        RemoveHandle(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0i32..64).prop_map(Op::Insert),
            2 => (0i32..64).prop_map(Op::Set),
            2 => (0i32..64).prop_map(Op::Remove),
            1 => any::<usize>().prop_map(Op::RemoveAt),
            2 => any::<usize>().prop_map(Op::RemoveHandle),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut list = raw(42);
            let mut live: Vec<Handle> = Vec::new();
            let mut serial = 0u32;

            for op in ops {
                serial += 1;
                match op {
                    Op::Insert(key) => live.push(list.insert(key, serial)),
                    Op::Set(key) => {
                        let (handle, replaced) = list.set(key, serial);
                        if replaced.is_some() {
                            live.retain(|&h| list.nodes.contains(h) && h != handle);
                        }
                        live.push(handle);
                    }
                    Op::Remove(key) => {
                        list.remove(&key);
                        live.retain(|&h| list.nodes.contains(h));
                    }
                    Op::RemoveAt(rank) => {
                        if list.len() > 0 {
                            list.remove_at(rank % list.len());
                            live.retain(|&h| list.nodes.contains(h));
                        }
                    }
                    Op::RemoveHandle(which) => {
                        if !live.is_empty() {
                            let handle = live.swap_remove(which % live.len());
                            list.remove_handle(handle);
                        }
                    }
                }
                list.validate_invariants();
                prop_assert_eq!(list.len(), live.len());
            }
        }

        #[test]
        fn handle_at_agrees_with_find(ops in prop::collection::vec(0i32..50, 1..200)) {
            let mut list = raw(9);
            for (serial, key) in ops.iter().enumerate() {
                list.insert(*key, serial as u32);
            }
            list.validate_invariants();

            for rank in 0..list.len() {
                let handle = list.handle_at(rank).unwrap();
                let key = *list.node(handle).key();
                let (youngest, first_rank) = list.find(&key).unwrap();
                prop_assert!(first_rank <= rank);
                prop_assert_eq!(list.handle_at(first_rank), Some(youngest));
            }
            prop_assert!(list.handle_at(list.len()).is_none());
        }
    }

    #[test]
    fn empty_list_operations() {
        let mut list = raw(1);
        list.validate_invariants();
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.handle_at(0), None);
        assert_eq!(list.find(&3), None);
        assert!(list.find_all(&3).is_empty());
        assert_eq!(list.remove(&3), None);
        assert_eq!(list.remove_at(0), None);
    }

    #[test]
    fn duplicates_are_youngest_first() {
        let mut list = raw(1);
        list.insert(0, 0);
        list.insert(1, 1);
        list.insert(1, 2);
        list.insert(2, 4);
        list.validate_invariants();
        assert_eq!(keys(&list), [(0, 0), (1, 2), (1, 1), (2, 4)]);

        let values: Vec<u32> = list.find_all(&1).into_iter().map(|h| *list.node(h).value()).collect();
        assert_eq!(values, [2, 1]);
        assert_eq!(list.find(&1).map(|(_, rank)| rank), Some(1));
    }

    #[test]
    fn set_replaces_only_the_youngest() {
        let mut list = raw(1);
        list.insert(5, 1);
        list.insert(5, 2);
        let (_, replaced) = list.set(5, 3);
        assert_eq!(replaced, Some((5, 2)));
        let (_, replaced) = list.set(6, 4);
        assert_eq!(replaced, None);
        list.validate_invariants();
        assert_eq!(keys(&list), [(5, 3), (5, 1), (6, 4)]);
    }

    #[test]
    fn remove_handle_reaches_old_duplicates() {
        let mut list = raw(5);
        let handles: Vec<Handle> = (0..40).map(|serial| list.insert(7, serial)).collect();
        list.insert(3, 100);
        list.insert(9, 200);

        // Oldest first: each one sits at the back of the run.
        for (serial, handle) in handles.into_iter().enumerate() {
            assert_eq!(list.remove_handle(handle), (7, serial as u32));
            list.validate_invariants();
        }
        assert_eq!(keys(&list), [(3, 100), (9, 200)]);
    }

    #[test]
    fn pops_by_rank_in_order() {
        let mut list = raw(1);
        list.insert(30, 3);
        list.insert(10, 1);
        list.insert(20, 2);
        assert_eq!(list.remove_at(0), Some((10, 1)));
        assert_eq!(list.remove_at(0), Some((20, 2)));
        assert_eq!(list.remove_at(0), Some((30, 3)));
        assert_eq!(list.remove_at(0), None);
        list.validate_invariants();
    }

    #[test]
    fn retain_drops_rejected_entries() {
        let mut list = raw(3);
        for key in 0..100 {
            list.insert(key % 10, key as u32);
        }
        list.retain(|key, value| {
            *value += 1;
            key % 2 == 0
        });
        list.validate_invariants();
        assert_eq!(list.len(), 50);
        assert!(keys(&list).iter().all(|&(key, value)| key % 2 == 0 && value % 10 == key as u32 + 1));
    }

    #[test]
    fn drain_yields_sorted_entries_and_empties() {
        let mut list = raw(8);
        for key in [4, 2, 8, 6] {
            list.insert(key, key as u32);
        }
        assert_eq!(list.drain_to_vec(), [(2, 2), (4, 4), (6, 6), (8, 8)]);
        assert_eq!(list.len(), 0);
        list.validate_invariants();
    }

    #[test]
    fn same_seed_same_structure() {
        let (mut a, mut b) = (raw(42), raw(42));
        for key in 0..200 {
            a.insert(key, 0);
            b.insert(key, 0);
        }
        for key in (0..200).step_by(3) {
            a.remove(&key);
            b.remove(&key);
        }
        let heights = |list: &Raw| {
            let mut heights = Vec::new();
            let mut cursor = list.first();
            while let Some(handle) = cursor {
                heights.push(list.node(handle).height());
                cursor = list.node(handle).next();
            }
            heights
        };
        assert_eq!(heights(&a), heights(&b));
    }
}
