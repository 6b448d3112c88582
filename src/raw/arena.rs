use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for skip list nodes. Freed slots are recycled, so a handle is only
/// meaningful while its node is live.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    vacant: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[cfg(test)]
    pub(crate) const fn len(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.slots.get(handle.slot()).is_some_and(Option::is_some)
    }

    pub(crate) fn insert(&mut self, value: T) -> Handle {
        if let Some(handle) = self.vacant.pop() {
            self.slots[handle.slot()] = Some(value);
            return handle;
        }

        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::insert()` - arena is at maximum capacity ({})",
            Handle::MAX + 1
        );
        self.slots.push(Some(value));
        Handle::from_slot(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots.get(handle.slot()).and_then(Option::as_ref).expect("`Arena::get()` - handle is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots.get_mut(handle.slot()).and_then(Option::as_mut).expect("`Arena::get_mut()` - handle is invalid!")
    }

    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let value = self
            .slots
            .get_mut(handle.slot())
            .and_then(Option::take)
            .expect("`Arena::remove()` - handle is invalid!");
        self.vacant.push(handle);
        value
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn with_capacity_preallocates() {
        let arena: Arena<u64> = Arena::with_capacity(12);
        assert!(arena.capacity() >= 12);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn removed_slots_are_recycled() {
        let mut arena = Arena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        assert_eq!(arena.remove(a), 'a');
        assert!(!arena.contains(a));
        let c = arena.insert('c');
        assert_eq!(c, a);
        assert_eq!(*arena.get(c), 'c');
        assert_eq!(*arena.get(b), 'b');
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - handle is invalid!")]
    fn stale_handle_panics() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        arena.remove(a);
        let _ = arena.get(a);
    }

    proptest! {
        #[test]
        fn arena_tracks_live_values(ops in prop::collection::vec(op_strategy(), 0..256)) {
            let mut live: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for op in ops {
                match op {
                    Op::Insert(value) => {
                        live.push((arena.insert(value), value));
                    }
                    Op::Overwrite(which, value) if !live.is_empty() => {
                        let index = which % live.len();
                        *arena.get_mut(live[index].0) = value;
                        live[index].1 = value;
                    }
                    Op::Remove(which) if !live.is_empty() => {
                        let (handle, value) = live.swap_remove(which % live.len());
                        prop_assert_eq!(arena.remove(handle), value);
                        prop_assert!(!arena.contains(handle));
                    }
                    Op::Clear => {
                        arena.clear();
                        live.clear();
                    }
                    Op::Overwrite(..) | Op::Remove(_) => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(handle, value) in &live {
                    prop_assert!(arena.contains(handle));
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(u32),
        Overwrite(usize, u32),
        Remove(usize),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            12 => any::<u32>().prop_map(Op::Insert),
            4 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Op::Overwrite(which, value)),
            6 => any::<usize>().prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }
}
