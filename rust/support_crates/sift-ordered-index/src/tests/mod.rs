mod delete_tests;
mod traversal_tests;
mod validate_tests;

use std::cell::Cell;
use std::cmp::Ordering;

use crate::{OrderedIndex, Record};

thread_local! {
    static CONSTRUCTED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
    static ASSIGNED: Cell<usize> = const { Cell::new(0) };
}

/// Record that counts its constructions, assignments and drops on the
/// current thread.
#[derive(Debug)]
pub(crate) struct Tracked {
    pub(crate) key: u32,
    pub(crate) hits: u32,
}

impl Tracked {
    pub(crate) fn reset_counters() {
        CONSTRUCTED.with(|c| c.set(0));
        DROPPED.with(|c| c.set(0));
        ASSIGNED.with(|c| c.set(0));
    }

    pub(crate) fn constructed() -> usize {
        CONSTRUCTED.with(|c| c.get())
    }

    pub(crate) fn dropped() -> usize {
        DROPPED.with(|c| c.get())
    }

    pub(crate) fn assigned() -> usize {
        ASSIGNED.with(|c| c.get())
    }
}

impl Record for Tracked {
    type Key = u32;

    fn compare(key: &u32, record: &Tracked) -> Ordering {
        key.cmp(&record.key)
    }

    fn construct(key: &u32) -> Tracked {
        CONSTRUCTED.with(|c| c.set(c.get() + 1));
        Tracked { key: *key, hits: 0 }
    }

    fn key(&self) -> &u32 {
        &self.key
    }

    fn assign(&mut self, src: Tracked) {
        ASSIGNED.with(|c| c.set(c.get() + 1));
        *self = src;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPPED.with(|c| c.set(c.get() + 1));
    }
}

pub(crate) fn build<I>(keys: I) -> OrderedIndex<u32>
where
    I: IntoIterator<Item = u32>,
{
    let mut index = OrderedIndex::new();
    for key in keys {
        index.insert(&key).unwrap();
    }
    index
}

pub(crate) fn keys_of(index: &OrderedIndex<u32>) -> Vec<u32> {
    index.iter().copied().collect()
}

pub(crate) fn shuffled(n: u32, seed: u64) -> Vec<u32> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut keys: Vec<u32> = (0..n).collect();
    rng.shuffle(&mut keys);
    keys
}

/// Worst-case AVL height for `n` nodes, rounded up.
pub(crate) fn max_avl_height(n: usize) -> usize {
    (1.44 * ((n + 2) as f64).log2()).ceil() as usize
}

pub(crate) fn root_key(index: &OrderedIndex<u32>) -> Option<u32> {
    index.root.map(|root| index.arena[root].record)
}
