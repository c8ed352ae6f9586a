//! Indexed priority queue: unique keys mapped to priorities, with min or
//! max extraction and configurable FIFO/LIFO tie-breaking. Removals and
//! priority updates tombstone the old heap entry instead of repositioning
//! it; garbage is purged lazily when it surfaces at the root.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use crate::heap::EntryHeap;

pub use crate::config::{HeapDirection, QueueConfig, TieBreakOrder};
pub use crate::error::Error;

mod config;
mod error;
mod heap;

const PRQUE_LOG_TARGET: &str = "prque";

pub struct PriorityQueue<K>
where
    K: Eq + Hash + Clone,
{
    config: QueueConfig,
    heap: EntryHeap<K>,
    index: HashMap<K, u32>,
    next_seq: u64,
}

impl<K> PriorityQueue<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            config,
            heap: EntryHeap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Seeds a queue from (key, priority) pairs through the ordinary
    /// insert path, so a later duplicate key overrides an earlier one.
    pub fn with_items<I>(config: QueueConfig, items: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
    {
        let mut queue = Self::with_config(config);
        queue.extend(items);
        queue
    }

    pub fn config(&self) -> QueueConfig {
        self.config
    }

    /// Number of live entries. Tombstones still sitting in the heap
    /// array do not count.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts a key or updates its priority. An existing entry is
    /// tombstoned and replaced by a fresh one, so the key also takes a
    /// new tie-break sequence number — updating a key makes it the
    /// newest among equal priorities even if the priority is unchanged.
    pub fn push(&mut self, key: K, priority: i64) {
        if let Some(handle) = self.index.remove(&key) {
            self.heap.tombstone(handle);
            trace!(target: PRQUE_LOG_TARGET, priority, "refreshed existing key");
        }
        let seq = self.next_seq as i64 * self.config.order.sign();
        self.next_seq += 1;
        // The sign is applied in i128 so i64::MIN on a max queue cannot
        // overflow; push has no failure case.
        let ordered = priority as i128 * self.config.direction.sign() as i128;
        let handle = self.heap.insert(key.clone(), ordered, seq);
        self.index.insert(key, handle);
    }

    pub fn get(&self, key: &K) -> Result<i64, Error> {
        let handle = self.index.get(key).ok_or(Error::KeyNotFound)?;
        Ok((self.heap.priority(*handle) * self.config.direction.sign() as i128) as i64)
    }

    /// Removes a key by tombstoning its entry in place. The heap array
    /// is not restructured; the dead entry is evicted by a later
    /// `pop`/`peek` once it reaches the root.
    pub fn remove(&mut self, key: &K) -> Result<(), Error> {
        let handle = self.index.remove(key).ok_or(Error::KeyNotFound)?;
        self.heap.tombstone(handle);
        Ok(())
    }

    /// Removes and returns the extremal live key: lowest priority first
    /// for a min queue, highest for max, ties resolved by the configured
    /// order.
    pub fn pop(&mut self) -> Result<K, Error> {
        self.purge_root();
        let handle = self.heap.pop_root().ok_or(Error::EmptyQueue)?;
        let key = self.heap.retire(handle).ok_or(Error::EmptyQueue)?;
        self.index.remove(&key);
        Ok(key)
    }

    /// Returns the extremal live key without removing it. Tombstoned
    /// roots encountered on the way are dropped from the heap array.
    pub fn peek(&mut self) -> Result<&K, Error> {
        self.purge_root();
        let handle = self.heap.root().ok_or(Error::EmptyQueue)?;
        self.heap.key(handle).ok_or(Error::EmptyQueue)
    }

    /// Live keys in arbitrary order. Each call starts a fresh pass.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    /// Live (key, priority) pairs in arbitrary order.
    pub fn items(&self) -> impl Iterator<Item = (&K, i64)> + '_ {
        let sign = self.config.direction.sign() as i128;
        self.index
            .iter()
            .map(move |(key, &handle)| (key, (self.heap.priority(handle) * sign) as i64))
    }

    // Drops tombstoned entries off the heap root until a live entry (or
    // nothing) remains. Each dropped tombstone frees its slot, so the
    // work is paid at most once per removed entry.
    fn purge_root(&mut self) {
        let mut purged = 0usize;
        while let Some(handle) = self.heap.root() {
            if self.heap.key(handle).is_some() {
                break;
            }
            self.heap.pop_root();
            self.heap.retire(handle);
            purged += 1;
        }
        if purged > 0 {
            trace!(
                target: PRQUE_LOG_TARGET,
                purged,
                heap_len = self.heap.heap_len(),
                live = self.index.len(),
                "purged tombstoned heap entries"
            );
        }
    }
}

impl<K> Default for PriorityQueue<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Extend<(K, i64)> for PriorityQueue<K>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, i64)>>(&mut self, items: I) {
        for (key, priority) in items {
            self.push(key, priority);
        }
    }
}

impl<K> FromIterator<(K, i64)> for PriorityQueue<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(items: I) -> Self {
        Self::with_items(QueueConfig::default(), items)
    }
}
