/// An entry slot shared between the heap array and the index map.
/// `key == None` marks a tombstone: the slot's heap entry is garbage
/// and gets dropped the next time it surfaces at the root.
#[derive(Debug)]
struct Slot<K> {
    key: Option<K>,
    // Wider than the external i64 so sign pre-multiplication cannot
    // overflow on i64::MIN.
    priority: i128,
    seq: i64,
}

/// Arena of entry slots plus a binary min-heap of slot handles,
/// ordered lexicographically by the slot's (priority, seq). Both fields
/// arrive pre-multiplied by the configured signs, so the heap logic is
/// identical for every direction/order combination.
#[derive(Debug)]
pub(crate) struct EntryHeap<K> {
    slots: Vec<Slot<K>>,
    heap: Vec<u32>,
    free: Vec<u32>,
}

impl<K> EntryHeap<K> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            heap: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Heap array length, tombstones included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    pub fn insert(&mut self, key: K, priority: i128, seq: i64) -> u32 {
        let slot = Slot {
            key: Some(key),
            priority,
            seq,
        };
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle as usize] = slot;
                handle
            }
            None => {
                self.slots.push(slot);
                (self.slots.len() - 1) as u32
            }
        };
        self.heap.push(handle);
        self.sift_up(self.heap.len() - 1);
        handle
    }

    /// Marks the slot dead without touching the heap array. The handle
    /// stays allocated until the entry is retired at the root, otherwise
    /// a reused slot would alias the stale heap entry.
    pub fn tombstone(&mut self, handle: u32) {
        self.slots[handle as usize].key = None;
    }

    pub fn key(&self, handle: u32) -> Option<&K> {
        self.slots[handle as usize].key.as_ref()
    }

    pub fn priority(&self, handle: u32) -> i128 {
        self.slots[handle as usize].priority
    }

    pub fn root(&self) -> Option<u32> {
        self.heap.first().copied()
    }

    /// Removes the root entry from the heap array. The slot itself is
    /// left untouched; callers follow up with `retire`.
    pub fn pop_root(&mut self) -> Option<u32> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let handle = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        handle
    }

    /// Releases a slot whose heap entry has been physically removed,
    /// returning the key if the slot was still live.
    pub fn retire(&mut self, handle: u32) -> Option<K> {
        let key = self.slots[handle as usize].key.take();
        self.free.push(handle);
        key
    }

    fn less(&self, a: u32, b: u32) -> bool {
        let sa = &self.slots[a as usize];
        let sb = &self.slots[b as usize];
        (sa.priority, sa.seq) < (sb.priority, sb.seq)
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.less(self.heap[pos], self.heap[parent]) {
                self.heap.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let mut child = 2 * pos + 1;
            if child >= self.heap.len() {
                break;
            }
            let right = child + 1;
            if right < self.heap.len() && self.less(self.heap[right], self.heap[child]) {
                child = right;
            }
            if self.less(self.heap[child], self.heap[pos]) {
                self.heap.swap(pos, child);
                pos = child;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::heap::EntryHeap;

    fn drain(heap: &mut EntryHeap<&'static str>) -> Vec<&'static str> {
        let mut got = Vec::new();
        while let Some(handle) = heap.pop_root() {
            if let Some(key) = heap.retire(handle) {
                got.push(key);
            }
        }
        got
    }

    #[test]
    fn orders_by_priority_then_seq() {
        let mut heap = EntryHeap::new();
        heap.insert("a", 5, 0);
        heap.insert("b", 3, 1);
        heap.insert("c", 5, 2);
        assert_eq!(drain(&mut heap), vec!["b", "a", "c"]);
    }

    #[test]
    fn negated_seq_reverses_ties() {
        let mut heap = EntryHeap::new();
        heap.insert("a", 5, 0);
        heap.insert("b", 5, -1);
        heap.insert("c", 5, -2);
        assert_eq!(drain(&mut heap), vec!["c", "b", "a"]);
    }

    #[test]
    fn tombstoned_slot_keeps_its_heap_entry() {
        let mut heap = EntryHeap::new();
        let handle = heap.insert("a", 1, 0);
        heap.tombstone(handle);
        assert_eq!(heap.key(handle), None);
        assert_eq!(heap.heap_len(), 1);
        assert_eq!(drain(&mut heap), Vec::<&str>::new());
    }

    #[test]
    fn retired_slots_are_reused() {
        let mut heap = EntryHeap::new();
        let first = heap.insert("a", 1, 0);
        assert_eq!(heap.pop_root(), Some(first));
        assert_eq!(heap.retire(first), Some("a"));
        let second = heap.insert("b", 2, 1);
        assert_eq!(second, first);
        assert_eq!(heap.key(second), Some(&"b"));
    }
}
