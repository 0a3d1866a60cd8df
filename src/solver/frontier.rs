//! Priority frontiers for the heuristic strategies.
//!
//! Both frontiers pop the lowest priority first and break ties with an
//! insertion counter, so equal-priority entries leave in FIFO order whatever
//! the container does internally.
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

pub trait Frontier<T> {
    fn push(&mut self, priority: u32, item: T);

    fn pop(&mut self) -> Option<T>;

    fn len(&self) -> usize;

    /// Called once after every expansion.
    fn after_expansion(&mut self) {}

    /// Number of entries discarded to respect a size cap.
    fn dropped(&self) -> u64 {
        0
    }
}

struct Queued<T> {
    priority: u32,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Queued<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.priority, self.seq) == (other.priority, other.seq)
    }
}

impl<T> Eq for Queued<T> {}

impl<T> PartialOrd for Queued<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed so the max-heap yields the smallest `(priority, seq)`.
impl<T> Ord for Queued<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.priority, other.seq).cmp(&(self.priority, self.seq))
    }
}

/// Unbounded binary-heap frontier.
pub struct PriorityFrontier<T> {
    heap: BinaryHeap<Queued<T>>,
    next_seq: u64,
}

impl<T> PriorityFrontier<T> {
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Frontier<T> for PriorityFrontier<T> {
    fn push(&mut self, priority: u32, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued { priority, seq, item });
    }

    fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|q| q.item)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Frontier holding at most `capacity` entries.
///
/// After each expansion the worst entries (highest priority, latest
/// insertion among equals) are discarded until the cap holds again. Nothing
/// is remembered about a discarded entry.
pub struct BoundedFrontier<T> {
    entries: BTreeMap<(u32, u64), T>,
    next_seq: u64,
    capacity: usize,
    dropped: u64,
}

impl<T> BoundedFrontier<T> {
    pub fn new(capacity: usize) -> Self {
        BoundedFrontier {
            entries: BTreeMap::new(),
            next_seq: 0,
            capacity,
            dropped: 0,
        }
    }
}

impl<T> Frontier<T> for BoundedFrontier<T> {
    fn push(&mut self, priority: u32, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((priority, seq), item);
    }

    fn pop(&mut self) -> Option<T> {
        self.entries.pop_first().map(|(_, item)| item)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn after_expansion(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_last();
            self.dropped += 1;
        }
    }

    fn dropped(&self) -> u64 {
        self.dropped
    }
}
