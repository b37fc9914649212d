//! Cancellable one-shot timers.
//!
//! [`TimerQueue`] stores timers in a slotmap arena and orders them with a
//! min-heap keyed by `(due, sequence)`. Cancelling a timer removes it from the
//! arena; its heap entry becomes stale and is skipped when popped, so a
//! cancelled timer can never fire.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use slotmap::{new_key_type, SlotMap};

use super::clock::Timestamp;

new_key_type! {
    /// Identifier of a scheduled timer. Generational: ids of fired or
    /// cancelled timers never alias a newer timer.
    pub struct TimerId;
}

#[derive(Debug)]
struct Entry<K> {
    due: Timestamp,
    kind: K,
}

// ---------------------------------------------------------------------------
// TimerQueue
// ---------------------------------------------------------------------------

/// A queue of one-shot timers carrying a payload of type `K`.
///
/// Timers with the same deadline fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<K> {
    timers: SlotMap<TimerId, Entry<K>>,
    order: BinaryHeap<Reverse<(Timestamp, u64, TimerId)>>,
    next_seq: u64,
}

impl<K> TimerQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            order: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `kind` to fire at `due`.
    pub fn schedule(&mut self, due: Timestamp, kind: K) -> TimerId {
        let id = self.timers.insert(Entry { due, kind });
        self.order.push(Reverse((due, self.next_seq, id)));
        self.next_seq += 1;
        id
    }

    /// Cancel a pending timer. Returns its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        self.timers.remove(id).map(|entry| entry.kind)
    }

    /// Cancel every pending timer whose payload matches `predicate`.
    ///
    /// Returns the number of timers cancelled.
    pub fn cancel_where(&mut self, predicate: impl Fn(&K) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, entry| !predicate(&entry.kind));
        before - self.timers.len()
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<(TimerId, K)> {
        while let Some(&Reverse((due, _, id))) = self.order.peek() {
            if !self.timers.contains_key(id) {
                // Cancelled: drop the stale heap entry.
                self.order.pop();
                continue;
            }
            if due > now {
                return None;
            }
            self.order.pop();
            return self.timers.remove(id).map(|entry| (id, entry.kind));
        }
        None
    }

    /// The earliest pending deadline, if any timer is scheduled.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.values().map(|entry| entry.due).min()
    }

    /// Whether `id` is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Whether any pending timer matches `predicate`.
    pub fn any(&self, predicate: impl Fn(&K) -> bool) -> bool {
        self.timers.values().any(|entry| predicate(&entry.kind))
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.order.clear();
    }
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
