// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer queue implementation: slots, ordering, expiry.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;
use core::time::Duration;

use crate::types::{Expired, TimerId};

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    deadline: Duration,
    payload: T,
}

/// Heap entry. `seq` keeps equal deadlines in scheduling order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    deadline: Duration,
    seq: u64,
    id: TimerId,
}

/// A virtual-time queue of cancelable, one-shot timers.
///
/// The queue never reads a clock. Callers arm timers for an absolute deadline
/// (a [`Duration`] since whatever epoch the host uses) and later drain the ones
/// that are due with [`TimerQueue::pop_expired`].
///
/// Cancellation is lazy in the heap but eager in the slot table: a cancelled
/// id is immediately reported as not armed, and its heap entry is skipped when
/// it surfaces.
pub struct TimerQueue<T> {
    slots: Vec<Option<Slot<T>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    heap: BinaryHeap<Reverse<Pending>>,
    seq: u64,
    live: usize,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("armed", &self.live)
            .field("slots_total", &self.slots.len())
            .field("free_list", &self.free_list.len())
            .field("heap_len", &self.heap.len())
            .field("next_deadline", &self.next_deadline())
            .finish_non_exhaustive()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            heap: BinaryHeap::new(),
            seq: 0,
            live: 0,
        }
    }

    /// Number of armed timers.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no timer is armed.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Arm a timer that becomes due at `deadline`.
    pub fn schedule(&mut self, deadline: Duration, payload: T) -> TimerId {
        let slot = |generation| Slot {
            generation,
            deadline,
            payload,
        };
        let id = if let Some(idx) = self.free_list.pop() {
            // Slots on the free list never hold a saturated generation.
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            self.slots[idx] = Some(slot(generation));
            TimerId::new(idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(slot(generation)));
            self.generations.push(generation);
            TimerId::new(self.slots.len() - 1, generation)
        };
        self.seq += 1;
        self.heap.push(Reverse(Pending {
            deadline,
            seq: self.seq,
            id,
        }));
        self.live += 1;
        id
    }

    /// Cancel an armed timer.
    ///
    /// Returns `false` if `id` already fired, was already cancelled, or never
    /// belonged to this queue.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if !self.is_armed(id) {
            return false;
        }
        self.release(id.idx());
        self.prune();
        true
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_armed(&self, id: TimerId) -> bool {
        matches!(
            self.slots.get(id.idx()),
            Some(Some(slot)) if slot.generation == id.generation()
        )
    }

    /// Deadline of an armed timer.
    pub fn deadline(&self, id: TimerId) -> Option<Duration> {
        match self.slots.get(id.idx()) {
            Some(Some(slot)) if slot.generation == id.generation() => Some(slot.deadline),
            _ => None,
        }
    }

    /// Payload of an armed timer.
    pub fn payload(&self, id: TimerId) -> Option<&T> {
        match self.slots.get(id.idx()) {
            Some(Some(slot)) if slot.generation == id.generation() => Some(&slot.payload),
            _ => None,
        }
    }

    /// Earliest deadline among armed timers.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(p)| p.deadline)
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    ///
    /// Timers with equal deadlines come out in the order they were scheduled.
    /// Call repeatedly until it returns `None` to drain everything that is due.
    pub fn pop_expired(&mut self, now: Duration) -> Option<Expired<T>> {
        let Reverse(top) = *self.heap.peek()?;
        if top.deadline > now {
            return None;
        }
        self.heap.pop();
        let slot = self.release(top.id.idx());
        self.prune();
        Some(Expired {
            id: top.id,
            deadline: top.deadline,
            payload: slot.payload,
        })
    }

    /// Cancel every armed timer.
    pub fn clear(&mut self) {
        for idx in 0..self.slots.len() {
            if self.slots[idx].is_some() {
                self.slots[idx] = None;
                self.recycle(idx);
            }
        }
        self.heap.clear();
        self.live = 0;
    }

    // Callers guarantee the slot is occupied.
    fn release(&mut self, idx: usize) -> Slot<T> {
        let slot = self.slots[idx]
            .take()
            .unwrap_or_else(|| unreachable!("released an empty timer slot"));
        self.recycle(idx);
        self.live -= 1;
        slot
    }

    /// Return a freed slot to the free list, or retire it once its generation
    /// is exhausted so ids from a stale heap entry can never match again.
    fn recycle(&mut self, idx: usize) {
        if self.generations[idx] < u32::MAX {
            self.free_list.push(idx);
        }
    }

    /// Drop cancelled entries from the top of the heap so that `peek` always
    /// sees a live timer, and compact when dead entries dominate.
    fn prune(&mut self) {
        while let Some(Reverse(top)) = self.heap.peek() {
            if self.is_armed(top.id) {
                break;
            }
            self.heap.pop();
        }
        if self.heap.len() > 2 * self.live + 32 {
            let slots = &self.slots;
            self.heap.retain(|Reverse(p)| {
                matches!(
                    slots.get(p.id.idx()),
                    Some(Some(slot)) if slot.generation == p.id.generation()
                )
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn drain(q: &mut TimerQueue<u32>, now: Duration) -> Vec<u32> {
        let mut out = Vec::new();
        while let Some(e) = q.pop_expired(now) {
            out.push(e.payload);
        }
        out
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(30), 3);
        q.schedule(ms(10), 1);
        q.schedule(ms(20), 2);
        assert_eq!(q.next_deadline(), Some(ms(10)));
        assert_eq!(drain(&mut q, ms(25)), vec![1, 2]);
        assert_eq!(q.len(), 1);
        assert_eq!(drain(&mut q, ms(30)), vec![3]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_keep_schedule_order() {
        let mut q = TimerQueue::new();
        for v in 0..5 {
            q.schedule(ms(50), v);
        }
        assert_eq!(drain(&mut q, ms(50)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(50), 7);
        assert!(q.pop_expired(ms(49)).is_none());
        assert!(q.is_armed(id));
        let e = q.pop_expired(ms(50)).unwrap();
        assert_eq!(e.id, id);
        assert_eq!(e.deadline, ms(50));
        assert!(!q.is_armed(id));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(10), 1);
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
        assert!(drain(&mut q, ms(100)).is_empty());
    }

    #[test]
    fn cancelled_top_does_not_hide_later_timer() {
        let mut q = TimerQueue::new();
        let first = q.schedule(ms(10), 1);
        q.schedule(ms(20), 2);
        q.cancel(first);
        assert_eq!(q.next_deadline(), Some(ms(20)));
        assert_eq!(drain(&mut q, ms(20)), vec![2]);
    }

    #[test]
    fn stale_id_does_not_alias_reused_slot() {
        let mut q = TimerQueue::new();
        let old = q.schedule(ms(10), 1);
        assert!(q.cancel(old));
        let new = q.schedule(ms(10), 2);
        assert_eq!(old.idx(), new.idx());
        assert_ne!(old, new);
        assert!(!q.cancel(old));
        assert!(q.is_armed(new));
        assert_eq!(q.payload(new), Some(&2));
        assert_eq!(q.deadline(old), None);
    }

    #[test]
    fn saturated_slot_is_retired() {
        let mut q = TimerQueue::new();
        let first = q.schedule(ms(10), 1);
        q.cancel(first);
        q.generations[first.idx()] = u32::MAX - 1;
        let last = q.schedule(ms(10), 2);
        assert_eq!(last.idx(), first.idx());
        assert_eq!(last.generation(), u32::MAX);
        assert!(q.cancel(last));

        // The exhausted slot is not handed out again.
        let fresh = q.schedule(ms(10), 3);
        assert_ne!(fresh.idx(), last.idx());
        assert!(!q.is_armed(last));
        assert_eq!(drain(&mut q, ms(10)), vec![3]);
        assert!(q.is_empty());
    }

    #[test]
    fn fired_id_cannot_be_cancelled() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(5), 1);
        assert!(q.pop_expired(ms(5)).is_some());
        assert!(!q.cancel(id));
    }

    #[test]
    fn heavy_cancel_churn_compacts_heap() {
        let mut q = TimerQueue::new();
        let keep = q.schedule(ms(1_000), 0);
        for v in 0..500 {
            let id = q.schedule(ms(2_000 + v), 1);
            q.cancel(id);
        }
        assert_eq!(q.len(), 1);
        assert!(q.heap.len() <= 2 * q.len() + 32);
        assert_eq!(q.pop_expired(ms(5_000)).map(|e| e.id), Some(keep));
    }

    #[test]
    fn clear_cancels_everything() {
        let mut q = TimerQueue::new();
        let a = q.schedule(ms(1), 1);
        let b = q.schedule(ms(2), 2);
        q.clear();
        assert!(!q.is_armed(a));
        assert!(!q.is_armed(b));
        assert!(q.is_empty());
        assert!(q.pop_expired(ms(10)).is_none());
    }
}
