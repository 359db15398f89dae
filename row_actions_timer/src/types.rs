// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the timer queue: handles and expired entries.

use core::time::Duration;

/// Identifier for an armed timer.
///
/// This is a small, copyable handle that stays valid until the timer fires or
/// is cancelled. It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On schedule, a fresh slot is allocated with generation `1`.
/// - On fire or cancel, the slot is freed; any existing `TimerId` for that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `TimerId`.
///
/// Stale ids never alias a later timer, so cancelling one is always a no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u32, pub(crate) u32);

impl TimerId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Timer slots are intentionally 32-bit."
    )]
    pub(crate) const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// A timer that reached its deadline.
///
/// Returned by [`TimerQueue::pop_expired`](crate::TimerQueue::pop_expired).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<T> {
    /// Handle the timer was armed with.
    pub id: TimerId,
    /// Deadline the timer was armed for.
    pub deadline: Duration,
    /// Payload supplied at schedule time.
    pub payload: T,
}
