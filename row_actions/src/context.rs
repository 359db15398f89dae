// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared services every region transition needs: the clock, the timer queue, and the pointer tracker.

use core::time::Duration;

use row_actions_timer::TimerQueue;

use crate::config::Timing;
use crate::tracker::PointerTracker;
use crate::types::TimerTask;

/// Clock, timers and pointer tracker shared by all regions of one coordinator.
///
/// Passed by `&mut` into [`RegionController`](crate::region::RegionController)
/// transitions and [`Registry::close_all_except`](crate::registry::Registry::close_all_except),
/// so there is no ambient global state.
#[derive(Debug, Default)]
pub struct Context {
    pub(crate) now: Duration,
    pub(crate) timing: Timing,
    pub(crate) timers: TimerQueue<TimerTask>,
    pub(crate) tracker: PointerTracker,
}

impl Context {
    /// Fresh context at time zero.
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Debounce delays in effect.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Armed timers.
    pub fn timers(&self) -> &TimerQueue<TimerTask> {
        &self.timers
    }

    /// Pointer tracker state.
    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    /// Move the clock forward. Earlier instants are ignored.
    pub(crate) fn set_now(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }
}
