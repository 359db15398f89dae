// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row Actions Timer: a deterministic, `no_std` queue of cancelable one-shot timers.
//!
//! ## Overview
//!
//! Debounced UI behaviour needs "do this in 50 ms unless something happens first".
//! This crate models that as data instead of callbacks: you [`schedule`](TimerQueue::schedule)
//! a payload for an absolute deadline, get back a generational [`TimerId`], and later drain
//! whatever is due with [`pop_expired`](TimerQueue::pop_expired).
//!
//! The queue never reads a clock. The host owns time and passes `now` in, which makes
//! every sequence of events reproducible in tests.
//!
//! ## Guarantees
//!
//! - Expired timers come out earliest deadline first; equal deadlines keep scheduling order.
//! - [`cancel`](TimerQueue::cancel) is idempotent and never affects a different timer, even
//!   after the slot has been reused.
//! - A fired or cancelled [`TimerId`] is never reported as armed again.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use row_actions_timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let open = timers.schedule(Duration::from_millis(50), "open");
//! let close = timers.schedule(Duration::from_millis(60), "close");
//!
//! // The pointer came back; the close never happens.
//! assert!(timers.cancel(close));
//!
//! assert!(timers.pop_expired(Duration::from_millis(49)).is_none());
//! let due = timers.pop_expired(Duration::from_millis(100)).unwrap();
//! assert_eq!(due.id, open);
//! assert_eq!(due.payload, "open");
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;
mod types;

pub use queue::TimerQueue;
pub use types::{Expired, TimerId};
