// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable value cell with change notification.
//!
//! [`Observable<T>`] wraps a value in shared `Rc<RefCell<..>>` storage. When the
//! value changes (by `PartialEq`) every live subscriber is called in
//! registration order. Subscribers are held weakly: dropping the returned
//! [`Subscription`] guard unsubscribes.
//!
//! An observable can be [completed](Observable::complete) once its owner is
//! torn down. Completion drops all subscribers and freezes the value.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use row_actions::observable::Observable;
//!
//! let visible = Observable::new(false);
//! let seen = Rc::new(Cell::new(0));
//! let s = Rc::clone(&seen);
//! let _sub = visible.subscribe(move |v: &bool| if *v { s.set(s.get() + 1) });
//!
//! visible.set(true);
//! visible.set(true); // unchanged, no notification
//! assert_eq!(seen.get(), 1);
//! assert_eq!(visible.version(), 1);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    version: u64,
    completed: bool,
    // Dead entries are pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared value with change notification.
///
/// Cloning an `Observable` yields another handle to the same value and
/// subscriber list.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing `set`.
/// 2. `set(v)` where `v == current` is a no-op.
/// 3. Subscribers are notified in registration order.
/// 4. After [`complete`](Self::complete), `set` is ignored and no subscriber is retained.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("completed", &inner.completed)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable with an initial value, version 0 and no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                completed: false,
                subscribers: Vec::new(),
            })),
        }
    }

    /// A clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Set a new value, notifying subscribers if it differs from the current one.
    ///
    /// Subscribers run after the internal borrow is released, so they may read
    /// the observable (or set it again) without panicking.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.completed || inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Register a callback invoked with the new value on every change.
    ///
    /// Dropping the returned guard unsubscribes. Subscribing to a completed
    /// observable returns a guard for a callback that is never called.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.completed {
                inner.subscribers.push(Rc::downgrade(&strong));
            }
        }
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of value changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Whether [`complete`](Self::complete) has been called.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.inner.borrow().completed
    }

    /// Freeze the value and release every subscriber. Idempotent.
    pub fn complete(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.completed = true;
        inner.subscribers.clear();
    }

    fn notify(&self) {
        let (value, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks: Vec<CallbackRc<T>> =
                inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (inner.value.clone(), callbacks)
        };
        for cb in &callbacks {
            cb(&value);
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it makes the callback unreachable; the observable prunes the dead
/// entry on its next notification.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
