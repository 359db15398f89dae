// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracker: one shared listener, per-region row containment.
//!
//! ## Usage
//!
//! 1) An opening region [`subscribe`](PointerTracker::subscribe)s with its row key.
//! 2) On every document-level pointer move, call [`sample`](PointerTracker::sample)
//!    with the pointer position and a row-rectangle lookup.
//! 3) Route each `(region, Containment)` pair back to its region.
//! 4) A closing region [`unsubscribe`](PointerTracker::unsubscribe)s.
//!
//! Only the first subscription and the last unsubscription change the
//! underlying listener; they are reported as [`ListenerChange`]s.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use row_actions::tracker::PointerTracker;
//! use row_actions::types::{Containment, ListenerChange, RowKey};
//! # use row_actions::registry::Registry;
//! # use row_actions::region::RegionController;
//! # use row_actions::config::RegionConfig;
//! # let mut registry = Registry::new();
//! # let a = registry.register(RegionController::new(RegionConfig::new(), Some(RowKey(1))));
//!
//! let mut tracker = PointerTracker::new();
//! assert_eq!(tracker.subscribe(a, RowKey(1)), Some(ListenerChange::Attached));
//! assert_eq!(tracker.subscribe(a, RowKey(1)), None);
//!
//! let rows = |_row: RowKey| Some(Rect::new(0.0, 0.0, 100.0, 40.0));
//! assert_eq!(tracker.sample(Point::new(100.0, 40.0), rows), vec![(a, Containment::Inside)]);
//! assert_eq!(tracker.sample(Point::new(50.0, 41.0), rows), vec![(a, Containment::Outside)]);
//!
//! assert_eq!(tracker.unsubscribe(a), Some(ListenerChange::Detached));
//! assert_eq!(tracker.unsubscribe(a), None);
//! ```

use kurbo::{Point, Rect};

use crate::types::{Containment, ListenerChange, RegionId, RowKey};

/// Shared pointer-move listener with reference-counted subscriptions.
///
/// Each region subscribes at most once; redundant subscribe and unsubscribe
/// calls are no-ops. The tracker is "listening" exactly while it has at least
/// one subscriber.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    subscribers: Vec<(RegionId, RowKey)>,
}

impl PointerTracker {
    /// Create a tracker with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `region`, watching `row`.
    ///
    /// Returns [`ListenerChange::Attached`] when this is the first subscriber.
    pub fn subscribe(&mut self, region: RegionId, row: RowKey) -> Option<ListenerChange> {
        if self.is_subscribed(region) {
            return None;
        }
        self.subscribers.push((region, row));
        (self.subscribers.len() == 1).then_some(ListenerChange::Attached)
    }

    /// Unsubscribe `region`.
    ///
    /// Returns [`ListenerChange::Detached`] when this was the last subscriber.
    pub fn unsubscribe(&mut self, region: RegionId) -> Option<ListenerChange> {
        let pos = self.subscribers.iter().position(|&(r, _)| r == region)?;
        self.subscribers.remove(pos);
        self.subscribers
            .is_empty()
            .then_some(ListenerChange::Detached)
    }

    /// Whether `region` is subscribed.
    pub fn is_subscribed(&self, region: RegionId) -> bool {
        self.subscribers.iter().any(|&(r, _)| r == region)
    }

    /// Whether the underlying listener is attached.
    pub fn is_listening(&self) -> bool {
        !self.subscribers.is_empty()
    }

    /// Number of subscribed regions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Classify `point` against every subscriber's row.
    ///
    /// `row_rect` resolves a row to its current bounds; a row it cannot
    /// resolve is reported as [`Containment::Outside`]. Results follow
    /// subscription order.
    pub fn sample(
        &self,
        point: Point,
        mut row_rect: impl FnMut(RowKey) -> Option<Rect>,
    ) -> Vec<(RegionId, Containment)> {
        self.subscribers
            .iter()
            .map(|&(region, row)| {
                let c = match row_rect(row) {
                    Some(rect) if contains_inclusive(rect, point) => Containment::Inside,
                    _ => Containment::Outside,
                };
                (region, c)
            })
            .collect()
    }
}

/// Point-in-rect with all four edges inclusive.
///
/// `kurbo::Rect::contains` excludes the far edges; a pointer resting on the
/// row's bottom border still counts as on the row here.
pub fn contains_inclusive(rect: Rect, p: Point) -> bool {
    let r = rect.abs();
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> RegionId {
        RegionId::new(i, 1)
    }

    #[test]
    fn single_attachment_for_many_subscribers() {
        let mut t = PointerTracker::new();
        assert_eq!(t.subscribe(id(0), RowKey(1)), Some(ListenerChange::Attached));
        assert_eq!(t.subscribe(id(1), RowKey(1)), None);
        assert_eq!(t.subscribe(id(2), RowKey(2)), None);
        assert_eq!(t.subscriber_count(), 3);
        assert_eq!(t.unsubscribe(id(1)), None);
        assert_eq!(t.unsubscribe(id(0)), None);
        assert!(t.is_listening());
        assert_eq!(t.unsubscribe(id(2)), Some(ListenerChange::Detached));
        assert!(!t.is_listening());
    }

    #[test]
    fn duplicate_subscribe_does_not_double_count() {
        let mut t = PointerTracker::new();
        t.subscribe(id(0), RowKey(1));
        t.subscribe(id(0), RowKey(1));
        assert_eq!(t.subscriber_count(), 1);
        // One unsubscribe is enough to release it.
        assert_eq!(t.unsubscribe(id(0)), Some(ListenerChange::Detached));
    }

    #[test]
    fn unsubscribe_without_subscription_is_noop() {
        let mut t = PointerTracker::new();
        assert_eq!(t.unsubscribe(id(3)), None);
        assert!(!t.is_listening());
    }

    #[test]
    fn reattach_after_detach_counts_again() {
        let mut t = PointerTracker::new();
        t.subscribe(id(0), RowKey(1));
        t.unsubscribe(id(0));
        assert_eq!(t.subscribe(id(1), RowKey(2)), Some(ListenerChange::Attached));
    }

    #[test]
    fn sample_uses_each_subscribers_row() {
        let mut t = PointerTracker::new();
        t.subscribe(id(0), RowKey(1));
        t.subscribe(id(1), RowKey(2));
        let rows = |row: RowKey| match row.0 {
            1 => Some(Rect::new(0.0, 0.0, 100.0, 40.0)),
            2 => Some(Rect::new(0.0, 40.0, 100.0, 80.0)),
            _ => None,
        };
        assert_eq!(
            t.sample(Point::new(10.0, 20.0), rows),
            vec![(id(0), Containment::Inside), (id(1), Containment::Outside)]
        );
        // Shared border belongs to both rows.
        assert_eq!(
            t.sample(Point::new(10.0, 40.0), rows),
            vec![(id(0), Containment::Inside), (id(1), Containment::Inside)]
        );
    }

    #[test]
    fn vanished_row_is_outside() {
        let mut t = PointerTracker::new();
        t.subscribe(id(0), RowKey(9));
        assert_eq!(
            t.sample(Point::ZERO, |_| None),
            vec![(id(0), Containment::Outside)]
        );
    }

    #[test]
    fn inclusive_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(contains_inclusive(r, Point::new(10.0, 10.0)));
        assert!(contains_inclusive(r, Point::new(20.0, 20.0)));
        assert!(!contains_inclusive(r, Point::new(20.1, 15.0)));
        assert!(!contains_inclusive(r, Point::new(15.0, 9.9)));
    }
}
