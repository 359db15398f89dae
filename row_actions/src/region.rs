// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region controller: one row's toolbar state machine, timers, and geometry.
//!
//! ## Overview
//!
//! A [`RegionController`] owns everything about one row action slot:
//! its [`RegionState`], its two debounce timer handles, the anchor side found
//! by the one-time measurement, and the toolbar geometry computed each time it
//! opens. Its visibility is published through an [`Observable<bool>`].
//!
//! Controllers do not act on their own. The [`Coordinator`](crate::coordinator::Coordinator)
//! feeds them row hovers, containment samples and fired timers, and hands them
//! the shared [`Context`] to arm timers and (un)subscribe from the pointer tracker.
//!
//! ## Timer discipline
//!
//! Each region has at most one open timer and one close timer, and never both.
//! Arming one kind first cancels the other; arming a kind that is already
//! armed does nothing. A fired timer is only honoured if it is still the
//! region's current handle for that kind and the region is still in the state
//! that armed it.

use bitflags::bitflags;
use row_actions_placement::reveal::Reveal;
use row_actions_placement::{
    Alignment, AnchorSide, ContainerPadding, DEFAULT_TOOLBAR_HEIGHT, Growth, HostAdjustment,
    Placement, detect_anchor, host_adjustment,
};
use row_actions_timer::TimerId;
use tracing::{debug, trace};

use crate::config::RegionConfig;
use crate::context::Context;
use crate::host::ContainerInfo;
use crate::observable::Observable;
use crate::types::{Containment, RegionId, RegionState, RowKey, TimerKind, TimerTask};

bitflags! {
    /// Per-region flags derived from configuration and measurement.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RegionFlags: u8 {
        /// Interaction suppressed; the region never opens.
        const DISABLED           = 0b0000_0001;
        /// Reveal animation suppressed.
        const ANIMATION_DISABLED = 0b0000_0010;
        /// The one-time measurement has run.
        const MEASURED           = 0b0000_0100;
        /// The measurement found a container and detected the anchor side.
        const ANCHORED           = 0b0000_1000;
    }
}

impl RegionFlags {
    fn from_config(config: &RegionConfig) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::DISABLED, config.disabled);
        flags.set(Self::ANIMATION_DISABLED, config.animation_disabled);
        flags
    }
}

/// State machine and geometry for one row's action toolbar.
#[derive(Debug)]
pub struct RegionController {
    row: Option<RowKey>,
    config: RegionConfig,
    flags: RegionFlags,
    state: RegionState,
    anchor: AnchorSide,
    padding: ContainerPadding,
    toolbar_height: f64,
    overlay_offset: f64,
    open_timer: Option<TimerId>,
    close_timer: Option<TimerId>,
    visible: Observable<bool>,
}

impl RegionController {
    /// Create a closed, unmeasured region.
    ///
    /// `row` is `None` when the region is not nested in a recognizable row; such
    /// a region keeps working as a state holder but never opens.
    pub fn new(config: RegionConfig, row: Option<RowKey>) -> Self {
        Self {
            row,
            flags: RegionFlags::from_config(&config),
            config,
            state: RegionState::Closed,
            anchor: AnchorSide::Trailing,
            padding: ContainerPadding::ZERO,
            toolbar_height: DEFAULT_TOOLBAR_HEIGHT,
            overlay_offset: 0.0,
            open_timer: None,
            close_timer: None,
            visible: Observable::new(false),
        }
    }

    /// Row this region belongs to.
    pub fn row(&self) -> Option<RowKey> {
        self.row
    }

    /// Configuration supplied at construction.
    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// Flags derived from configuration and measurement.
    pub fn flags(&self) -> RegionFlags {
        self.flags
    }

    /// Current state.
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// Whether the region is disabled.
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(RegionFlags::DISABLED)
    }

    /// Whether the one-time measurement has run.
    pub fn is_measured(&self) -> bool {
        self.flags.contains(RegionFlags::MEASURED)
    }

    /// Whether the toolbar is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Visibility stream for the rendering layer.
    pub fn visibility(&self) -> Observable<bool> {
        self.visible.clone()
    }

    /// Anchor side. Trailing until a measurement finds the region first in its cell.
    pub fn anchor_side(&self) -> AnchorSide {
        self.anchor
    }

    /// Overlay alignment implied by the anchor side.
    pub fn alignment(&self) -> Alignment {
        self.anchor.alignment()
    }

    /// Reveal growth direction, or `None` when unanchored or animation is disabled.
    pub fn growth(&self) -> Option<Growth> {
        let animated = self.flags.contains(RegionFlags::ANCHORED)
            && !self.flags.contains(RegionFlags::ANIMATION_DISABLED);
        animated.then(|| self.anchor.growth())
    }

    /// Reveal animation descriptor, or `None` for an instant show/hide.
    pub fn reveal(&self) -> Option<Reveal> {
        self.growth().map(Reveal::enter)
    }

    /// Toolbar height in pixels, as of the last open.
    pub fn toolbar_height(&self) -> f64 {
        self.toolbar_height
    }

    /// Vertical overlay offset in pixels, as of the last open.
    pub fn overlay_offset(&self) -> f64 {
        self.overlay_offset
    }

    /// Cell padding recorded by the measurement.
    pub fn padding(&self) -> ContainerPadding {
        self.padding
    }

    /// Padding compensation for the region's own box; zero until anchored.
    pub fn host_adjustment(&self) -> HostAdjustment {
        if self.flags.contains(RegionFlags::ANCHORED) {
            host_adjustment(self.anchor, self.padding)
        } else {
            HostAdjustment::default()
        }
    }

    /// Armed open timer, if any.
    pub fn open_timer(&self) -> Option<TimerId> {
        self.open_timer
    }

    /// Armed close timer, if any.
    pub fn close_timer(&self) -> Option<TimerId> {
        self.close_timer
    }

    /// Whether row hovers are acted upon.
    pub(crate) fn accepts_pointer(&self) -> bool {
        !self.is_disabled() && self.row.is_some()
    }

    /// Whether `timer` is the live handle of `kind` and the region still waits on it.
    pub(crate) fn is_current(&self, kind: TimerKind, timer: TimerId) -> bool {
        match kind {
            TimerKind::Open => {
                self.open_timer == Some(timer) && self.state == RegionState::OpeningPending
            }
            TimerKind::Close => {
                self.close_timer == Some(timer) && self.state == RegionState::ClosingPending
            }
        }
    }

    /// One-time anchor detection. Returns `false` if the region was already measured.
    pub(crate) fn measure(
        &mut self,
        container: Option<ContainerInfo>,
        padding: ContainerPadding,
    ) -> bool {
        if self.is_measured() {
            return false;
        }
        self.flags.insert(RegionFlags::MEASURED);
        if let Some(anchor) = detect_anchor(container.map(|c| c.is_first_child)) {
            self.anchor = anchor;
            self.padding = padding;
            self.flags.insert(RegionFlags::ANCHORED);
        }
        true
    }

    /// The pointer moved over this region's row. Peers have already been closed.
    pub(crate) fn on_row_pointer_move(&mut self, id: RegionId, ctx: &mut Context) {
        match self.state {
            RegionState::Closed => {
                if self.arm(id, TimerKind::Open, ctx) {
                    self.set_state(id, RegionState::OpeningPending);
                }
            }
            RegionState::ClosingPending => {
                self.disarm(TimerKind::Close, ctx);
                self.set_state(id, RegionState::Open);
            }
            RegionState::OpeningPending | RegionState::Open => {
                trace!(region = ?id, state = ?self.state, "row move ignored");
            }
        }
    }

    /// The tracker classified the pointer against this region's row.
    pub(crate) fn on_containment(&mut self, id: RegionId, c: Containment, ctx: &mut Context) {
        match (self.state, c) {
            (RegionState::Open, Containment::Outside) => {
                if self.arm(id, TimerKind::Close, ctx) {
                    self.set_state(id, RegionState::ClosingPending);
                }
            }
            (RegionState::ClosingPending, Containment::Inside) => {
                self.disarm(TimerKind::Close, ctx);
                self.set_state(id, RegionState::Open);
            }
            _ => {}
        }
    }

    /// The open timer fired. `placement` is `None` when the row could not be measured.
    ///
    /// The caller has already popped the timer from the queue.
    pub(crate) fn complete_open(
        &mut self,
        id: RegionId,
        placement: Option<Placement>,
        ctx: &mut Context,
    ) {
        debug_assert!(
            self.open_timer.is_none_or(|t| !ctx.timers.is_armed(t)),
            "open completed while its timer is still queued"
        );
        self.open_timer = None;
        match placement {
            Some(p) => {
                self.toolbar_height = p.toolbar_height;
                self.overlay_offset = p.offset;
            }
            None => trace!(region = ?id, "row not measurable; keeping previous geometry"),
        }
        if let Some(row) = self.row {
            if let Some(change) = ctx.tracker.subscribe(id, row) {
                debug!(region = ?id, ?change, "pointer listener");
            }
        }
        self.set_state(id, RegionState::Open);
    }

    /// The close timer fired. The caller has already popped it from the queue.
    pub(crate) fn complete_close(&mut self, id: RegionId, ctx: &mut Context) {
        debug_assert!(
            self.close_timer.is_none_or(|t| !ctx.timers.is_armed(t)),
            "close completed while its timer is still queued"
        );
        self.close_timer = None;
        self.release_tracker(id, ctx);
        self.set_state(id, RegionState::Closed);
    }

    /// Close immediately, skipping the close debounce. Returns whether anything changed.
    pub(crate) fn close_now(&mut self, id: RegionId, ctx: &mut Context) -> bool {
        if self.state == RegionState::Closed {
            return false;
        }
        self.disarm(TimerKind::Open, ctx);
        self.disarm(TimerKind::Close, ctx);
        self.release_tracker(id, ctx);
        self.set_state(id, RegionState::Closed);
        true
    }

    /// Cancel everything this region owns and complete its visibility stream.
    pub(crate) fn teardown(&mut self, id: RegionId, ctx: &mut Context) {
        self.close_now(id, ctx);
        self.visible.complete();
    }

    fn timer_slot(&mut self, kind: TimerKind) -> &mut Option<TimerId> {
        match kind {
            TimerKind::Open => &mut self.open_timer,
            TimerKind::Close => &mut self.close_timer,
        }
    }

    /// Arm `kind` unless already armed, cancelling the other kind first.
    fn arm(&mut self, id: RegionId, kind: TimerKind, ctx: &mut Context) -> bool {
        let other = match kind {
            TimerKind::Open => TimerKind::Close,
            TimerKind::Close => TimerKind::Open,
        };
        self.disarm(other, ctx);
        let slot = self.timer_slot(kind);
        if slot.is_some() {
            return false;
        }
        let deadline = ctx.now.saturating_add(ctx.timing.delay(kind));
        *slot = Some(ctx.timers.schedule(deadline, TimerTask { region: id, kind }));
        trace!(region = ?id, ?kind, ?deadline, "timer armed");
        true
    }

    /// Cancel `kind` if armed.
    fn disarm(&mut self, kind: TimerKind, ctx: &mut Context) -> bool {
        match self.timer_slot(kind).take() {
            Some(timer) => ctx.timers.cancel(timer),
            None => false,
        }
    }

    fn release_tracker(&mut self, id: RegionId, ctx: &mut Context) {
        if let Some(change) = ctx.tracker.unsubscribe(id) {
            debug!(region = ?id, ?change, "pointer listener");
        }
    }

    fn set_state(&mut self, id: RegionId, to: RegionState) {
        if self.state != to {
            debug!(region = ?id, from = ?self.state, ?to, "region transition");
            self.state = to;
        }
        self.visible.set(to.is_visible());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timing;
    use core::time::Duration;
    use kurbo::Rect;
    use row_actions_placement::{LayoutMode, PlacementInput, resolve};

    const ID: RegionId = RegionId(0, 1);

    fn region() -> RegionController {
        RegionController::new(RegionConfig::new(), Some(RowKey(1)))
    }

    fn placement(anchor: AnchorSide) -> Placement {
        resolve(&PlacementInput {
            anchor,
            row: Rect::new(0.0, 0.0, 400.0, 52.0),
            trigger: None,
            padding: ContainerPadding::ZERO,
            mode: LayoutMode::Stretch,
        })
    }

    /// Pop the next due timer for `kind`, advancing the clock to its deadline.
    fn fire(r: &RegionController, kind: TimerKind, ctx: &mut Context) {
        let deadline = ctx.timers().next_deadline().unwrap();
        ctx.set_now(deadline);
        let due = ctx.timers.pop_expired(deadline).unwrap();
        assert!(r.is_current(kind, due.id));
    }

    fn open(r: &mut RegionController, ctx: &mut Context) {
        r.on_row_pointer_move(ID, ctx);
        fire(r, TimerKind::Open, ctx);
        r.complete_open(ID, Some(placement(r.anchor_side())), ctx);
    }

    #[test]
    fn repeated_row_moves_arm_one_timer() {
        let mut ctx = Context::new(Timing::default());
        let mut r = region();
        r.on_row_pointer_move(ID, &mut ctx);
        let first = r.open_timer();
        for _ in 0..5 {
            r.on_row_pointer_move(ID, &mut ctx);
        }
        assert_eq!(r.state(), RegionState::OpeningPending);
        assert_eq!(r.open_timer(), first);
        assert_eq!(ctx.timers().len(), 1);
    }

    #[test]
    fn open_timer_deadline_uses_open_delay() {
        let timing = Timing::new(Duration::from_millis(80), Duration::from_millis(30)).unwrap();
        let mut ctx = Context::new(timing);
        ctx.set_now(Duration::from_millis(1_000));
        let mut r = region();
        r.on_row_pointer_move(ID, &mut ctx);
        let timer = r.open_timer().unwrap();
        assert_eq!(ctx.timers().deadline(timer), Some(Duration::from_millis(1_080)));
    }

    #[test]
    fn open_applies_geometry_and_subscribes() {
        let mut ctx = Context::default();
        let mut r = region();
        open(&mut r, &mut ctx);
        assert_eq!(r.state(), RegionState::Open);
        assert!(r.is_visible());
        assert_eq!(r.toolbar_height(), 51.0);
        assert_eq!(r.open_timer(), None);
        assert!(ctx.tracker().is_subscribed(ID));
    }

    #[test]
    fn leaving_and_returning_cancels_close() {
        let mut ctx = Context::default();
        let mut r = region();
        open(&mut r, &mut ctx);
        r.on_containment(ID, Containment::Outside, &mut ctx);
        let close = r.close_timer().unwrap();
        r.on_containment(ID, Containment::Outside, &mut ctx);
        assert_eq!(r.close_timer(), Some(close));
        r.on_containment(ID, Containment::Inside, &mut ctx);
        assert_eq!(r.state(), RegionState::Open);
        assert_eq!(r.close_timer(), None);
        assert!(!ctx.timers().is_armed(close));
        assert!(!r.is_current(TimerKind::Close, close));
    }

    #[test]
    fn row_move_while_closing_reopens() {
        let mut ctx = Context::default();
        let mut r = region();
        open(&mut r, &mut ctx);
        r.on_containment(ID, Containment::Outside, &mut ctx);
        r.on_row_pointer_move(ID, &mut ctx);
        assert_eq!(r.state(), RegionState::Open);
        assert!(ctx.timers().is_empty());
    }

    #[test]
    fn never_both_timers() {
        let mut ctx = Context::default();
        let mut r = region();
        r.on_row_pointer_move(ID, &mut ctx);
        assert!(r.open_timer().is_some() && r.close_timer().is_none());
        fire(&r, TimerKind::Open, &mut ctx);
        r.complete_open(ID, None, &mut ctx);
        assert!(ctx.timers().is_empty());
        r.on_containment(ID, Containment::Outside, &mut ctx);
        assert!(r.open_timer().is_none() && r.close_timer().is_some());
        assert_eq!(ctx.timers().len(), 1);
    }

    #[test]
    fn close_fire_releases_tracker() {
        let mut ctx = Context::default();
        let mut r = region();
        open(&mut r, &mut ctx);
        r.on_containment(ID, Containment::Outside, &mut ctx);
        fire(&r, TimerKind::Close, &mut ctx);
        r.complete_close(ID, &mut ctx);
        assert_eq!(r.state(), RegionState::Closed);
        assert!(ctx.timers().is_empty());
        assert!(!ctx.tracker().is_listening());
    }

    #[test]
    fn arming_at_end_of_time_saturates() {
        let mut ctx = Context::default();
        ctx.set_now(Duration::MAX);
        let mut r = region();
        r.on_row_pointer_move(ID, &mut ctx);
        let timer = r.open_timer().unwrap();
        assert_eq!(ctx.timers().deadline(timer), Some(Duration::MAX));
    }

    #[test]
    fn close_now_releases_everything() {
        let mut ctx = Context::default();
        let mut r = region();
        open(&mut r, &mut ctx);
        r.on_containment(ID, Containment::Outside, &mut ctx);
        assert!(r.close_now(ID, &mut ctx));
        assert_eq!(r.state(), RegionState::Closed);
        assert!(!r.is_visible());
        assert!(ctx.timers().is_empty());
        assert!(!ctx.tracker().is_listening());
        assert!(!r.close_now(ID, &mut ctx));
    }

    #[test]
    fn measure_runs_once() {
        let mut r = region();
        assert!(r.measure(
            Some(ContainerInfo::FIRST_CHILD),
            ContainerPadding::new(12.0, 20.0)
        ));
        assert!(!r.measure(Some(ContainerInfo::AFTER_CONTENT), ContainerPadding::ZERO));
        assert_eq!(r.anchor_side(), AnchorSide::Leading);
        assert_eq!(r.alignment(), Alignment::Start);
        assert_eq!(r.growth(), Some(Growth::FromLeading));
        assert_eq!(r.host_adjustment().leading_shift, -12.0);
    }

    #[test]
    fn missing_container_keeps_trailing_defaults() {
        let mut r = region();
        assert!(r.measure(None, ContainerPadding::new(12.0, 20.0)));
        assert!(r.is_measured());
        assert_eq!(r.anchor_side(), AnchorSide::Trailing);
        assert_eq!(r.growth(), None);
        assert_eq!(r.host_adjustment(), HostAdjustment::default());
    }

    #[test]
    fn animation_disabled_suppresses_reveal_only() {
        let mut r = RegionController::new(
            RegionConfig::new().with_animation_disabled(true),
            Some(RowKey(1)),
        );
        r.measure(Some(ContainerInfo::AFTER_CONTENT), ContainerPadding::ZERO);
        assert_eq!(r.anchor_side(), AnchorSide::Trailing);
        assert!(r.reveal().is_none());
        let mut ctx = Context::default();
        open(&mut r, &mut ctx);
        assert!(r.is_visible());
    }

    #[test]
    fn teardown_completes_visibility() {
        let mut ctx = Context::default();
        let mut r = region();
        let vis = r.visibility();
        open(&mut r, &mut ctx);
        r.teardown(ID, &mut ctx);
        assert!(!vis.get());
        assert!(vis.is_completed());
        assert!(!ctx.tracker().is_listening());
    }
}
