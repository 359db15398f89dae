// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator: the single entry point the presentation layer drives.
//!
//! ## Overview
//!
//! A [`Coordinator`] bundles a [`Registry`], the shared [`Context`] (clock,
//! timers, pointer tracker), a [`CoordinatorConfig`] and a [`LayoutHost`].
//! The host forwards three kinds of input and the coordinator turns them into
//! region transitions:
//!
//! - [`row_pointer_move`](Coordinator::row_pointer_move): the pointer moved over a region's row.
//! - [`pointer_moved`](Coordinator::pointer_moved): a document-level pointer move while the tracker listens.
//! - [`advance_to`](Coordinator::advance_to): time passed; due timers fire.
//!
//! Everything runs on the calling thread. A row move closes peers on other
//! rows before it arms its own open timer, so no two rows are ever visible at
//! once.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use row_actions::config::RegionConfig;
//! use row_actions::coordinator::Coordinator;
//! use row_actions::host::LayoutHost;
//! use row_actions::types::{RegionState, RowKey};
//!
//! struct Table;
//! impl LayoutHost for Table {
//!     fn row_rect(&self, row: RowKey) -> Option<Rect> {
//!         let y = row.0 as f64 * 52.0;
//!         Some(Rect::new(0.0, y, 600.0, y + 52.0))
//!     }
//! }
//!
//! let mut c = Coordinator::new(Table);
//! let a = c.create_region(RegionConfig::new(), Some(RowKey(0)));
//! let b = c.create_region(RegionConfig::new(), Some(RowKey(1)));
//!
//! c.row_pointer_move(a);
//! c.advance_by(Duration::from_millis(50));
//! assert_eq!(c.region(a).unwrap().state(), RegionState::Open);
//! assert_eq!(c.region(a).unwrap().toolbar_height(), 51.0);
//!
//! // Moving onto the next row closes `a` at once and starts opening `b`.
//! c.pointer_moved(Point::new(10.0, 60.0));
//! c.row_pointer_move(b);
//! assert_eq!(c.region(a).unwrap().state(), RegionState::Closed);
//! c.advance_by(Duration::from_millis(50));
//! assert_eq!(c.region(b).unwrap().state(), RegionState::Open);
//! ```

use core::time::Duration;

use kurbo::Point;
use row_actions_placement::{ContainerPadding, LayoutMode, Placement, PlacementInput, resolve};
use row_actions_timer::Expired;
use tracing::{debug, trace};

use crate::config::{CoordinatorConfig, RegionConfig};
use crate::context::Context;
use crate::host::{ContainerInfo, LayoutHost};
use crate::observable::Observable;
use crate::region::RegionController;
use crate::registry::Registry;
use crate::types::{ListenerChange, RegionId, RegionState, RowKey, TimerKind, TimerTask};

/// Owns every region of one table and drives their state machines.
pub struct Coordinator<H: LayoutHost> {
    host: H,
    config: CoordinatorConfig,
    registry: Registry,
    ctx: Context,
    // Listener state last reported to the host.
    listening: bool,
    attachments: u64,
}

impl<H: LayoutHost> core::fmt::Debug for Coordinator<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", &self.config)
            .field("regions", &self.registry.len())
            .field("now", &self.ctx.now)
            .field("armed_timers", &self.ctx.timers.len())
            .field("listening", &self.listening)
            .field("attachments", &self.attachments)
            .finish_non_exhaustive()
    }
}

impl<H: LayoutHost> Coordinator<H> {
    /// Create a coordinator with default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, CoordinatorConfig::default())
    }

    /// Create a coordinator with explicit configuration.
    pub fn with_config(host: H, config: CoordinatorConfig) -> Self {
        Self::with_registry(host, config, Registry::new())
    }

    /// Create a coordinator around an existing registry.
    ///
    /// Regions already in `registry` are assumed closed.
    pub fn with_registry(host: H, config: CoordinatorConfig, registry: Registry) -> Self {
        Self {
            host,
            ctx: Context::new(config.timing),
            config,
            registry,
            listening: false,
            attachments: 0,
        }
    }

    /// The geometry host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the geometry host, e.g. to update row rectangles.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Configuration in effect.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// The region registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Clock, timers and tracker.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.ctx.now
    }

    /// How many times the host has been told to attach the pointer listener.
    pub fn listener_attachments(&self) -> u64 {
        self.attachments
    }

    /// Deadline of the earliest armed timer; schedule a wake-up for it.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.ctx.timers.next_deadline()
    }

    /// Borrow a live region.
    pub fn region(&self, id: RegionId) -> Option<&RegionController> {
        self.registry.get(id)
    }

    /// Iterate live regions.
    pub fn regions(&self) -> impl Iterator<Item = (RegionId, &RegionController)> + '_ {
        self.registry.iter()
    }

    /// State of a live region.
    pub fn state(&self, id: RegionId) -> Option<RegionState> {
        self.registry.get(id).map(RegionController::state)
    }

    /// Visibility stream of a live region.
    pub fn visibility(&self, id: RegionId) -> Option<Observable<bool>> {
        self.registry.get(id).map(RegionController::visibility)
    }

    /// Ids of regions whose toolbar is currently shown.
    pub fn visible_regions(&self) -> Vec<RegionId> {
        self.registry
            .iter()
            .filter(|(_, r)| r.state().is_visible())
            .map(|(id, _)| id)
            .collect()
    }

    /// Register a new closed region for a row slot that just mounted.
    pub fn create_region(&mut self, config: RegionConfig, row: Option<RowKey>) -> RegionId {
        let id = self.registry.register(RegionController::new(config, row));
        debug!(region = ?id, ?row, ?config, "region created");
        id
    }

    /// One-time measurement from the host's mount-complete hook.
    ///
    /// `container` is `None` when the region has no parent element; the region
    /// then keeps the trailing anchor and no padding compensation. Returns
    /// `false` for unknown or already measured regions.
    pub fn measure(&mut self, id: RegionId, container: Option<ContainerInfo>) -> bool {
        let padding = match container {
            Some(_) => self.host.container_padding(id),
            None => ContainerPadding::ZERO,
        };
        let Some(region) = self.registry.get_mut(id) else {
            return false;
        };
        let measured = region.measure(container, padding);
        if measured {
            debug!(
                region = ?id,
                anchor = ?region.anchor_side(),
                growth = ?region.growth(),
                "region measured"
            );
        }
        measured
    }

    /// The pointer moved over the row containing `id`.
    ///
    /// Peers on other rows close immediately, then `id` starts opening unless
    /// it is already open or pending. Disabled and row-less regions ignore it.
    pub fn row_pointer_move(&mut self, id: RegionId) {
        match self.registry.get(id) {
            Some(r) if r.accepts_pointer() => {}
            Some(_) => {
                trace!(region = ?id, "row move ignored: disabled or no row");
                return;
            }
            None => {
                trace!(region = ?id, "row move for unknown region");
                return;
            }
        }
        self.registry.close_all_except(id, &mut self.ctx);
        if let Some(region) = self.registry.get_mut(id) {
            region.on_row_pointer_move(id, &mut self.ctx);
        }
        self.sync_listener();
    }

    /// The pointer moved over `row`: every region in that row gets a row move.
    pub fn row_hovered(&mut self, row: RowKey) {
        let ids: Vec<RegionId> = self
            .registry
            .iter()
            .filter(|(_, r)| r.row() == Some(row))
            .map(|(id, _)| id)
            .collect();
        for id in ids {
            self.row_pointer_move(id);
        }
    }

    /// Document-level pointer move, to be forwarded while the tracker listens.
    pub fn pointer_moved(&mut self, point: Point) {
        if !self.ctx.tracker.is_listening() {
            return;
        }
        let host = &self.host;
        let samples = self.ctx.tracker.sample(point, |row| host.row_rect(row));
        for (id, containment) in samples {
            if let Some(region) = self.registry.get_mut(id) {
                region.on_containment(id, containment, &mut self.ctx);
            }
        }
        self.sync_listener();
    }

    /// Advance the clock to `now` and fire every timer that is due, in deadline order.
    ///
    /// Returns how many timers changed a region's state. Times earlier than
    /// the current clock are ignored.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        self.ctx.set_now(now);
        let mut fired = 0;
        while let Some(expired) = self.ctx.timers.pop_expired(self.ctx.now) {
            if self.fire(expired) {
                fired += 1;
            }
        }
        self.sync_listener();
        fired
    }

    /// Advance the clock by `dt`, saturating at [`Duration::MAX`].
    /// See [`advance_to`](Self::advance_to).
    pub fn advance_by(&mut self, dt: Duration) -> usize {
        self.advance_to(self.ctx.now.saturating_add(dt))
    }

    /// Tear a region down: cancel its timers, release the tracker, unregister it
    /// and complete its visibility stream.
    ///
    /// Returns `false` if the region was already destroyed.
    pub fn destroy(&mut self, id: RegionId) -> bool {
        let Some(mut region) = self.registry.unregister(id) else {
            trace!(region = ?id, "destroy of unknown region");
            return false;
        };
        region.teardown(id, &mut self.ctx);
        self.sync_listener();
        debug!(region = ?id, "region destroyed");
        true
    }

    fn fire(&mut self, expired: Expired<TimerTask>) -> bool {
        let TimerTask { region: id, kind } = expired.payload;
        let Some(region) = self.registry.get(id) else {
            trace!(region = ?id, ?kind, "timer for destroyed region");
            return false;
        };
        if !region.is_current(kind, expired.id) {
            trace!(region = ?id, ?kind, state = ?region.state(), "stale timer ignored");
            return false;
        }
        match kind {
            TimerKind::Open => {
                let placement = self.placement_for(id, region);
                if let Some(region) = self.registry.get_mut(id) {
                    region.complete_open(id, placement, &mut self.ctx);
                }
                debug_assert!(
                    self.visible_rows_are_exclusive(),
                    "toolbars on two rows are visible at once"
                );
            }
            TimerKind::Close => {
                if let Some(region) = self.registry.get_mut(id) {
                    region.complete_close(id, &mut self.ctx);
                }
            }
        }
        true
    }

    fn placement_for(&self, id: RegionId, region: &RegionController) -> Option<Placement> {
        let row = region.row()?;
        let Some(rect) = self.host.row_rect(row) else {
            trace!(region = ?id, ?row, "row rectangle unavailable");
            return None;
        };
        let trigger = match self.config.layout_mode {
            LayoutMode::FixedRow => self.host.trigger_rect(id),
            LayoutMode::Stretch => None,
        };
        Some(resolve(&PlacementInput {
            anchor: region.anchor_side(),
            row: rect,
            trigger,
            padding: region.padding(),
            mode: self.config.layout_mode,
        }))
    }

    fn visible_rows_are_exclusive(&self) -> bool {
        let mut rows = self
            .registry
            .iter()
            .filter(|(_, r)| r.state().is_visible())
            .map(|(_, r)| r.row());
        match rows.next() {
            Some(first) => rows.all(|row| row == first),
            None => true,
        }
    }

    /// Tell the host about a net change of the tracker's listener state.
    fn sync_listener(&mut self) {
        let listening = self.ctx.tracker.is_listening();
        if listening == self.listening {
            return;
        }
        self.listening = listening;
        let change = if listening {
            self.attachments += 1;
            ListenerChange::Attached
        } else {
            ListenerChange::Detached
        };
        debug!(?change, "pointer listener");
        self.host.pointer_listener(change);
    }
}
