// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row Actions: hover-triggered, mutually exclusive action toolbars for table rows.
//!
//! ## Overview
//!
//! Tables often reveal a small toolbar of row actions when the pointer rests on
//! a row. This crate is the coordination engine behind that behaviour. It does
//! no rendering; it decides *when* a row's toolbar is shown and *where* it goes.
//!
//! - Opening is debounced: a region opens once the pointer has been on its row
//!   for the open delay (50 ms by default).
//! - Closing is debounced the same way once the pointer leaves the row, and
//!   cancelled if it comes back in time.
//! - Toolbars on different rows are mutually exclusive. Hovering a new row
//!   closes every other row's toolbar at once, before the new one starts opening.
//! - One shared pointer listener serves every open region. It is attached while
//!   at least one region is open and detached when the last one closes.
//!
//! ## Pieces
//!
//! - [`Coordinator`](crate::coordinator::Coordinator): the entry point. Owns the
//!   regions and routes host input to them.
//! - [`RegionController`](crate::region::RegionController): one toolbar's state
//!   machine, timers and geometry.
//! - [`Registry`](crate::registry::Registry): the live regions, and the peer
//!   closing rule.
//! - [`PointerTracker`](crate::tracker::PointerTracker): reference-counted
//!   listener and row containment tests.
//! - [`Observable`](crate::observable::Observable): the visibility stream a view
//!   layer subscribes to.
//! - [`LayoutHost`](crate::host::LayoutHost): what the embedding table provides
//!   (row rectangles, cell padding, listener hooks).
//!
//! Timers come from [`row_actions_timer`] and geometry from
//! [`row_actions_placement`]. Both are driven by an explicit clock, so tests and
//! hosts control time with [`advance_to`](crate::coordinator::Coordinator::advance_to).
//!
//! ## Workflow
//!
//! 1) Create a region per row slot with
//!    [`create_region`](crate::coordinator::Coordinator::create_region), then
//!    [`measure`](crate::coordinator::Coordinator::measure) it once it is mounted.
//! 2) Forward row hovers with [`row_pointer_move`](crate::coordinator::Coordinator::row_pointer_move)
//!    or [`row_hovered`](crate::coordinator::Coordinator::row_hovered).
//! 3) While the host's listener is attached, forward document pointer moves with
//!    [`pointer_moved`](crate::coordinator::Coordinator::pointer_moved).
//! 4) Call [`advance_to`](crate::coordinator::Coordinator::advance_to) on every
//!    frame or at [`next_deadline`](crate::coordinator::Coordinator::next_deadline).
//! 5) [`destroy`](crate::coordinator::Coordinator::destroy) a region when its row unmounts.
//!
//! Everything runs on one thread; none of the types here are `Send`.

pub mod config;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod observable;
pub mod region;
pub mod registry;
pub mod tracker;
pub mod types;

pub use config::{CoordinatorConfig, RegionConfig, Timing, Variant};
pub use coordinator::Coordinator;
pub use error::ConfigError;
pub use host::{ContainerInfo, LayoutHost};
pub use types::{RegionId, RegionState, RowKey};
