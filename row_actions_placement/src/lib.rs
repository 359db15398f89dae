// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row Actions Placement: Kurbo-native geometry for row action overlays.
//!
//! A row action region sits inside a table cell and shows a toolbar overlay on hover.
//! This crate answers the purely geometric questions about that overlay:
//!
//! - Which edge is the region anchored to? See [`detect_anchor`] and [`AnchorSide`].
//! - How is the overlay aligned to its trigger, and which way does it grow? See [`Alignment`] and [`Growth`].
//! - How tall is the toolbar, and does it need a vertical offset? See [`resolve`] and [`LayoutMode`].
//! - How does the region compensate for cell padding? See [`host_adjustment`].
//! - How does it animate in and out? See [`reveal::Reveal`].
//!
//! Everything here is a pure function of its inputs. Measuring the DOM (or whatever the
//! host uses) and deciding *when* to place an overlay is up to the caller.
//!
//! ## Layout modes
//!
//! - [`LayoutMode::Stretch`]: the region stretches to the full row height. The overlay
//!   needs no offset and the toolbar is one pixel shorter than the row to clear its border.
//! - [`LayoutMode::FixedRow`]: the row structure prevents stretching (native tables). The
//!   overlay is moved by the vertical distance between the row center and the trigger center.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::Rect;
//! use row_actions_placement::{
//!     AnchorSide, Alignment, ContainerPadding, LayoutMode, PlacementInput, resolve,
//! };
//!
//! let placement = resolve(&PlacementInput {
//!     anchor: AnchorSide::Trailing,
//!     row: Rect::new(0.0, 0.0, 640.0, 52.0),
//!     trigger: None,
//!     padding: ContainerPadding::new(16.0, 16.0),
//!     mode: LayoutMode::Stretch,
//! });
//! assert_eq!(placement.alignment, Alignment::End);
//! assert_eq!(placement.toolbar_height, 51.0);
//! assert_eq!(placement.offset, 0.0);
//! assert_eq!(placement.adjustment.trailing_margin, -16.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod resolve;
pub mod reveal;
mod types;

pub use resolve::{
    BORDER_COMPENSATION, DEFAULT_TOOLBAR_HEIGHT, detect_anchor, host_adjustment, resolve,
    toolbar_height,
};
pub use types::{
    Alignment, AnchorSide, ContainerPadding, Growth, HostAdjustment, LayoutMode, Placement,
    PlacementInput,
};
