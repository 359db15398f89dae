// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host integration: geometry queries and lifecycle inputs from the presentation layer.
//!
//! The coordinator never measures anything itself. It asks a [`LayoutHost`]
//! for row and trigger rectangles when it needs them, and receives the one-time
//! container measurement through [`Coordinator::measure`](crate::coordinator::Coordinator::measure).

use kurbo::Rect;
use row_actions_placement::ContainerPadding;

use crate::types::{ListenerChange, RegionId, RowKey};

/// Geometry provider implemented by the presentation layer.
///
/// All queries are allowed to fail; the coordinator degrades to defaults
/// instead of surfacing an error.
pub trait LayoutHost {
    /// Current bounding rectangle of a row, or `None` if the row is gone.
    fn row_rect(&self, row: RowKey) -> Option<Rect>;

    /// Horizontal padding of the cell containing `region`.
    fn container_padding(&self, _region: RegionId) -> ContainerPadding {
        ContainerPadding::ZERO
    }

    /// Bounding rectangle of the region's trigger element.
    ///
    /// Only consulted in [`LayoutMode::FixedRow`](row_actions_placement::LayoutMode::FixedRow).
    fn trigger_rect(&self, _region: RegionId) -> Option<Rect> {
        None
    }

    /// Start or stop the single process-wide pointer-move listener.
    fn pointer_listener(&mut self, _change: ListenerChange) {}
}

/// What the mount hook knows about a region's container once it is laid out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContainerInfo {
    /// Whether the region is the first child of its cell.
    pub is_first_child: bool,
}

impl ContainerInfo {
    /// Container where the region is the first child.
    pub const FIRST_CHILD: Self = Self {
        is_first_child: true,
    };

    /// Container where the region follows other content.
    pub const AFTER_CONTENT: Self = Self {
        is_first_child: false,
    };
}
