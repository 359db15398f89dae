// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: anchor sides, alignment, growth, padding, and results.

use kurbo::Rect;

/// Which edge of the row cell a region is attached to.
///
/// A region that is the first child of its cell anchors to the leading edge;
/// every other position anchors to the trailing edge. Trailing is also the
/// fallback when the container cannot be inspected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnchorSide {
    /// Attached to the leading (left) edge of the cell.
    Leading,
    /// Attached to the trailing (right) edge of the cell.
    #[default]
    Trailing,
}

impl AnchorSide {
    /// Anchor side for a region given whether it is the first child of its cell.
    pub const fn from_first_child(is_first_child: bool) -> Self {
        if is_first_child {
            Self::Leading
        } else {
            Self::Trailing
        }
    }

    /// Horizontal alignment of the overlay for this anchor.
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Leading => Alignment::Start,
            Self::Trailing => Alignment::End,
        }
    }

    /// Edge the reveal animation grows from.
    pub const fn growth(self) -> Growth {
        match self {
            Self::Leading => Growth::FromLeading,
            Self::Trailing => Growth::FromTrailing,
        }
    }
}

/// Horizontal alignment between the trigger (origin) and the overlay.
///
/// Both the origin edge and the overlay edge use the same value, so `Start`
/// means "overlay start on trigger start" and `End` means "overlay end on
/// trigger end". Vertically the overlay is always centered on the trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Start edges coincide.
    Start,
    /// End edges coincide.
    #[default]
    End,
}

/// Direction the overlay grows in when it is revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Growth {
    /// Expands from the leading edge towards the trailing edge.
    FromLeading,
    /// Expands from the trailing edge towards the leading edge.
    FromTrailing,
}

/// How the hosting table lays out the region inside its row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// The region stretches to the full row height (flexible row layout).
    #[default]
    Stretch,
    /// Fixed row structure (for example a native table) where the region keeps
    /// its intrinsic height; the overlay is re-centered with an offset.
    FixedRow,
}

/// Horizontal padding of the cell that contains a region.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContainerPadding {
    /// Padding on the leading edge, in pixels.
    pub leading: f64,
    /// Padding on the trailing edge, in pixels.
    pub trailing: f64,
}

impl ContainerPadding {
    /// No padding.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a padding pair.
    pub const fn new(leading: f64, trailing: f64) -> Self {
        Self { leading, trailing }
    }
}

/// Compensation applied to the region's own box so the overlay lines up with
/// the cell edge despite the cell padding.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HostAdjustment {
    /// Flex growth of the region inside its cell; `1` pushes it to the trailing edge.
    pub flex_grow: f64,
    /// Shift of the region's leading edge (non-positive).
    pub leading_shift: f64,
    /// Margin on the region's trailing edge (non-positive).
    pub trailing_margin: f64,
}

/// Everything [`resolve`](crate::resolve) needs to place an overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementInput {
    /// Anchor side from the one-time measurement.
    pub anchor: AnchorSide,
    /// Bounding rectangle of the row.
    pub row: Rect,
    /// Bounding rectangle of the trigger element, if known.
    pub trigger: Option<Rect>,
    /// Padding of the containing cell.
    pub padding: ContainerPadding,
    /// Layout mode of the hosting table.
    pub mode: LayoutMode,
}

/// Resolved overlay geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Horizontal alignment between trigger and overlay.
    pub alignment: Alignment,
    /// Reveal growth direction.
    pub growth: Growth,
    /// Vertical offset of the overlay; zero unless in [`LayoutMode::FixedRow`].
    pub offset: f64,
    /// Height of the toolbar, in pixels.
    pub toolbar_height: f64,
    /// Padding compensation for the region's box.
    pub adjustment: HostAdjustment,
}
