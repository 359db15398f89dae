// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement resolution: anchor detection, padding compensation, and overlay geometry.

use crate::types::{
    AnchorSide, ContainerPadding, HostAdjustment, LayoutMode, Placement, PlacementInput,
};

/// Pixels subtracted from the row height so the toolbar clears the row border.
pub const BORDER_COMPENSATION: f64 = 1.0;

/// Toolbar height used before a region has ever been opened.
pub const DEFAULT_TOOLBAR_HEIGHT: f64 = 48.0;

/// Anchor side for a region, or `None` when the region has no parent container.
///
/// `first_child` is `Some(is_first)` when the container could be inspected.
/// Callers treat `None` as "skip detection" and keep the trailing default.
pub fn detect_anchor(first_child: Option<bool>) -> Option<AnchorSide> {
    first_child.map(AnchorSide::from_first_child)
}

/// Padding compensation for a region anchored on `anchor`.
///
/// A leading region is shifted back over the leading padding and does not
/// grow; a trailing region grows to fill the cell and eats the trailing
/// padding with a negative margin.
pub fn host_adjustment(anchor: AnchorSide, padding: ContainerPadding) -> HostAdjustment {
    match anchor {
        AnchorSide::Leading => HostAdjustment {
            flex_grow: 0.0,
            leading_shift: -padding.leading,
            trailing_margin: 0.0,
        },
        AnchorSide::Trailing => HostAdjustment {
            flex_grow: 1.0,
            leading_shift: 0.0,
            trailing_margin: -padding.trailing,
        },
    }
}

/// Toolbar height for a row of the given measured height.
pub fn toolbar_height(row_height: f64) -> f64 {
    (row_height - BORDER_COMPENSATION).max(0.0)
}

/// Resolve the overlay geometry for an opening region.
///
/// In [`LayoutMode::Stretch`] the region spans the whole row, so the overlay
/// needs no vertical offset. In [`LayoutMode::FixedRow`] the offset moves the
/// overlay from the trigger's vertical center to the row's vertical center; a
/// missing trigger rectangle yields no offset.
pub fn resolve(input: &PlacementInput) -> Placement {
    let offset = match (input.mode, input.trigger) {
        (LayoutMode::FixedRow, Some(trigger)) => input.row.center().y - trigger.center().y,
        _ => 0.0,
    };
    Placement {
        alignment: input.anchor.alignment(),
        growth: input.anchor.growth(),
        offset,
        toolbar_height: toolbar_height(input.row.height()),
        adjustment: host_adjustment(input.anchor, input.padding),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alignment, Growth};
    use kurbo::Rect;

    fn input(anchor: AnchorSide, mode: LayoutMode, trigger: Option<Rect>) -> PlacementInput {
        PlacementInput {
            anchor,
            row: Rect::new(0.0, 100.0, 800.0, 152.0),
            trigger,
            padding: ContainerPadding::new(16.0, 24.0),
            mode,
        }
    }

    #[test]
    fn first_child_is_leading() {
        assert_eq!(detect_anchor(Some(true)), Some(AnchorSide::Leading));
        assert_eq!(detect_anchor(Some(false)), Some(AnchorSide::Trailing));
        assert_eq!(detect_anchor(None), None);
    }

    #[test]
    fn stretch_mode_uses_row_height_minus_border() {
        let p = resolve(&input(AnchorSide::Trailing, LayoutMode::Stretch, None));
        assert_eq!(p.toolbar_height, 51.0);
        assert_eq!(p.offset, 0.0);
        assert_eq!(p.alignment, Alignment::End);
        assert_eq!(p.growth, Growth::FromTrailing);
    }

    #[test]
    fn stretch_mode_ignores_trigger() {
        let trigger = Rect::new(700.0, 110.0, 800.0, 130.0);
        let p = resolve(&input(AnchorSide::Leading, LayoutMode::Stretch, Some(trigger)));
        assert_eq!(p.offset, 0.0);
        assert_eq!(p.alignment, Alignment::Start);
        assert_eq!(p.growth, Growth::FromLeading);
    }

    #[test]
    fn fixed_row_centers_on_row() {
        // Row center y = 126, trigger center y = 120.
        let trigger = Rect::new(700.0, 110.0, 800.0, 130.0);
        let p = resolve(&input(AnchorSide::Trailing, LayoutMode::FixedRow, Some(trigger)));
        assert_eq!(p.offset, 6.0);
        assert_eq!(p.toolbar_height, 51.0);
    }

    #[test]
    fn fixed_row_without_trigger_has_no_offset() {
        let p = resolve(&input(AnchorSide::Trailing, LayoutMode::FixedRow, None));
        assert_eq!(p.offset, 0.0);
    }

    #[test]
    fn degenerate_row_clamps_height() {
        let mut i = input(AnchorSide::Trailing, LayoutMode::Stretch, None);
        i.row = Rect::new(0.0, 0.0, 10.0, 0.5);
        assert_eq!(resolve(&i).toolbar_height, 0.0);
    }

    #[test]
    fn padding_compensation_follows_anchor() {
        let pad = ContainerPadding::new(16.0, 24.0);
        assert_eq!(
            host_adjustment(AnchorSide::Leading, pad),
            HostAdjustment {
                flex_grow: 0.0,
                leading_shift: -16.0,
                trailing_margin: 0.0
            }
        );
        assert_eq!(
            host_adjustment(AnchorSide::Trailing, pad),
            HostAdjustment {
                flex_grow: 1.0,
                leading_shift: 0.0,
                trailing_margin: -24.0
            }
        );
    }
}
