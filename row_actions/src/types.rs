// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: region and row identities, region states, timer tasks, and tracker signals.

/// Identifier for a region in a [`Registry`](crate::registry::Registry).
///
/// A small, copyable handle made of a slot index and a generation counter.
/// When a region is destroyed its slot is freed; a later region reusing the
/// slot gets a higher generation, so a stale `RegionId` never reaches it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegionId(pub(crate) u32, pub(crate) u32);

impl RegionId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "RegionId stores 32-bit slot indices."
    )]
    pub(crate) const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Opaque identity of the row that owns a region.
///
/// Regions with equal keys belong to the same row and never close each other.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub u64);

/// Lifecycle state of a region's toolbar.
///
/// ```text
///            row move                 open timer
///  Closed ─────────────▶ OpeningPending ─────────▶ Open
///    ▲                                            │  ▲
///    │ close timer                   pointer out  │  │ pointer back / row move
///    └──────────────────── ClosingPending ◀───────┘  │
///                                │                   │
///                                └───────────────────┘
/// ```
///
/// Any state drops straight to `Closed` when a region on another row is hovered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegionState {
    /// Toolbar hidden, no timer armed.
    #[default]
    Closed,
    /// Toolbar hidden, open timer armed.
    OpeningPending,
    /// Toolbar shown.
    Open,
    /// Toolbar shown, close timer armed.
    ClosingPending,
}

impl RegionState {
    /// Whether the toolbar is on screen in this state.
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Open | Self::ClosingPending)
    }
}

/// The two debounce timers a region can own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Delay between hovering a row and showing its toolbar.
    Open,
    /// Delay between leaving a row and hiding its toolbar.
    Close,
}

/// Payload carried by every armed timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerTask {
    /// Region that armed the timer.
    pub region: RegionId,
    /// Which of the region's timers this is.
    pub kind: TimerKind,
}

/// Whether the pointer lies within a subscribed region's row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    /// Pointer is within the row bounds (edges included).
    Inside,
    /// Pointer is outside the row bounds, or the row can no longer be located.
    Outside,
}

/// Change to the single process-wide pointer listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerChange {
    /// The first subscriber arrived; start listening for pointer movement.
    Attached,
    /// The last subscriber left; stop listening.
    Detached,
}
