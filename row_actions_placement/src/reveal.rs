// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal animation: a clip-inset sweep from the anchored edge.
//!
//! ## Overview
//!
//! The toolbar appears by un-clipping itself from the edge it is anchored to.
//! [`Reveal`] describes that animation as data (keyframe insets, duration,
//! easing, corner radii) so a renderer can drive it with its own clock.
//!
//! Insets are fractions of the overlay size: `1.0` on the left edge means the
//! whole overlay is clipped away from the left.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Insets;
//! use row_actions_placement::{Growth, reveal::Reveal};
//!
//! let r = Reveal::enter(Growth::FromTrailing);
//! assert_eq!(r.clip_at(Duration::ZERO), Insets::new(1.0, 0.0, 0.0, 0.0));
//! assert_eq!(r.clip_at(r.duration), Insets::ZERO);
//! ```

use core::time::Duration;

use kurbo::{Insets, RoundedRectRadii};

use crate::types::Growth;

/// Radius large enough to turn a toolbar end into a half-pill.
pub const PILL_RADIUS: f64 = 9999.0;

/// Duration of the reveal sweep.
pub const REVEAL_DURATION: Duration = Duration::from_millis(250);

/// A CSS-style cubic Bézier timing function with fixed end points `(0, 0)` and `(1, 1)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezier {
    /// First control point x, in `[0, 1]`.
    pub x1: f64,
    /// First control point y.
    pub y1: f64,
    /// Second control point x, in `[0, 1]`.
    pub x2: f64,
    /// Second control point y.
    pub y2: f64,
}

impl CubicBezier {
    /// Material "standard decelerate" curve, `cubic-bezier(0.0, 0.0, 0.2, 1.0)`.
    pub const DECELERATE: Self = Self::new(0.0, 0.0, 0.2, 1.0);

    /// Identity timing.
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a timing function from its two control points.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        // Bernstein form with P0 = 0 and P3 = 1.
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Eased progress for linear progress `x`, clamped to `[0, 1]`.
    pub fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(x);
        Self::sample(self.y1, self.y2, t)
    }

    /// Parameter `t` whose curve x equals `x`: Newton first, bisection if it stalls.
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;
        let mut t = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, t) - x;
            if err < EPSILON && err > -EPSILON {
                return t;
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d < 1e-6 && d > -1e-6 {
                break;
            }
            t -= err / d;
        }
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let v = Self::sample(self.x1, self.x2, t);
            let err = v - x;
            if err < EPSILON && err > -EPSILON {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        t
    }
}

/// Reveal animation descriptor for an overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reveal {
    /// Edge the overlay grows from.
    pub growth: Growth,
    /// Clip insets at the start of the animation.
    pub from: Insets,
    /// Clip insets at the end of the animation.
    pub to: Insets,
    /// Length of the animation.
    pub duration: Duration,
    /// Timing function.
    pub easing: CubicBezier,
    /// Corner radii: rounded on the free end, square on the anchored end.
    pub radii: RoundedRectRadii,
}

impl Reveal {
    /// Enter animation growing from `growth`'s edge.
    pub fn enter(growth: Growth) -> Self {
        Self {
            growth,
            from: collapsed(growth),
            to: Insets::ZERO,
            duration: REVEAL_DURATION,
            easing: CubicBezier::DECELERATE,
            radii: radii_for(growth),
        }
    }

    /// The same sweep played backwards, collapsing into the anchored edge.
    pub fn exit(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            ..self
        }
    }

    /// Clip insets `elapsed` into the animation. Saturates at both ends.
    pub fn clip_at(&self, elapsed: Duration) -> Insets {
        let linear = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        let p = self.easing.ease(linear);
        Insets::new(
            lerp(self.from.x0, self.to.x0, p),
            lerp(self.from.y0, self.to.y0, p),
            lerp(self.from.x1, self.to.x1, p),
            lerp(self.from.y1, self.to.y1, p),
        )
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn collapsed(growth: Growth) -> Insets {
    match growth {
        // Fully clipped from the left; un-clips towards the left edge.
        Growth::FromTrailing => Insets::new(1.0, 0.0, 0.0, 0.0),
        Growth::FromLeading => Insets::new(0.0, 0.0, 1.0, 0.0),
    }
}

fn radii_for(growth: Growth) -> RoundedRectRadii {
    match growth {
        Growth::FromTrailing => RoundedRectRadii::new(PILL_RADIUS, 0.0, 0.0, PILL_RADIUS),
        Growth::FromLeading => RoundedRectRadii::new(0.0, PILL_RADIUS, PILL_RADIUS, 0.0),
    }
}
