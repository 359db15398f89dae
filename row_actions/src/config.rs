// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration: per-region options, debounce timing, and coordinator settings.
//!
//! All types have sensible defaults. With the `serde` feature they can also be
//! deserialized; names are validated through the same parsers used by
//! [`FromStr`], so a bad variant or an absurd delay is rejected at load time.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use row_actions_placement::LayoutMode;

use crate::error::ConfigError;
use crate::types::TimerKind;

/// Default open and close debounce delay.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// Longest accepted debounce delay.
pub const MAX_DELAY: Duration = Duration::from_secs(10);

/// Visual theming token for a region's toolbar.
///
/// The coordinator never looks at it; it is carried so the presentation layer
/// can read it back from [`RegionConfig`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "String")
)]
pub enum Variant {
    /// Surface-container background.
    #[default]
    Default,
    /// Primary-container background.
    Filled,
    /// Secondary-container background.
    Tonal,
}

impl Variant {
    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Filled => "filled",
            Self::Tonal => "tonal",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    /// Parses a variant name. The empty string means [`Variant::Default`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "default" => Ok(Self::Default),
            "filled" => Ok(Self::Filled),
            "tonal" => Ok(Self::Tonal),
            other => Err(ConfigError::UnknownVariant(other.to_owned())),
        }
    }
}

impl TryFrom<String> for Variant {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Options for a single region, fixed at construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct RegionConfig {
    /// Suppress all interaction: the region never arms a timer and never becomes visible.
    pub disabled: bool,
    /// Show and hide the toolbar instantly instead of animating the reveal.
    pub animation_disabled: bool,
    /// Theming token passed through to the presentation layer.
    pub variant: Variant,
}

impl RegionConfig {
    /// Default options: enabled, animated, default variant.
    pub const fn new() -> Self {
        Self {
            disabled: false,
            animation_disabled: false,
            variant: Variant::Default,
        }
    }

    /// Set [`disabled`](Self::disabled).
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set [`animation_disabled`](Self::animation_disabled).
    #[must_use]
    pub const fn with_animation_disabled(mut self, animation_disabled: bool) -> Self {
        self.animation_disabled = animation_disabled;
        self
    }

    /// Set [`variant`](Self::variant).
    #[must_use]
    pub const fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

/// Debounce delays shared by every region of a coordinator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "TimingMillis")
)]
pub struct Timing {
    open_delay: Duration,
    close_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            open_delay: DEFAULT_DELAY,
            close_delay: DEFAULT_DELAY,
        }
    }
}

impl Timing {
    /// Validate and build a timing pair. Zero delays are allowed.
    pub fn new(open_delay: Duration, close_delay: Duration) -> Result<Self, ConfigError> {
        check_delay("open_delay", open_delay)?;
        check_delay("close_delay", close_delay)?;
        Ok(Self {
            open_delay,
            close_delay,
        })
    }

    /// Delay between a row hover and the toolbar appearing.
    pub const fn open_delay(&self) -> Duration {
        self.open_delay
    }

    /// Delay between leaving the row and the toolbar disappearing.
    pub const fn close_delay(&self) -> Duration {
        self.close_delay
    }

    /// Delay for the given timer kind.
    pub const fn delay(&self, kind: TimerKind) -> Duration {
        match kind {
            TimerKind::Open => self.open_delay,
            TimerKind::Close => self.close_delay,
        }
    }
}

fn check_delay(field: &'static str, delay: Duration) -> Result<(), ConfigError> {
    if delay > MAX_DELAY {
        return Err(ConfigError::DelayTooLong {
            field,
            millis: delay.as_millis(),
            max: MAX_DELAY.as_millis(),
        });
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TimingMillis {
    open_delay_ms: u64,
    close_delay_ms: u64,
}

#[cfg(feature = "serde")]
impl Default for TimingMillis {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "DEFAULT_DELAY is a small constant."
    )]
    fn default() -> Self {
        let ms = DEFAULT_DELAY.as_millis() as u64;
        Self {
            open_delay_ms: ms,
            close_delay_ms: ms,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<TimingMillis> for Timing {
    type Error = ConfigError;

    fn try_from(raw: TimingMillis) -> Result<Self, Self::Error> {
        Self::new(
            Duration::from_millis(raw.open_delay_ms),
            Duration::from_millis(raw.close_delay_ms),
        )
    }
}

/// Parse a [`LayoutMode`] name.
///
/// Accepts `stretch` (alias `flex`) and `fixed_row` (aliases `fixed-row`, `native`).
pub fn parse_layout_mode(s: &str) -> Result<LayoutMode, ConfigError> {
    match s.trim() {
        "stretch" | "flex" => Ok(LayoutMode::Stretch),
        "fixed_row" | "fixed-row" | "native" => Ok(LayoutMode::FixedRow),
        other => Err(ConfigError::UnknownLayoutMode(other.to_owned())),
    }
}

#[cfg(feature = "serde")]
fn deserialize_layout_mode<'de, D>(d: D) -> Result<LayoutMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = <String as serde::Deserialize>::deserialize(d)?;
    parse_layout_mode(&s).map_err(serde::de::Error::custom)
}

/// Settings shared by all regions of a [`Coordinator`](crate::coordinator::Coordinator).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct CoordinatorConfig {
    /// Debounce delays.
    pub timing: Timing,
    /// How the hosting table sizes the regions.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_layout_mode"))]
    pub layout_mode: LayoutMode,
}
