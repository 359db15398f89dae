// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! Coordination itself never fails: missing geometry degrades to defaults and
//! redundant calls are no-ops. The only fallible surface is turning
//! user-supplied configuration into typed values.

use thiserror::Error;

/// Error produced while parsing or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The toolbar variant name is not recognized.
    #[error("unknown toolbar variant `{0}` (expected `default`, `filled` or `tonal`)")]
    UnknownVariant(String),
    /// The layout mode name is not recognized.
    #[error("unknown layout mode `{0}` (expected `stretch` or `fixed_row`)")]
    UnknownLayoutMode(String),
    /// A debounce delay is longer than [`MAX_DELAY`](crate::config::MAX_DELAY).
    #[error("{field} of {millis} ms exceeds the {max} ms limit")]
    DelayTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Requested delay in milliseconds.
        millis: u128,
        /// Largest accepted delay in milliseconds.
        max: u128,
    },
}
