// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkgrid Subdivide: density → recursive cell geometry.
//!
//! This crate maps a base cell's density to an integer subdivision level and
//! expands that level into concrete geometry:
//!
//! - [`level_for_density`] is the pure, monotone density → level mapping.
//! - [`subdivide`] recursively halves a rectangle into `2^level` leaves. Each
//!   step splits along the longer axis (vertical cut when the rectangle is
//!   wider than tall, horizontal otherwise), re-evaluated after every split,
//!   which biases successive levels toward square sub-cells.
//! - [`split_lines`] walks the same recursion but emits only the cut segment
//!   each split introduces, tagged with its depth, for renderers that layer
//!   per-level borders instead of redrawing leaf rectangles.
//!
//! All inputs are pre-validated elsewhere; this crate only defends against the
//! degenerate cases that would make the recursion ill-defined. Rectangles with
//! non-positive width or height are treated as terminal even below the target
//! level, and levels are clamped to [`MAX_LEVEL`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

mod split;

pub use split::{SplitLine, split_lines, subdivide};

/// Deepest supported subdivision level; `2^12` leaves per base cell.
pub const MAX_LEVEL: u8 = 12;

/// Maps a density in `[0, 1]` to a subdivision level in `[0, max_level]`.
///
/// `floor(density * max_level)`, clamped. Monotone and deterministic: density
/// `0.0` maps to level 0 and density `1.0` to `max_level`. Out-of-range
/// densities are clamped first, and `max_level` itself is capped at
/// [`MAX_LEVEL`].
#[must_use]
pub fn level_for_density(density: f64, max_level: u8) -> u8 {
    let max_level = max_level.min(MAX_LEVEL);
    if max_level == 0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the product is clamped to [0, 12] before the cast"
    )]
    let level = (density.clamp(0.0, 1.0) * f64::from(max_level))
        .floor()
        .clamp(0.0, f64::from(max_level)) as u8;
    level
}
