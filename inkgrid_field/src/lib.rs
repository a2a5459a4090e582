// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkgrid Field: the density-field simulation core.
//!
//! A sparse-ish scalar field over a bounded grid of base cells, advanced once
//! per frame. Each base cell carries a density in `[0, 1]` that grows while
//! pointer contact points fall inside the configured influence radius and
//! shrinks again after a hold window once painting stops, producing
//! paint-like trails that persist and fade.
//!
//! The pieces, leaf-first:
//!
//! - [`FieldConfig`]: the immutable-per-frame snapshot of all tunables.
//! - [`GridLayout`]: viewport → base-cell geometry (columns, rows, bounds,
//!   centers). Recomputed whenever the viewport changes, never persisted.
//! - [`increase_rate`] / [`velocity_multiplier`]: pointer proximity (and
//!   speed) → density growth per second, with linear radial falloff.
//! - [`decay_multiplier`]: elapsed time since the last paint → decay ramp,
//!   with a hold window followed by an exponential approach to full decay.
//! - [`DensityField`]: the per-cell state arena and its frame update, which
//!   applies increase then decay then clamping for every cell.
//!
//! Frame-rate independence is part of the contract: all rates are per-second
//! and are integrated against a delta time that is capped *before* any rate
//! multiplication (see [`MAX_FRAME_DT`]), so a stalled frame cannot produce a
//! catch-up jump.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod decay;
mod field;
mod increase;
mod layout;

pub use config::FieldConfig;
pub use decay::decay_multiplier;
pub use field::{CellState, DensityField, MAX_FRAME_DT};
pub use increase::{REFERENCE_SPEED, averaged_increase_rate, increase_rate, velocity_multiplier};
pub use layout::GridLayout;
