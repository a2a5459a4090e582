// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cell density state and the once-per-frame update.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use crate::{FieldConfig, GridLayout, averaged_increase_rate, decay_multiplier};

/// Upper bound on the delta time integrated in one frame, in seconds.
///
/// Applied before any rate multiplication. A stalled frame (for example a
/// backgrounded host) integrates at most this much simulated time instead of
/// replaying the whole gap as one catch-up jump.
pub const MAX_FRAME_DT: f64 = 0.1;

/// Density state of one base cell.
///
/// `None` for `last_painted_ms` means the cell has never been painted and is
/// treated as painted infinitely long ago.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellState {
    /// Accumulated paint intensity, always in `[0, 1]`.
    pub density: f64,
    /// Timestamp of the last frame in which this cell received any non-zero
    /// increase contribution, in host milliseconds.
    pub last_painted_ms: Option<u64>,
}

/// The density field: one [`CellState`] slot per base cell, row-major.
///
/// The grid is bounded and fully determined by the viewport, so the field is
/// a fixed-size arena indexed by `(row, col)` rather than an associative map;
/// slots start at zero density and are never removed. The field is rebuilt
/// (dropping all state) whenever the viewport changes.
///
/// Within a frame the field is exclusively owned by the update step; renderers
/// read it only between frames.
#[derive(Clone, Debug)]
pub struct DensityField {
    cells: Vec<CellState>,
    cols: usize,
    rows: usize,
}

impl DensityField {
    /// Creates a zeroed field matching `layout`.
    #[must_use]
    pub fn new(layout: &GridLayout) -> Self {
        Self {
            cells: vec![CellState::default(); layout.len()],
            cols: layout.cols(),
            rows: layout.rows(),
        }
    }

    /// Number of base cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the field has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// State of the cell at (`col`, `row`). Both coordinates must be in range.
    #[must_use]
    pub fn state(&self, col: usize, row: usize) -> CellState {
        debug_assert!(col < self.cols && row < self.rows, "cell out of range");
        self.cells[row * self.cols + col]
    }

    /// Density of the cell at (`col`, `row`).
    #[must_use]
    pub fn density(&self, col: usize, row: usize) -> f64 {
        self.state(col, row).density
    }

    /// Advances every cell by one frame.
    ///
    /// `contacts` are this frame's paint contact points (raw or interpolated),
    /// `speed` the smoothed pointer speed in px/s, `now_ms` the frame
    /// timestamp, and `dt_s` the elapsed time since the previous frame in
    /// seconds (capped at [`MAX_FRAME_DT`]).
    ///
    /// Per cell, in order: the averaged increase contribution is added and
    /// `last_painted_ms` refreshed if that contribution was non-zero, then the
    /// time-based decay decrement is subtracted, then density is clamped to
    /// `[0, 1]`. Cells are mutually independent; no cross-cell ordering is
    /// observable.
    pub fn step(
        &mut self,
        layout: &GridLayout,
        cfg: &FieldConfig,
        contacts: &[Point],
        speed: f64,
        now_ms: u64,
        dt_s: f64,
    ) {
        debug_assert!(
            layout.cols() == self.cols && layout.rows() == self.rows,
            "layout does not match this field; rebuild the field on viewport changes"
        );
        debug_assert!(dt_s.is_finite() && dt_s >= 0.0, "dt must be finite and >= 0");
        let dt = dt_s.min(MAX_FRAME_DT);

        for (slot, (col, row)) in layout.coords().enumerate() {
            let cell = &mut self.cells[slot];

            let rate = averaged_increase_rate(layout.cell_center(col, row), contacts, cfg, speed);
            if rate > 0.0 {
                cell.density += rate * dt;
                cell.last_painted_ms = Some(now_ms);
            }

            let since_s = match cell.last_painted_ms {
                Some(t) => now_ms.saturating_sub(t) as f64 / 1000.0,
                None => f64::INFINITY,
            };
            let decrement =
                cfg.decay_rate * cfg.decay_multiplier * decay_multiplier(since_s, cfg) * dt;
            cell.density = (cell.density - decrement).clamp(0.0, 1.0);
        }
    }
}
