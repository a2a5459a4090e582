// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame output consumed by renderers.

use alloc::vec::Vec;

use inkgrid_subdivide::split_lines;
use kurbo::{Line, Rect};

/// One base grid cell with its resolved density and subdivision level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseCell {
    /// Grid column of the cell.
    pub col: usize,
    /// Grid row of the cell.
    pub row: usize,
    /// Axis-aligned bounds of the cell in grid-pixel space.
    pub bounds: Rect,
    /// Resolved density in `[0, 1]`.
    pub density: f64,
    /// Subdivision level derived from the density.
    pub level: u8,
}

/// One leaf rectangle of a subdivided base cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubdividedCell {
    /// Bounds of this leaf rectangle.
    pub bounds: Rect,
    /// Subdivision depth of the owning base cell (all leaves share it).
    pub level: u8,
    /// Column of the owning base cell, stable across subdivision.
    pub base_col: usize,
    /// Row of the owning base cell, stable across subdivision.
    pub base_row: usize,
    /// The owning base cell's density, carried for heat-map coloring only.
    pub density: f64,
}

/// One dividing line of a subdivided base cell, for layered border rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSplitLine {
    /// The cut segment in grid-pixel space.
    pub line: Line,
    /// Depth at which the cut was introduced (1-based; the base cell border
    /// is the renderer's level 0).
    pub level: u8,
    /// Column of the owning base cell.
    pub base_col: usize,
    /// Row of the owning base cell.
    pub base_row: usize,
}

/// Everything a renderer needs for one frame.
///
/// Built from scratch each tick and swapped in whole; holders of a snapshot
/// never see a partially updated frame. `subdivided` lists leaf rectangles
/// only for base cells whose level is above zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    /// Timestamp of the tick that produced this snapshot, in host
    /// milliseconds.
    pub frame_ms: u64,
    /// All base cells in row-major order.
    pub base_cells: Vec<BaseCell>,
    /// Leaf rectangles of every subdivided base cell.
    pub subdivided: Vec<SubdividedCell>,
}

impl FrameSnapshot {
    /// Collects the dividing lines of every subdivided base cell.
    ///
    /// Computed on demand: renderers that fill leaf rectangles never pay for
    /// it, while border-layering renderers get each cut exactly once, tagged
    /// with the level that introduced it.
    #[must_use]
    pub fn split_lines(&self) -> Vec<CellSplitLine> {
        let mut out = Vec::new();
        for cell in self.base_cells.iter().filter(|c| c.level > 0) {
            out.extend(
                split_lines(cell.bounds, cell.level)
                    .into_iter()
                    .map(|cut| CellSplitLine {
                        line: cut.line,
                        level: cut.level,
                        base_col: cell.col,
                        base_row: cell.row,
                    }),
            );
        }
        out
    }
}
