// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-derived base-cell geometry.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

/// The base-cell grid implied by a viewport and a cell size.
///
/// The grid is fully determined by its inputs: `ceil(viewport / cell)` cells
/// per axis, each `cell_size` square, anchored at the origin. The last column
/// and row may overhang the viewport edge. Layouts are cheap value types that
/// are recomputed whenever the viewport changes; nothing in them persists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    cols: usize,
    rows: usize,
    cell_size: f64,
}

impl GridLayout {
    /// Computes the grid covering a `width` × `height` viewport with square
    /// cells of `cell_size` pixels.
    ///
    /// Non-positive viewport extents yield an empty grid; `cell_size` must be
    /// positive.
    #[must_use]
    pub fn from_viewport(width: f64, height: f64, cell_size: f64) -> Self {
        debug_assert!(
            cell_size > 0.0,
            "grid cell_size must be strictly positive, got {cell_size}"
        );
        let count = |extent: f64| {
            if extent > 0.0 && cell_size > 0.0 {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "ceil of a positive viewport/cell ratio fits comfortably in usize"
                )]
                let n = (extent / cell_size).ceil() as usize;
                n
            } else {
                0
            }
        };
        Self {
            cols: count(width),
            rows: count(height),
            cell_size,
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Edge length of one base cell, in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Total number of base cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major slot index of the cell at (`col`, `row`).
    ///
    /// Both coordinates must be in range.
    #[must_use]
    pub fn slot(&self, col: usize, row: usize) -> usize {
        debug_assert!(col < self.cols && row < self.rows, "cell out of range");
        row * self.cols + col
    }

    /// Axis-aligned bounds of the cell at (`col`, `row`).
    #[must_use]
    pub fn cell_bounds(&self, col: usize, row: usize) -> Rect {
        let size = self.cell_size();
        let x0 = col as f64 * size;
        let y0 = row as f64 * size;
        Rect::new(x0, y0, x0 + size, y0 + size)
    }

    /// Center point of the cell at (`col`, `row`).
    #[must_use]
    pub fn cell_center(&self, col: usize, row: usize) -> Point {
        let size = self.cell_size();
        Point::new((col as f64 + 0.5) * size, (row as f64 + 0.5) * size)
    }

    /// Iterates all (`col`, `row`) coordinates in row-major slot order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_counts_round_up() {
        let layout = GridLayout::from_viewport(800.0, 600.0, 40.0);
        assert_eq!(layout.cols(), 20);
        assert_eq!(layout.rows(), 15);
        assert_eq!(layout.len(), 300);

        // A partial trailing cell still counts.
        let layout = GridLayout::from_viewport(801.0, 601.0, 40.0);
        assert_eq!(layout.cols(), 21);
        assert_eq!(layout.rows(), 16);
    }

    #[test]
    fn degenerate_viewport_yields_empty_grid() {
        let layout = GridLayout::from_viewport(0.0, 600.0, 40.0);
        assert!(layout.is_empty());
        let layout = GridLayout::from_viewport(-10.0, -10.0, 40.0);
        assert!(layout.is_empty());
    }

    #[test]
    fn bounds_and_centers_tile_the_plane() {
        let layout = GridLayout::from_viewport(120.0, 80.0, 40.0);
        assert_eq!(layout.cell_bounds(0, 0), Rect::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(layout.cell_bounds(2, 1), Rect::new(80.0, 40.0, 120.0, 80.0));
        assert_eq!(layout.cell_center(0, 0), Point::new(20.0, 20.0));
        assert_eq!(layout.cell_center(2, 1), Point::new(100.0, 60.0));
    }

    #[test]
    fn slot_order_is_row_major() {
        let layout = GridLayout::from_viewport(120.0, 80.0, 40.0);
        assert_eq!(layout.slot(0, 0), 0);
        assert_eq!(layout.slot(2, 0), 2);
        assert_eq!(layout.slot(0, 1), 3);

        let coords: alloc::vec::Vec<_> = layout.coords().collect();
        assert_eq!(coords.len(), layout.len());
        assert_eq!(coords[0], (0, 0));
        assert_eq!(coords[3], (0, 1));
        for (i, &(col, row)) in coords.iter().enumerate() {
            assert_eq!(layout.slot(col, row), i, "coords() must follow slot order");
        }
    }
}
