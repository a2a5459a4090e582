// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive halving of rectangles and the dividing lines it introduces.

use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};

use crate::MAX_LEVEL;

/// One dividing line introduced by a split, tagged with the depth at which it
/// was introduced.
///
/// Depths are 1-based: the base cell's own border is the renderer's "level 0",
/// the first cut inside it has `level == 1`, and so on up to the target level.
/// Each cut plane is emitted exactly once, so a renderer can stroke level 1
/// first and overlay progressively lighter lines for deeper levels without
/// duplicate strokes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitLine {
    /// The cut segment, spanning the rectangle that was split.
    pub line: Line,
    /// Depth at which this cut was introduced (1-based).
    pub level: u8,
}

/// Splits `rect` once along its longer axis.
///
/// Wider-than-tall rectangles are cut vertically into side-by-side halves,
/// everything else horizontally into stacked halves. Ties (squares) cut
/// horizontally. The two halves share the cut coordinate exactly, so their
/// union reproduces the input and their interiors are disjoint.
fn split_once(rect: &Rect) -> (Rect, Rect, Line) {
    if rect.width() > rect.height() {
        let mid = rect.x0 + rect.width() * 0.5;
        (
            Rect::new(rect.x0, rect.y0, mid, rect.y1),
            Rect::new(mid, rect.y0, rect.x1, rect.y1),
            Line::new(Point::new(mid, rect.y0), Point::new(mid, rect.y1)),
        )
    } else {
        let mid = rect.y0 + rect.height() * 0.5;
        (
            Rect::new(rect.x0, rect.y0, rect.x1, mid),
            Rect::new(rect.x0, mid, rect.x1, rect.y1),
            Line::new(Point::new(rect.x0, mid), Point::new(rect.x1, mid)),
        )
    }
}

/// Rectangles with no positive area are terminal; splitting them further is
/// ill-defined.
fn is_degenerate(rect: &Rect) -> bool {
    !(rect.width() > 0.0 && rect.height() > 0.0)
}

/// Recursively partitions `rect` into `2^level` leaf rectangles.
///
/// Each recursion step re-evaluates the aspect ratio and splits along the
/// longer axis, so the cut orientation alternates as the pieces approach
/// square. The leaves exactly cover `rect` and their interiors partition it.
///
/// `level` is clamped to [`MAX_LEVEL`]. Degenerate rectangles (width or
/// height ≤ 0) are returned as-is, even below the target level.
#[must_use]
pub fn subdivide(rect: Rect, level: u8) -> Vec<Rect> {
    let level = level.min(MAX_LEVEL);
    let mut out = Vec::with_capacity(1_usize << level);
    split_into(rect, level, &mut out);
    out
}

fn split_into(rect: Rect, remaining: u8, out: &mut Vec<Rect>) {
    if remaining == 0 || is_degenerate(&rect) {
        out.push(rect);
        return;
    }
    let (a, b, _) = split_once(&rect);
    split_into(a, remaining - 1, out);
    split_into(b, remaining - 1, out);
}

/// Walks the subdivision of `rect` to `level` but collects only the dividing
/// lines, one per split, tagged with the depth that introduced them.
///
/// For a non-degenerate rectangle this yields exactly `2^level - 1` lines.
/// Degenerate sub-rectangles stop contributing, matching [`subdivide`].
#[must_use]
pub fn split_lines(rect: Rect, level: u8) -> Vec<SplitLine> {
    let level = level.min(MAX_LEVEL);
    let mut out = Vec::new();
    if level > 0 {
        out.reserve((1_usize << level) - 1);
    }
    collect_lines(rect, level, 1, &mut out);
    out
}

fn collect_lines(rect: Rect, target: u8, depth: u8, out: &mut Vec<SplitLine>) {
    if depth > target || is_degenerate(&rect) {
        return;
    }
    let (a, b, line) = split_once(&rect);
    out.push(SplitLine { line, level: depth });
    collect_lines(a, target, depth + 1, out);
    collect_lines(b, target, depth + 1, out);
}
