// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment interpolation and sample recency filtering.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use smallvec::SmallVec;

/// Contact points produced for one frame.
///
/// A frame rarely needs more than a handful of points, so short paths stay
/// inline.
pub type PathPoints = SmallVec<[Point; 8]>;

/// A pointer sample with its capture time in milliseconds.
///
/// Timestamps come from a host-owned monotonic clock; only differences are
/// ever interpreted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedPoint {
    /// Sampled pointer position in grid-pixel space.
    pub pos: Point,
    /// Capture timestamp in milliseconds.
    pub time_ms: u64,
}

/// Smallest permitted interpolation step, in pixels.
const MIN_STEP: f64 = 1.0;

/// Derives the interpolation step from the influence radius and the
/// user-facing "paint smoothness" setting.
///
/// The base step is half the influence radius: coarser than that and a fast
/// stroke can skip past a cell's influence zone entirely. Higher `smoothness`
/// divides the base step down, producing denser contact points. The exact
/// mapping is a tunable default rather than a contract; non-positive
/// `smoothness` falls back to the base step.
#[must_use]
pub fn step_size(influence_radius: f64, smoothness: f64) -> f64 {
    let base = (influence_radius * 0.5).max(MIN_STEP);
    if smoothness > 0.0 {
        (base / smoothness).max(MIN_STEP)
    } else {
        base
    }
}

/// Interpolates evenly spaced points along the segment from `p1` to `p2`.
///
/// Returns points at parameter `t = i / n` for `i = 0..=n` with
/// `n = ceil(distance / step)`, so the result starts at `p1` and ends at `p2`
/// and consecutive points are at most `step` apart.
///
/// If the segment is shorter than `step`, only `p2` is returned: a
/// near-stationary pointer contributes a single contact point rather than a
/// cluster of redundant ones.
///
/// `step` must be positive; a non-positive step degrades to returning `p2`.
#[must_use]
pub fn interpolate_points(p1: Point, p2: Point, step: f64) -> PathPoints {
    debug_assert!(step.is_finite(), "interpolation step must be finite");

    let mut out = PathPoints::new();
    let dist = p1.distance(p2);
    if !(step > 0.0) || dist < step {
        out.push(p2);
        return out;
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "dist/step >= 1.0 here and is bounded by viewport extents"
    )]
    let n = (dist / step).ceil() as usize;
    out.reserve(n + 1);
    for i in 0..=n {
        let t = i as f64 / n as f64;
        out.push(p1.lerp(p2, t));
    }
    out
}

/// Drops samples captured more than `max_age_ms` before `now_ms`.
///
/// Hosts that hand samples to the engine every frame never need this; it
/// exists for callers that accumulate samples across several frames and must
/// not replay stale motion.
pub fn retain_recent(points: &mut Vec<TimedPoint>, now_ms: u64, max_age_ms: u64) {
    points.retain(|p| now_ms.saturating_sub(p.time_ms) <= max_age_ms);
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn interpolation_fills_gaps_inclusively() {
        let points = interpolate_points(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 20.0);

        // distance 100 / step 20 = 5 segments, 6 points from t = 0 to t = 1.
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[5], Point::new(100.0, 0.0));
        for pair in points.windows(2) {
            assert!(
                (pair[0].distance(pair[1]) - 20.0).abs() < 1e-9,
                "points must be evenly spaced"
            );
        }
    }

    #[test]
    fn short_segment_emits_only_endpoint() {
        let p1 = Point::new(3.0, 4.0);
        let p2 = Point::new(5.0, 4.0);
        let points = interpolate_points(p1, p2, 10.0);
        assert_eq!(points.as_slice(), &[p2]);
    }

    #[test]
    fn zero_length_segment_emits_only_endpoint() {
        let p = Point::new(7.0, 7.0);
        let points = interpolate_points(p, p, 5.0);
        assert_eq!(points.as_slice(), &[p]);
    }

    #[test]
    fn non_integer_ratio_rounds_segment_count_up() {
        // distance 50 / step 20 = 2.5 → 3 segments, 4 points.
        let points = interpolate_points(Point::new(0.0, 0.0), Point::new(50.0, 0.0), 20.0);
        assert_eq!(points.len(), 4);
        assert_eq!(points[3], Point::new(50.0, 0.0));
    }

    #[test]
    fn step_size_shrinks_with_smoothness() {
        let coarse = step_size(100.0, 1.0);
        let fine = step_size(100.0, 4.0);
        assert_eq!(coarse, 50.0);
        assert_eq!(fine, 12.5);
        assert!(fine < coarse, "higher smoothness must yield a smaller step");

        // Non-positive smoothness falls back to the radius-derived base step.
        assert_eq!(step_size(100.0, 0.0), 50.0);
        // The step never collapses below one pixel.
        assert_eq!(step_size(0.5, 1000.0), 1.0);
    }

    #[test]
    fn recency_filter_drops_stale_samples() {
        let at = |time_ms: u64| TimedPoint {
            pos: Point::new(0.0, 0.0),
            time_ms,
        };
        let mut samples = vec![at(100), at(250), at(380), at(400)];

        retain_recent(&mut samples, 400, 150);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].time_ms, 250);

        // A clock that has not advanced keeps everything.
        retain_recent(&mut samples, 400, 150);
        assert_eq!(samples.len(), 3);
    }
}
