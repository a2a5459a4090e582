// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Smoothed pointer-speed estimation.

use kurbo::Point;

/// Weight given to the newest instantaneous speed in the moving average.
const EMA_NEW_WEIGHT: f64 = 0.3;

/// Silence longer than this (milliseconds) counts as an idle pointer.
const IDLE_THRESHOLD_MS: u64 = 50;

/// Multiplicative decay applied to the estimate once per idle frame.
const IDLE_DECAY: f64 = 0.7;

/// A smoothed estimate of pointer speed in pixels per second.
///
/// Raw pointer samples arrive at uneven intervals and the instantaneous speed
/// between consecutive samples is noisy. The tracker blends each new reading
/// into an exponential moving average, and decays the estimate toward zero
/// while no samples arrive, so the speed falls off promptly when the pointer
/// stops instead of freezing at its last value.
#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityTracker {
    speed: f64,
    last: Option<(Point, u64)>,
}

impl VelocityTracker {
    /// Creates a tracker with a zero estimate and no prior sample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw pointer sample into the estimate.
    ///
    /// The instantaneous speed over the interval since the previous sample is
    /// blended into the running average. Samples with the same timestamp as
    /// the previous one only refresh the stored position.
    pub fn sample(&mut self, pos: Point, now_ms: u64) {
        if let Some((prev_pos, prev_ms)) = self.last {
            let dt_ms = now_ms.saturating_sub(prev_ms);
            if dt_ms > 0 {
                let instantaneous = prev_pos.distance(pos) / (dt_ms as f64 / 1000.0);
                self.speed = EMA_NEW_WEIGHT * instantaneous + (1.0 - EMA_NEW_WEIGHT) * self.speed;
            }
        }
        self.last = Some((pos, now_ms));
    }

    /// Advances the idle decay; call once per frame.
    ///
    /// If no sample has arrived for more than the idle threshold, the estimate
    /// is scaled down multiplicatively rather than waiting for a sample that
    /// may never come.
    pub fn idle_tick(&mut self, now_ms: u64) {
        if let Some((_, last_ms)) = self.last
            && now_ms.saturating_sub(last_ms) > IDLE_THRESHOLD_MS
        {
            self.speed *= IDLE_DECAY;
        }
    }

    /// Resets the estimate to zero, e.g. on pointer leave.
    pub fn reset(&mut self) {
        self.speed = 0.0;
        self.last = None;
    }

    /// Current speed estimate in pixels per second. Never negative.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_establishes_baseline_without_speed() {
        let mut tracker = VelocityTracker::new();
        tracker.sample(Point::new(10.0, 10.0), 1000);
        assert_eq!(tracker.speed(), 0.0);
    }

    #[test]
    fn steady_motion_converges_on_instantaneous_speed() {
        let mut tracker = VelocityTracker::new();
        // 10 px every 10 ms = 1000 px/s.
        for i in 0..100_u64 {
            tracker.sample(Point::new(10.0 * i as f64, 0.0), i * 10);
        }
        assert!(
            (tracker.speed() - 1000.0).abs() < 1.0,
            "EMA should converge near 1000 px/s, got {}",
            tracker.speed()
        );
    }

    #[test]
    fn blend_weights_new_reading_at_point_three() {
        let mut tracker = VelocityTracker::new();
        tracker.sample(Point::new(0.0, 0.0), 0);
        // 100 px in 100 ms = 1000 px/s; estimate was 0.
        tracker.sample(Point::new(100.0, 0.0), 100);
        assert!((tracker.speed() - 300.0).abs() < 1e-9);
        // Stationary for 100 ms = 0 px/s instantaneous: 0.7 * 300.
        tracker.sample(Point::new(100.0, 0.0), 200);
        assert!((tracker.speed() - 210.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_timestamp_does_not_divide_by_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.sample(Point::new(0.0, 0.0), 100);
        tracker.sample(Point::new(50.0, 0.0), 100);
        assert_eq!(tracker.speed(), 0.0);
    }

    #[test]
    fn idle_decay_kicks_in_after_threshold() {
        let mut tracker = VelocityTracker::new();
        tracker.sample(Point::new(0.0, 0.0), 0);
        tracker.sample(Point::new(100.0, 0.0), 100);
        let before = tracker.speed();
        assert!(before > 0.0, "precondition: non-zero estimate");

        // Within the threshold nothing changes.
        tracker.idle_tick(120);
        assert_eq!(tracker.speed(), before);

        // Past the threshold the estimate decays each frame.
        tracker.idle_tick(200);
        assert!((tracker.speed() - before * 0.7).abs() < 1e-9);
        tracker.idle_tick(216);
        assert!((tracker.speed() - before * 0.49).abs() < 1e-9);
    }

    #[test]
    fn reset_zeroes_the_estimate_immediately() {
        let mut tracker = VelocityTracker::new();
        tracker.sample(Point::new(0.0, 0.0), 0);
        tracker.sample(Point::new(100.0, 0.0), 50);
        assert!(tracker.speed() > 0.0, "precondition: non-zero estimate");

        tracker.reset();
        assert_eq!(tracker.speed(), 0.0);

        // The next sample after a reset starts a fresh baseline.
        tracker.sample(Point::new(500.0, 0.0), 60);
        assert_eq!(tracker.speed(), 0.0);
    }
}
