// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer proximity → density growth rate.

use kurbo::Point;

use crate::FieldConfig;

/// Pointer speed (px/s) treated as "fast" for the velocity boost.
///
/// Speeds are normalized against this before the boost curve is applied;
/// anything at or above it receives the full configured boost.
pub const REFERENCE_SPEED: f64 = 1000.0;

/// Velocity boost factor for the given smoothed pointer speed.
///
/// Returns `1.0` (no boost) when `velocity_influence <= 1.0` — the feature is
/// off. Otherwise the speed is normalized against [`REFERENCE_SPEED`], clamped
/// to `[0, 1]`, and cubed, and the result interpolates between `1.0` and
/// `velocity_influence`. Cubing keeps slow and moderate movement near `1.0`
/// and confines the boost to genuinely fast strokes, so "faster strokes paint
/// harder" without making a slow hover disproportionately strong.
#[must_use]
pub fn velocity_multiplier(speed: f64, cfg: &FieldConfig) -> f64 {
    if cfg.velocity_influence <= 1.0 {
        return 1.0;
    }
    let normalized = (speed / REFERENCE_SPEED).clamp(0.0, 1.0);
    let boost = normalized * normalized * normalized;
    1.0 + (cfg.velocity_influence - 1.0) * boost
}

/// Density growth rate, in density units per second, for a cell at `distance`
/// pixels from a contact point.
///
/// Zero at and beyond the influence radius; inside it the rate falls off
/// linearly with distance and is scaled by the configured base rate,
/// multiplier, and [`velocity_multiplier`]. A non-positive influence radius
/// means "no influence" rather than a division error.
#[must_use]
pub fn increase_rate(distance: f64, cfg: &FieldConfig, speed: f64) -> f64 {
    if cfg.influence_radius <= 0.0 || distance >= cfg.influence_radius {
        return 0.0;
    }
    let falloff = 1.0 - distance / cfg.influence_radius;
    cfg.increase_rate * cfg.increase_multiplier * falloff * velocity_multiplier(speed, cfg)
}

/// Mean growth rate for a cell centered at `center` over all of one frame's
/// contact points.
///
/// Each contact is evaluated independently and the rates are averaged, never
/// summed: a fast stroke interpolated into many points clustered near one
/// cell must not accumulate faster than a single touch would.
#[must_use]
pub fn averaged_increase_rate(
    center: Point,
    contacts: &[Point],
    cfg: &FieldConfig,
    speed: f64,
) -> f64 {
    if contacts.is_empty() {
        return 0.0;
    }
    let sum: f64 = contacts
        .iter()
        .map(|contact| increase_rate(contact.distance(center), cfg, speed))
        .sum();
    sum / contacts.len() as f64
}
