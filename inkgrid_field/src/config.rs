// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable parameters for the density simulation.

/// Hard upper bound on the subdivision depth a configuration may request.
pub(crate) const MAX_SUBDIVISION_LEVEL: u8 = 12;

/// Immutable-per-frame snapshot of all simulation tunables.
///
/// The surrounding application owns the configuration (typically bound to UI
/// sliders) and may replace it at any time; the engine reads a snapshot at the
/// top of each frame and never writes it. Range validation is the host's
/// responsibility; the simulation guards the few values whose misuse would be
/// more than cosmetic (zero influence radius, oversized subdivision level).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    /// Edge length of one base grid cell, in pixels. Must be positive.
    pub base_cell_size: f64,
    /// Density growth at distance zero, in density units per second.
    pub increase_rate: f64,
    /// Host-facing scale applied on top of [`increase_rate`](Self::increase_rate).
    pub increase_multiplier: f64,
    /// Density shrink once decay is fully ramped, in density units per second.
    pub decay_rate: f64,
    /// Host-facing scale applied on top of [`decay_rate`](Self::decay_rate).
    pub decay_multiplier: f64,
    /// Radius around a contact point inside which cells gain density, in
    /// pixels. Non-positive values disable increase entirely.
    pub influence_radius: f64,
    /// Maximum velocity boost factor. Values at or below `1.0` turn the
    /// velocity boost off.
    pub velocity_influence: f64,
    /// User-facing "paint smoothness": higher values interpolate the pointer
    /// path more densely. See `inkgrid_path::step_size`.
    pub interpolation_density: f64,
    /// Grace period after painting during which a cell does not decay, in
    /// seconds.
    pub hold_duration: f64,
    /// How quickly decay ramps to full speed after the hold window. Larger is
    /// faster.
    pub decay_acceleration: f64,
    /// Deepest subdivision level a fully dense cell reaches. Clamped to
    /// `[0, 12]` wherever it is consumed.
    pub max_subdivision_level: u8,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            base_cell_size: 40.0,
            increase_rate: 0.4,
            increase_multiplier: 1.0,
            decay_rate: 0.25,
            decay_multiplier: 1.0,
            influence_radius: 100.0,
            velocity_influence: 1.0,
            interpolation_density: 1.0,
            hold_duration: 1.5,
            decay_acceleration: 5.0,
            max_subdivision_level: 4,
        }
    }
}

impl FieldConfig {
    /// The configured subdivision ceiling, clamped to the supported range.
    #[must_use]
    pub fn clamped_max_level(&self) -> u8 {
        self.max_subdivision_level.min(MAX_SUBDIVISION_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_rates() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.increase_rate, 0.4);
        assert_eq!(cfg.decay_rate, 0.25);
        assert_eq!(cfg.hold_duration, 1.5);
        assert_eq!(cfg.decay_acceleration, 5.0);
        assert_eq!(cfg.velocity_influence, 1.0);
    }

    #[test]
    fn max_level_is_clamped_to_supported_range() {
        let cfg = FieldConfig {
            max_subdivision_level: 200,
            ..FieldConfig::default()
        };
        assert_eq!(cfg.clamped_max_level(), 12);
        assert_eq!(FieldConfig::default().clamped_max_level(), 4);
    }
}
