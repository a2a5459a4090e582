// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elapsed time since painting → decay ramp.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::FieldConfig;

/// Time-based decay multiplier in `[0, 1)` for a cell last painted
/// `time_since_painted_s` seconds ago.
///
/// While the hold window (`cfg.hold_duration`) has not elapsed the multiplier
/// is exactly `0.0`: freshly painted cells are frozen. Past the window the
/// multiplier ramps as `1 - exp(-(t - hold) * decay_acceleration / 2)`,
/// strictly increasing and approaching `1.0` asymptotically. Larger
/// `decay_acceleration` reaches full decay speed sooner.
///
/// Pass `f64::INFINITY` for a cell that has never been painted; the ramp
/// saturates at `1.0` there, which is harmless since such cells hold zero
/// density.
#[must_use]
pub fn decay_multiplier(time_since_painted_s: f64, cfg: &FieldConfig) -> f64 {
    if time_since_painted_s < cfg.hold_duration {
        return 0.0;
    }
    1.0 - (-(time_since_painted_s - cfg.hold_duration) * cfg.decay_acceleration * 0.5).exp()
}
