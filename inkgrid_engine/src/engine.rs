// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine proper: input collection and the per-frame tick.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use inkgrid_field::{DensityField, FieldConfig, GridLayout};
use inkgrid_path::{
    PathPoints, TimedPoint, VelocityTracker, interpolate_points, retain_recent, step_size,
};
use inkgrid_subdivide::{level_for_density, subdivide};
use kurbo::Point;

use crate::{BaseCell, FrameSnapshot, SubdividedCell};

/// Pointer samples older than this at tick time are dropped, not replayed.
const MAX_SAMPLE_AGE_MS: u64 = 200;

/// Cancellation handle for the frame loop.
///
/// The host's recurring frame callback keeps rescheduling itself; tearing the
/// view down must stop it without racing a queued tick. The handle shares a
/// flag with its [`Engine`]; [`cancel`](Self::cancel) makes every subsequent
/// [`Engine::tick`] a no-op that returns the last snapshot, so no partial
/// update is ever observable after cancellation.
#[derive(Clone, Debug)]
pub struct TickHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TickHandle {
    /// Stops the engine: subsequent ticks no longer mutate state.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// The frame-driven density-grid engine.
///
/// Owns the density field, the velocity estimate, and the pointer samples
/// accumulated since the previous frame. See the crate docs for the calling
/// protocol.
#[derive(Debug)]
pub struct Engine {
    cfg: FieldConfig,
    pending_cfg: Option<FieldConfig>,
    viewport: (f64, f64),
    layout: GridLayout,
    field: DensityField,
    velocity: VelocityTracker,
    /// Last known pointer position; `None` after a leave event.
    pointer: Option<Point>,
    /// Samples received since the previous tick.
    pending: Vec<TimedPoint>,
    last_tick_ms: Option<u64>,
    snapshot: FrameSnapshot,
    cancelled: Rc<Cell<bool>>,
}

impl Engine {
    /// Creates an engine with the given configuration and an empty viewport.
    ///
    /// Call [`set_viewport`](Self::set_viewport) before the first tick;
    /// until then the grid has no cells and snapshots are empty.
    #[must_use]
    pub fn new(cfg: FieldConfig) -> Self {
        let layout = GridLayout::from_viewport(0.0, 0.0, cfg.base_cell_size);
        let field = DensityField::new(&layout);
        Self {
            cfg,
            pending_cfg: None,
            viewport: (0.0, 0.0),
            layout,
            field,
            velocity: VelocityTracker::new(),
            pointer: None,
            pending: Vec::new(),
            last_tick_ms: None,
            snapshot: FrameSnapshot::default(),
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    /// Returns a cancellation handle for the frame loop.
    #[must_use]
    pub fn tick_handle(&self) -> TickHandle {
        TickHandle {
            cancelled: Rc::clone(&self.cancelled),
        }
    }

    /// The configuration in effect for the current frame.
    #[must_use]
    pub const fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    /// The current base-cell layout.
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// The most recent snapshot (empty before the first tick).
    #[must_use]
    pub const fn snapshot(&self) -> &FrameSnapshot {
        &self.snapshot
    }

    /// Read access to the underlying density field.
    #[must_use]
    pub const fn field(&self) -> &DensityField {
        &self.field
    }

    /// Replaces the configuration; takes effect at the next tick.
    pub fn set_config(&mut self, cfg: FieldConfig) {
        self.pending_cfg = Some(cfg);
    }

    /// Resizes the grid to cover a `width` × `height` viewport.
    ///
    /// The base-cell set is fully determined by viewport and cell size, so the
    /// layout and field are recomputed from scratch; accumulated density does
    /// not survive a resize.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
        self.rebuild_grid();
    }

    /// Records a pointer movement to `pos` (grid-pixel space) at `time_ms`.
    pub fn pointer_moved(&mut self, pos: Point, time_ms: u64) {
        self.velocity.sample(pos, time_ms);
        self.pending.push(TimedPoint { pos, time_ms });
    }

    /// Records that the pointer left the grid.
    ///
    /// Pending samples are dropped, the stationary contact point is cleared,
    /// and the velocity estimate resets to zero immediately.
    pub fn pointer_left(&mut self) {
        self.pending.clear();
        self.pointer = None;
        self.velocity.reset();
    }

    /// Advances the simulation by one frame and returns the new snapshot.
    ///
    /// `now_ms` is the host's monotonic time. The elapsed time since the
    /// previous tick is integrated, capped at `inkgrid_field::MAX_FRAME_DT`
    /// by the field update. A cancelled engine returns its last snapshot
    /// unchanged.
    pub fn tick(&mut self, now_ms: u64) -> &FrameSnapshot {
        if self.cancelled.get() {
            return &self.snapshot;
        }

        if let Some(cfg) = self.pending_cfg.take() {
            let resize = cfg.base_cell_size != self.cfg.base_cell_size;
            self.cfg = cfg;
            if resize {
                self.rebuild_grid();
            }
        }

        let dt_s = match self.last_tick_ms {
            Some(prev) => now_ms.saturating_sub(prev) as f64 / 1000.0,
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);

        let contacts = self.collect_contacts(now_ms);
        self.velocity.idle_tick(now_ms);
        self.field.step(
            &self.layout,
            &self.cfg,
            &contacts,
            self.velocity.speed(),
            now_ms,
            dt_s,
        );

        self.snapshot = self.build_snapshot(now_ms);
        &self.snapshot
    }

    /// Turns the pending samples into this frame's contact points.
    ///
    /// Consecutive samples are interpolated segment by segment so fast strokes
    /// leave no gaps; junction points shared by two segments are emitted once.
    /// With no new samples, the last known position is the frame's single
    /// contact point — a stationary pointer keeps painting until it leaves.
    fn collect_contacts(&mut self, now_ms: u64) -> PathPoints {
        retain_recent(&mut self.pending, now_ms, MAX_SAMPLE_AGE_MS);

        let step = step_size(self.cfg.influence_radius, self.cfg.interpolation_density);
        let mut contacts = PathPoints::new();
        for sample in self.pending.drain(..) {
            match self.pointer {
                Some(prev) => {
                    let segment = interpolate_points(prev, sample.pos, step);
                    let skip = usize::from(!contacts.is_empty() && segment.len() > 1);
                    contacts.extend(segment.into_iter().skip(skip));
                }
                None => contacts.push(sample.pos),
            }
            self.pointer = Some(sample.pos);
        }

        if contacts.is_empty()
            && let Some(pos) = self.pointer
        {
            contacts.push(pos);
        }
        contacts
    }

    fn rebuild_grid(&mut self) {
        let (width, height) = self.viewport;
        self.layout = GridLayout::from_viewport(width, height, self.cfg.base_cell_size);
        self.field = DensityField::new(&self.layout);
        self.snapshot = FrameSnapshot::default();
    }

    fn build_snapshot(&self, now_ms: u64) -> FrameSnapshot {
        let max_level = self.cfg.clamped_max_level();
        let mut base_cells = Vec::with_capacity(self.layout.len());
        let mut subdivided = Vec::new();

        for (col, row) in self.layout.coords() {
            let density = self.field.density(col, row);
            let level = level_for_density(density, max_level);
            let bounds = self.layout.cell_bounds(col, row);
            base_cells.push(BaseCell {
                col,
                row,
                bounds,
                density,
                level,
            });
            if level > 0 {
                subdivided.extend(subdivide(bounds, level).into_iter().map(|rect| {
                    SubdividedCell {
                        bounds: rect,
                        level,
                        base_col: col,
                        base_row: row,
                        density,
                    }
                }));
            }
        }

        FrameSnapshot {
            frame_ms: now_ms,
            base_cells,
            subdivided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: u64 = 50;

    fn engine_300x300() -> Engine {
        // 3×3 grid of 100 px cells; tight radius so tests stay local.
        let cfg = FieldConfig {
            base_cell_size: 100.0,
            influence_radius: 40.0,
            ..FieldConfig::default()
        };
        let mut engine = Engine::new(cfg);
        engine.set_viewport(300.0, 300.0);
        engine
    }

    /// Ticks `frames` frames at 50 ms starting after `start_ms`, returning the
    /// final timestamp.
    fn run(engine: &mut Engine, start_ms: u64, frames: u64) -> u64 {
        let mut now = start_ms;
        for _ in 0..frames {
            now += FRAME_MS;
            engine.tick(now);
        }
        now
    }

    #[test]
    fn empty_engine_produces_empty_snapshots() {
        let mut engine = Engine::new(FieldConfig::default());
        let snapshot = engine.tick(16);
        assert!(snapshot.base_cells.is_empty());
        assert!(snapshot.subdivided.is_empty());
    }

    #[test]
    fn stationary_pointer_paints_its_cell_through_silent_frames() {
        let mut engine = engine_300x300();
        let center = engine.layout().cell_center(1, 1);

        // One move event, then nothing but frames: density keeps growing.
        engine.pointer_moved(center, 0);
        run(&mut engine, 0, 20);
        let after_1s = engine.field().density(1, 1);
        assert!(after_1s > 0.3, "expected steady painting, got {after_1s}");

        run(&mut engine, 1000, 40);
        assert!(
            engine.field().density(1, 1) > after_1s,
            "painting must continue while the pointer rests in place"
        );
    }

    #[test]
    fn pointer_leave_stops_painting() {
        let mut engine = engine_300x300();
        let center = engine.layout().cell_center(1, 1);
        engine.pointer_moved(center, 0);
        let now = run(&mut engine, 0, 10);
        let painted = engine.field().density(1, 1);
        assert!(painted > 0.0, "precondition: some paint accumulated");

        engine.pointer_left();
        // Within the hold window density is frozen, not growing.
        let _ = run(&mut engine, now, 5);
        assert_eq!(engine.field().density(1, 1), painted);
    }

    #[test]
    fn fast_stroke_paints_intermediate_cells() {
        let mut engine = engine_300x300();
        // One frame jumps across the full grid; interpolation has to touch
        // the middle column on the way.
        engine.pointer_moved(Point::new(50.0, 150.0), 0);
        engine.tick(FRAME_MS);
        engine.pointer_moved(Point::new(250.0, 150.0), 60);
        engine.tick(2 * FRAME_MS);

        assert!(
            engine.field().density(1, 1) > 0.0,
            "interpolated contact points must cover the gap"
        );
    }

    #[test]
    fn snapshot_levels_and_subdivision_follow_density() {
        let mut engine = engine_300x300();
        let center = engine.layout().cell_center(0, 0);
        engine.pointer_moved(center, 0);
        // 3 s of painting at 0.4/s saturates the cell.
        run(&mut engine, 0, 60);

        let max_level = engine.config().clamped_max_level();
        let snapshot = engine.snapshot();
        let cell = snapshot.base_cells[0];
        assert_eq!((cell.col, cell.row), (0, 0));
        assert!((cell.density - 1.0).abs() < 1e-9);
        assert_eq!(cell.level, max_level);

        let leaves: Vec<_> = snapshot
            .subdivided
            .iter()
            .filter(|c| (c.base_col, c.base_row) == (0, 0))
            .collect();
        assert_eq!(leaves.len(), 1 << max_level);
        for leaf in leaves {
            assert_eq!(leaf.level, max_level);
            assert_eq!(leaf.density, cell.density);
        }

        // Border rendering: each subdivided cell contributes 2^level - 1 cuts.
        let lines = snapshot.split_lines();
        let from_corner = lines
            .iter()
            .filter(|l| (l.base_col, l.base_row) == (0, 0))
            .count();
        assert_eq!(from_corner, (1 << max_level) - 1);
    }

    #[test]
    fn cancellation_freezes_the_engine() {
        let mut engine = engine_300x300();
        let handle = engine.tick_handle();
        let center = engine.layout().cell_center(1, 1);
        engine.pointer_moved(center, 0);
        let now = run(&mut engine, 0, 10);
        let frozen = engine.snapshot().clone();

        handle.cancel();
        assert!(handle.is_cancelled());
        engine.pointer_moved(center, now + 10);
        let after = engine.tick(now + FRAME_MS);
        assert_eq!(*after, frozen, "cancelled ticks must not mutate state");
    }

    #[test]
    fn config_swap_takes_effect_next_tick() {
        let mut engine = engine_300x300();
        let old_radius = engine.config().influence_radius;
        engine.set_config(FieldConfig {
            influence_radius: 5.0,
            base_cell_size: 100.0,
            ..FieldConfig::default()
        });
        // Not yet applied: the running frame still sees the old snapshot.
        assert_eq!(engine.config().influence_radius, old_radius);

        engine.tick(FRAME_MS);
        assert_eq!(engine.config().influence_radius, 5.0);
    }

    #[test]
    fn cell_size_change_rebuilds_the_grid() {
        let mut engine = engine_300x300();
        let center = engine.layout().cell_center(1, 1);
        engine.pointer_moved(center, 0);
        run(&mut engine, 0, 10);
        assert!(engine.field().density(1, 1) > 0.0, "precondition");

        engine.set_config(FieldConfig {
            base_cell_size: 50.0,
            ..*engine.config()
        });
        engine.tick(1000);
        assert_eq!(engine.layout().cols(), 6);
        // Accumulated density does not survive a grid rebuild; with the
        // pointer still resting in place only one frame of paint exists.
        let relocated = engine.field().density(3, 3);
        assert!(relocated < 0.05, "rebuild must reset density, got {relocated}");
    }

    #[test]
    fn viewport_resize_resets_state() {
        let mut engine = engine_300x300();
        let center = engine.layout().cell_center(1, 1);
        engine.pointer_moved(center, 0);
        run(&mut engine, 0, 10);

        engine.set_viewport(200.0, 200.0);
        assert_eq!(engine.layout().cols(), 2);
        assert!(engine.snapshot().base_cells.is_empty());
        for (col, row) in engine.layout().coords() {
            assert_eq!(engine.field().density(col, row), 0.0);
        }
    }

    #[test]
    fn frame_stall_is_capped() {
        let mut engine = engine_300x300();
        let center = engine.layout().cell_center(1, 1);
        engine.pointer_moved(center, 0);
        engine.tick(0);

        // A 10 s stall integrates as one capped frame, not 10 s of painting.
        engine.tick(10_000);
        let density = engine.field().density(1, 1);
        assert!(
            (density - 0.04).abs() < 1e-9,
            "0.4/s over the 0.1 s cap, got {density}"
        );
    }

    #[test]
    fn stale_samples_are_not_replayed() {
        let mut engine = engine_300x300();
        // A sample far in the past relative to the first tick is dropped and
        // leaves no stationary contact behind.
        engine.pointer_moved(engine.layout().cell_center(0, 0), 0);
        engine.tick(5_000);
        engine.tick(5_050);
        assert_eq!(engine.field().density(0, 0), 0.0);
    }
}
