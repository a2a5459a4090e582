// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives the engine through a synthetic stroke and prints the grid.
//!
//! The "pointer" sweeps a diagonal across a 480×320 viewport, rests for a
//! moment, then leaves. After each phase the base grid is printed as an ASCII
//! heat map (subdivision level per cell), showing densification under the
//! stroke and the hold-then-fade behavior afterwards.

use inkgrid_engine::Engine;
use inkgrid_field::FieldConfig;
use kurbo::Point;

const FRAME_MS: u64 = 16;

fn print_grid(engine: &Engine, label: &str) {
    let layout = engine.layout();
    println!("--- {label} ---");
    for row in 0..layout.rows() {
        let mut line = String::with_capacity(layout.cols());
        for col in 0..layout.cols() {
            let cell = &engine.snapshot().base_cells[row * layout.cols() + col];
            line.push(if cell.level == 0 {
                '.'
            } else {
                char::from_digit(u32::from(cell.level), 16).unwrap_or('?')
            });
        }
        println!("{line}");
    }
    println!(
        "subdivided rects: {}, split lines: {}",
        engine.snapshot().subdivided.len(),
        engine.snapshot().split_lines().len()
    );
}

fn main() {
    let mut engine = Engine::new(FieldConfig {
        base_cell_size: 40.0,
        influence_radius: 60.0,
        velocity_influence: 2.0,
        ..FieldConfig::default()
    });
    engine.set_viewport(480.0, 320.0);
    let handle = engine.tick_handle();

    let mut now = 0_u64;

    // Phase 1: a diagonal stroke over one second.
    for i in 0..60_u64 {
        now += FRAME_MS;
        let t = i as f64 / 59.0;
        engine.pointer_moved(Point::new(40.0 + 400.0 * t, 40.0 + 240.0 * t), now);
        engine.tick(now);
    }
    print_grid(&engine, "after stroke");

    // Phase 2: rest at the end of the stroke for two seconds.
    for _ in 0..125_u64 {
        now += FRAME_MS;
        engine.tick(now);
    }
    print_grid(&engine, "after resting");

    // Phase 3: pointer leaves; the trail holds, then fades.
    engine.pointer_left();
    for _ in 0..250_u64 {
        now += FRAME_MS;
        engine.tick(now);
    }
    print_grid(&engine, "four seconds after leaving");

    handle.cancel();
    assert!(engine.tick(now + FRAME_MS).frame_ms <= now, "engine is stopped");
}
