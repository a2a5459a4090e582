// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkgrid Engine: the frame-driven density-grid controller.
//!
//! This crate wires the Inkgrid pieces into a single host-driven engine:
//! pointer samples go in, and once per frame a [`FrameSnapshot`] comes out,
//! carrying every base cell's density and subdivision level plus the
//! subdivided rectangles a renderer fills or strokes.
//!
//! The engine is single-threaded and cooperative. The host owns the clock and
//! the frame callback (a browser's animation frame, a compositor vsync, a
//! game loop) and calls:
//!
//! - [`Engine::pointer_moved`] / [`Engine::pointer_left`] as input arrives,
//! - [`Engine::set_viewport`] / [`Engine::set_config`] when the surface or
//!   settings change, and
//! - [`Engine::tick`] once per frame with the current monotonic time.
//!
//! Each tick reads one config snapshot, interpolates the pointer path into
//! contact points, advances the velocity estimate, steps the density field
//! (increase, then decay, then clamp, per cell), and swaps in a freshly built
//! snapshot as a whole — a renderer never observes a half-updated frame.
//!
//! A recurring frame callback is awkward to stop from the outside, so the
//! engine exposes a [`TickHandle`] with a cancellation flag that is checked at
//! the top of every tick; after [`TickHandle::cancel`] the engine stops
//! mutating state and keeps returning the last snapshot.
//!
//! ## Minimal example
//!
//! ```rust
//! use inkgrid_engine::Engine;
//! use inkgrid_field::FieldConfig;
//! use kurbo::Point;
//!
//! let mut engine = Engine::new(FieldConfig::default());
//! engine.set_viewport(800.0, 600.0);
//!
//! // Host event loop: feed pointer samples, tick once per frame.
//! engine.pointer_moved(Point::new(400.0, 300.0), 16);
//! let snapshot = engine.tick(16);
//! assert_eq!(snapshot.base_cells.len(), 20 * 15);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod snapshot;

pub use engine::{Engine, TickHandle};
pub use snapshot::{BaseCell, CellSplitLine, FrameSnapshot, SubdividedCell};
