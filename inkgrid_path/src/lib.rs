// Copyright 2026 the Inkgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkgrid Path: pointer-path plumbing for the density engine.
//!
//! This crate turns a raw stream of pointer samples into the per-frame inputs
//! the density field consumes:
//!
//! - [`interpolate_points`] densifies the segment between two pointer
//!   positions into evenly spaced contact points, so fast strokes do not leave
//!   gaps between frames.
//! - [`step_size`] derives the interpolation spacing from the influence radius
//!   and the user-facing "paint smoothness" setting.
//! - [`retain_recent`] is a recency filter for hosts that accumulate
//!   timestamped samples across frames instead of consuming them immediately.
//! - [`VelocityTracker`] maintains a jitter-free pixels-per-second estimate of
//!   pointer speed, used to boost density accumulation for fast strokes.
//!
//! Positions are [`kurbo::Point`]s in the host's grid-pixel space; timestamps
//! are milliseconds on a host-owned monotonic clock.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod interp;
mod velocity;

pub use interp::{PathPoints, TimedPoint, interpolate_points, retain_recent, step_size};
pub use velocity::VelocityTracker;
