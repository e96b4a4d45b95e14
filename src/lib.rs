//! Procedural image morphing toward a fixed target image
//!
//! Two engines turn a source image into the target: a stochastic optimizer
//! that repaints a working copy with translucent disks, keeping only edits
//! that reduce color error, and a particle matcher that sends every sampled
//! source pixel to an approximately nearest-colored target position.

#![forbid(unsafe_code)]

/// Both transformation engines and the per-frame driver boundary
pub mod algorithm;
/// Asset loading, recording, CLI and error handling
pub mod io;
/// Color scoring, compositing and easing
pub mod math;
/// Pixel grids and viewport placement
pub mod spatial;

pub use io::error::{Result, TrufflifyError};
