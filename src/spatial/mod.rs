//! Spatial data structures
//!
//! This module contains:
//! - The RGBA pixel grid both engines operate on
//! - Viewport placement of images for display-space layout

/// Fixed-size RGBA pixel grid
pub mod grid;
/// Scale and offset of an image inside a viewport
pub mod placement;

pub use grid::PixelGrid;
pub use placement::{Placement, Viewport};
