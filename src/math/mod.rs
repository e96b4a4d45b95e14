//! Mathematical utilities shared by the engines

/// Color distance and alpha compositing
pub mod color;
/// Easing curves and interpolation
pub mod easing;

pub use color::Rgba;
