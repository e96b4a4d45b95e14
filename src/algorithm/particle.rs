//! Particle records produced by the transport layout pass

use crate::math::color::Rgba;
use crate::math::easing::lerp;

/// One sampled source pixel and the target position it travels to
///
/// Immutable once built; only the derived current position changes per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Display position of the source pixel
    pub start_position: [f32; 2],
    /// Source pixel color, used for display throughout the motion
    pub start_color: Rgba,
    /// Display position of the matched target pixel, jittered
    pub end_position: [f32; 2],
    /// Matched target pixel color (informational)
    pub end_color: Rgba,
    /// Side length of the drawn square in display units
    pub size: f32,
}

impl Particle {
    /// Position after `eased` of the way from start to end
    pub fn position_at(&self, eased: f32) -> [f32; 2] {
        [
            lerp(self.start_position[0], self.end_position[0], eased),
            lerp(self.start_position[1], self.end_position[1], eased),
        ]
    }

    /// Draw record for this particle at the given eased progress
    pub fn primitive_at(&self, eased: f32) -> Primitive {
        Primitive {
            position: self.position_at(eased),
            size: self.size,
            color: self.start_color,
        }
    }
}

/// Positioned, sized and colored point handed to the renderer each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    /// Top-left corner in display coordinates
    pub position: [f32; 2],
    /// Side length in display units
    pub size: f32,
    /// Fill color
    pub color: Rgba,
}
