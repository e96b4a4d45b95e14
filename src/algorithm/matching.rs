//! Approximate nearest-color lookup over the opaque pixels of a target image

use rand::Rng;

use crate::math::color::{Rgba, color_distance_squared, is_transparent};
use crate::spatial::{PixelGrid, Placement};

/// A target pixel color paired with its display position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPixel {
    /// Pixel color
    pub color: Rgba,
    /// Display position under the target's placement
    pub position: [f32; 2],
}

/// Flat candidate pool of every opaque target pixel
///
/// Built once per layout pass and dropped when the pass ends.
#[derive(Debug, Clone, Default)]
pub struct TargetPixelIndex {
    entries: Vec<IndexedPixel>,
}

impl TargetPixelIndex {
    /// Index every target pixel with nonzero alpha
    pub fn build(target: &PixelGrid, placement: &Placement) -> Self {
        let entries = target
            .iter()
            .filter(|&(_, _, color)| !is_transparent(color))
            .map(|(x, y, color)| IndexedPixel {
                color,
                position: placement.to_display(x, y),
            })
            .collect();

        Self { entries }
    }

    /// Number of indexed pixels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the target has no opaque pixels
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed pixels in row-major order
    pub fn entries(&self) -> &[IndexedPixel] {
        &self.entries
    }

    /// Best color match among `samples` uniform draws with replacement
    ///
    /// This is deliberately not exhaustive: cost is `O(samples)` regardless of
    /// target size. Ties keep the earliest draw. Returns `None` when the index
    /// is empty or `samples` is zero.
    pub fn sample_nearest<R: Rng + ?Sized>(
        &self,
        color: Rgba,
        samples: usize,
        rng: &mut R,
    ) -> Option<&IndexedPixel> {
        if self.entries.is_empty() {
            return None;
        }

        let mut best: Option<(u32, &IndexedPixel)> = None;
        for _ in 0..samples {
            let Some(candidate) = self.entries.get(rng.random_range(0..self.entries.len())) else {
                continue;
            };
            let distance = color_distance_squared(color, candidate.color);
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((distance, candidate));
            }
        }

        best.map(|(_, pixel)| pixel)
    }
}
