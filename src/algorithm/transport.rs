//! One-shot source-to-target particle assignment and its time-parameterized motion
//!
//! The layout pass places both images in the viewport, samples the source
//! on a stride chosen to stay near the particle budget, and matches each
//! sampled pixel to an approximately nearest-colored target pixel. Frames are
//! then a pure function of a progress value in `[0, 1]`.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::matching::TargetPixelIndex;
use crate::algorithm::particle::{Particle, Primitive};
use crate::io::configuration::{
    JITTER_FRACTION, MATCH_SAMPLES, PARTICLE_BUDGET, SIZE_JITTER, VIEWPORT_FILL,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::color::is_transparent;
use crate::math::easing::ease_out_cubic;
use crate::spatial::{PixelGrid, Placement, Viewport};

/// Parameters of the layout pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportConfig {
    /// Approximate number of particles to emit
    pub particle_budget: usize,
    /// Random target candidates examined per particle
    pub match_samples: usize,
    /// Fraction of the viewport each image's longest relevant side occupies
    pub viewport_fill: f32,
    /// End-position jitter as a fraction of the target's per-pixel scale
    pub jitter_fraction: f32,
    /// Relative spread of particle sizes around their base size
    pub size_jitter: f32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            particle_budget: PARTICLE_BUDGET,
            match_samples: MATCH_SAMPLES,
            viewport_fill: VIEWPORT_FILL,
            jitter_fraction: JITTER_FRACTION,
            size_jitter: SIZE_JITTER,
        }
    }
}

impl TransportConfig {
    /// Check that the parameters describe a usable layout
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `particle_budget` or `match_samples` is zero
    /// - `viewport_fill` is not in `(0, 1]`
    /// - `jitter_fraction` is negative or not finite
    /// - `size_jitter` is not in `[0, 1)`
    pub fn validate(&self) -> Result<()> {
        if self.particle_budget == 0 {
            return Err(invalid_parameter(
                "particle_budget",
                &self.particle_budget,
                &"must be at least 1",
            ));
        }
        if self.match_samples == 0 {
            return Err(invalid_parameter(
                "match_samples",
                &self.match_samples,
                &"must be at least 1",
            ));
        }
        if !(self.viewport_fill > 0.0 && self.viewport_fill <= 1.0) {
            return Err(invalid_parameter(
                "viewport_fill",
                &self.viewport_fill,
                &"must be in (0, 1]",
            ));
        }
        if !(self.jitter_fraction.is_finite() && self.jitter_fraction >= 0.0) {
            return Err(invalid_parameter(
                "jitter_fraction",
                &self.jitter_fraction,
                &"must be a non-negative number",
            ));
        }
        if !(0.0..1.0).contains(&self.size_jitter) {
            return Err(invalid_parameter(
                "size_jitter",
                &self.size_jitter,
                &"must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

/// Pixel stride that keeps the sampled count near `budget`
///
/// `max(1, floor(1 / sqrt(budget / (width * height))))`
pub fn sampling_stride(width: usize, height: usize, budget: usize) -> usize {
    let pixels = (width * height) as f64;
    if pixels == 0.0 || budget == 0 {
        return 1;
    }
    let stride = (1.0 / (budget as f64 / pixels).sqrt()).floor();
    (stride as usize).max(1)
}

/// Immutable particle set with endpoints fixed by the layout pass
#[derive(Debug, Clone)]
pub struct ParticleTransport {
    particles: Vec<Particle>,
    stride: usize,
    source_placement: Placement,
    target_placement: Placement,
}

impl ParticleTransport {
    /// Run the full layout pass for a source and target image
    ///
    /// Every non-transparent source pixel on the sampling stride becomes one
    /// particle. Its end position is the display position of the best of
    /// `match_samples` random opaque target pixels, jittered on both axes. A
    /// fully transparent target leaves every particle at its start.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn build_assignment(
        source: &PixelGrid,
        target: &PixelGrid,
        viewport: Viewport,
        config: &TransportConfig,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);

        let source_placement =
            Placement::fit(source.width(), source.height(), viewport, config.viewport_fill);
        let target_placement =
            Placement::fit(target.width(), target.height(), viewport, config.viewport_fill);
        let stride = sampling_stride(source.width(), source.height(), config.particle_budget);

        let index = TargetPixelIndex::build(target, &target_placement);
        if index.is_empty() {
            tracing::warn!("target has no opaque pixels, particles will stay in place");
        }

        let jitter_bound = config.jitter_fraction * target_placement.scale;
        let base_size = source_placement.scale * stride as f32;
        let mut particles = Vec::with_capacity(
            source.width().div_ceil(stride) * source.height().div_ceil(stride),
        );

        for y in (0..source.height()).step_by(stride) {
            for x in (0..source.width()).step_by(stride) {
                let Some(start_color) = source.get(x, y) else {
                    continue;
                };
                if is_transparent(start_color) {
                    continue;
                }

                let start_position = source_placement.to_display(x, y);
                let (end_position, end_color) =
                    match index.sample_nearest(start_color, config.match_samples, &mut rng) {
                        Some(matched) => (
                            [
                                matched.position[0] + symmetric(&mut rng, jitter_bound),
                                matched.position[1] + symmetric(&mut rng, jitter_bound),
                            ],
                            matched.color,
                        ),
                        None => (start_position, start_color),
                    };
                let size = base_size * (1.0 + symmetric(&mut rng, config.size_jitter));

                particles.push(Particle {
                    start_position,
                    start_color,
                    end_position,
                    end_color,
                    size,
                });
            }
        }

        tracing::debug!(
            particles = particles.len(),
            stride,
            candidates = index.len(),
            "particle layout built"
        );

        Ok(Self {
            particles,
            stride,
            source_placement,
            target_placement,
        })
    }

    /// Draw records for every particle at progress `t`
    ///
    /// `t` is clamped to `[0, 1]` and eased with ease-out-cubic. Colors stay
    /// at each particle's start color. Pure in `t`: repeated or decreasing
    /// values are fine.
    pub fn positions_at(&self, t: f32) -> Vec<Primitive> {
        let eased = ease_out_cubic(t);
        self.particles
            .iter()
            .map(|particle| particle.primitive_at(eased))
            .collect()
    }

    /// All particles in source row-major order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when the source had no sampled opaque pixels
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Source sampling stride used by the layout
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Display placement of the source image
    pub const fn source_placement(&self) -> Placement {
        self.source_placement
    }

    /// Display placement of the target image
    pub const fn target_placement(&self) -> Placement {
        self.target_placement
    }
}

// Uniform in [-bound, bound]; draws nothing when the bound is zero
fn symmetric<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> f32 {
    if bound > 0.0 {
        rng.random_range(-bound..=bound)
    } else {
        0.0
    }
}
