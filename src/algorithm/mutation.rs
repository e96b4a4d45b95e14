//! Stochastic hill-climbing that repaints a working image toward a target
//!
//! Each step proposes a translucent disk, paints it straight into the working
//! grid while scoring the affected cells, and keeps it only if the summed
//! squared error inside the disk strictly drops. Rejected patches are rolled
//! back through the [`UndoLog`], so total error never increases.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::undo::UndoLog;
use crate::io::configuration::{ITERATIONS_PER_TICK, MAX_PATCH_RADIUS, MIN_PATCH_RADIUS, PATCH_ALPHA};
use crate::io::error::{Result, TrufflifyError, invalid_parameter};
use crate::math::color::{Rgba, blend_over, color_distance_squared};
use crate::spatial::PixelGrid;

/// Parameters controlling patch proposals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutationConfig {
    /// Patches proposed per displayed frame
    pub iterations_per_tick: usize,
    /// Smallest patch radius (inclusive)
    pub min_radius: u32,
    /// Largest patch radius (inclusive)
    pub max_radius: u32,
    /// Blend strength of every patch
    pub alpha: u8,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            iterations_per_tick: ITERATIONS_PER_TICK,
            min_radius: MIN_PATCH_RADIUS,
            max_radius: MAX_PATCH_RADIUS,
            alpha: PATCH_ALPHA,
        }
    }
}

impl MutationConfig {
    /// Check that the parameters describe a usable proposal distribution
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `iterations_per_tick` is zero
    /// - `min_radius` is zero or larger than `max_radius`
    /// - `alpha` is fully transparent or fully opaque
    pub fn validate(&self) -> Result<()> {
        if self.iterations_per_tick == 0 {
            return Err(invalid_parameter(
                "iterations_per_tick",
                &self.iterations_per_tick,
                &"must be at least 1",
            ));
        }
        if self.min_radius == 0 {
            return Err(invalid_parameter(
                "min_radius",
                &self.min_radius,
                &"must be at least 1",
            ));
        }
        if self.min_radius > self.max_radius {
            return Err(invalid_parameter(
                "max_radius",
                &self.max_radius,
                &format!("must not be smaller than min_radius ({})", self.min_radius),
            ));
        }
        if self.alpha == 0 || self.alpha == u8::MAX {
            return Err(invalid_parameter(
                "alpha",
                &self.alpha,
                &"patches must be partially transparent (1..=254)",
            ));
        }
        Ok(())
    }
}

/// Inclusive cell rectangle clipped to a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    /// Leftmost column
    pub min_x: usize,
    /// Topmost row
    pub min_y: usize,
    /// Rightmost column
    pub max_x: usize,
    /// Bottom row
    pub max_y: usize,
}

/// Candidate circular edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    /// Disk center in pixel coordinates
    pub center: [f32; 2],
    /// Disk radius in pixels
    pub radius: u32,
    /// Paint color; alpha is the blend strength
    pub color: Rgba,
}

impl Patch {
    /// Bounding box of the disk clipped to a `width` x `height` grid
    ///
    /// Returns `None` when the disk lies entirely outside the grid.
    pub fn bounds(&self, width: usize, height: usize) -> Option<CellBounds> {
        let radius = self.radius as f32;
        let [cx, cy] = self.center;
        let (min_x, max_x) = clip_span(cx - radius, cx + radius, width)?;
        let (min_y, max_y) = clip_span(cy - radius, cy + radius, height)?;
        Some(CellBounds {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Disk test: the cell at `(x, y)` is inside iff `dx² + dy² <= radius²`
    pub fn covers(&self, x: usize, y: usize) -> bool {
        let dx = x as f32 - self.center[0];
        let dy = y as f32 - self.center[1];
        let radius = self.radius as f32;
        dx.mul_add(dx, dy * dy) <= radius * radius
    }
}

fn clip_span(low: f32, high: f32, len: usize) -> Option<(usize, usize)> {
    let last = len.checked_sub(1)? as f32;
    if high < 0.0 || low > last {
        return None;
    }
    Some((low.max(0.0).ceil() as usize, high.min(last).floor() as usize))
}

/// Result of evaluating one patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The patch lowered the error and was kept
    Accepted {
        /// Error removed from the working image
        improvement: u64,
    },
    /// The patch did not lower the error and was rolled back
    Rejected,
}

impl StepOutcome {
    /// Whether the patch was kept
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Acceptance counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationStats {
    /// Patches kept
    pub accepted: usize,
    /// Patches rolled back
    pub rejected: usize,
}

impl MutationStats {
    /// Total patches evaluated
    pub const fn iterations(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Owns the working image and improves it toward the target one patch at a time
pub struct MutationOptimizer {
    working: PixelGrid,
    target: PixelGrid,
    config: MutationConfig,
    rng: StdRng,
    undo: UndoLog,
    total_error: u64,
    stats: MutationStats,
}

impl MutationOptimizer {
    /// Create an optimizer over a working grid and a same-sized target
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - Either grid has no pixels
    /// - The grids differ in size
    pub fn new(
        working: PixelGrid,
        target: PixelGrid,
        config: MutationConfig,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;

        if target.is_empty() {
            return Err(invalid_parameter(
                "target",
                &format!("{}x{}", target.width(), target.height()),
                &"grid has no pixels",
            ));
        }
        if working.width() != target.width() || working.height() != target.height() {
            return Err(TrufflifyError::DimensionMismatch {
                working: (working.width(), working.height()),
                target: (target.width(), target.height()),
            });
        }

        let total_error = working.total_error(&target);

        Ok(Self {
            working,
            target,
            undo: UndoLog::for_radius(config.max_radius),
            config,
            rng: StdRng::seed_from_u64(seed),
            total_error,
            stats: MutationStats::default(),
        })
    }

    /// Draw a random patch: uniform center cell, radius and RGB, fixed alpha
    pub fn propose(&mut self) -> Patch {
        let x = self.rng.random_range(0..self.working.width());
        let y = self.rng.random_range(0..self.working.height());
        let radius = self
            .rng
            .random_range(self.config.min_radius..=self.config.max_radius);
        let color = [
            self.rng.random(),
            self.rng.random(),
            self.rng.random(),
            self.config.alpha,
        ];

        Patch {
            center: [x as f32, y as f32],
            radius,
            color,
        }
    }

    /// Paint `patch` into the working grid and keep it only if it helps
    ///
    /// Cells are blended in place as they are scored. If the error over the
    /// disk does not strictly decrease every touched cell is restored.
    pub fn apply(&mut self, patch: &Patch) -> StepOutcome {
        let Some(bounds) = patch.bounds(self.working.width(), self.working.height()) else {
            self.stats.rejected += 1;
            return StepOutcome::Rejected;
        };

        let mut error_before = 0u64;
        let mut error_after = 0u64;

        for y in bounds.min_y..=bounds.max_y {
            for x in bounds.min_x..=bounds.max_x {
                if !patch.covers(x, y) {
                    continue;
                }
                let (Some(current), Some(target)) = (self.working.get(x, y), self.target.get(x, y))
                else {
                    continue;
                };

                self.undo.record(x, y, current);
                let blended = blend_over(patch.color, current);
                self.working.set(x, y, blended);

                error_before += u64::from(color_distance_squared(current, target));
                error_after += u64::from(color_distance_squared(blended, target));
            }
        }

        if error_after < error_before {
            self.undo.commit();
            let improvement = error_before - error_after;
            self.total_error -= improvement;
            self.stats.accepted += 1;
            StepOutcome::Accepted { improvement }
        } else {
            self.undo.rollback(&mut self.working);
            self.stats.rejected += 1;
            StepOutcome::Rejected
        }
    }

    /// Propose and evaluate one patch
    pub fn step(&mut self) -> StepOutcome {
        let patch = self.propose();
        self.apply(&patch)
    }

    /// Run `iterations` sequential steps, returning how many were accepted
    pub fn run(&mut self, iterations: usize) -> usize {
        (0..iterations).filter(|_| self.step().is_accepted()).count()
    }

    /// Current working image
    pub const fn working(&self) -> &PixelGrid {
        &self.working
    }

    /// Image being approximated
    pub const fn target(&self) -> &PixelGrid {
        &self.target
    }

    /// Summed squared RGB error between working and target over the full grid
    pub const fn total_error(&self) -> u64 {
        self.total_error
    }

    /// Acceptance counters since construction
    pub const fn stats(&self) -> MutationStats {
        self.stats
    }

    /// Active configuration
    pub const fn config(&self) -> &MutationConfig {
        &self.config
    }
}
