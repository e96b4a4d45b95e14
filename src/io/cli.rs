//! Command-line interface and the headless frame loop

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::algorithm::driver::{FrameSource, TransportAnimation};
use crate::algorithm::mutation::{MutationConfig, MutationOptimizer};
use crate::algorithm::transport::{ParticleTransport, TransportConfig};
use crate::io::configuration::{
    ANIMATION_SUFFIX, BACKGROUND, DEFAULT_FRAMES, DEFAULT_TARGET_PATH, ITERATIONS_PER_TICK,
    MATCH_SAMPLES, OUTPUT_SUFFIX, PARTICLE_BUDGET, VIEWPORT_SIZE, WORKING_BACKGROUND,
    frame_delay_ms,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_grid_as_png, export_image_as_png, load_pixel_grid};
use crate::io::progress::TickProgress;
use crate::io::visualization::GifRecorder;
use crate::spatial::{PixelGrid, Viewport};

/// Which engine morphs the source into the target
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Repaint the source with random translucent disks until it resembles the target
    Evolve,
    /// Fly source pixels to color-matched target positions
    Particles,
}

impl Mode {
    /// Short label for progress and log output
    pub const fn label(self) -> &'static str {
        match self {
            Self::Evolve => "evolve",
            Self::Particles => "particles",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "trufflify")]
#[command(author, version, about = "Morph an image into the secret sauce")]
/// Command-line arguments for a morphing session
pub struct Cli {
    /// Source image to transform
    #[arg(short = 'f', long = "file", value_name = "IMAGE")]
    pub input: PathBuf,

    /// Target image the source morphs into
    #[arg(short, long, default_value = DEFAULT_TARGET_PATH)]
    pub target: PathBuf,

    /// Transformation engine
    #[arg(short, long, value_enum, default_value_t = Mode::Evolve)]
    pub mode: Mode,

    /// Random seed for reproducible runs (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of frames to render
    #[arg(short = 'n', long, default_value_t = DEFAULT_FRAMES)]
    pub frames: usize,

    /// Patches proposed per frame in evolve mode
    #[arg(long, default_value_t = ITERATIONS_PER_TICK)]
    pub iterations_per_frame: usize,

    /// Approximate particle count in particles mode
    #[arg(long, default_value_t = PARTICLE_BUDGET)]
    pub budget: usize,

    /// Target candidates sampled per particle
    #[arg(long, default_value_t = MATCH_SAMPLES)]
    pub samples: usize,

    /// Side length of the square viewport in pixels
    #[arg(long, default_value_t = VIEWPORT_SIZE)]
    pub viewport: u32,

    /// Frame at which to restart the particle transition
    #[arg(long, value_name = "FRAME")]
    pub restart_at: Option<usize>,

    /// Animated GIF output path (defaults next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Optimizer parameters selected on the command line
    pub fn mutation_config(&self) -> MutationConfig {
        MutationConfig {
            iterations_per_tick: self.iterations_per_frame,
            ..MutationConfig::default()
        }
    }

    /// Layout parameters selected on the command line
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            particle_budget: self.budget,
            match_samples: self.samples,
            ..TransportConfig::default()
        }
    }

    /// Where the animation is written
    pub fn animation_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(&self.input, ANIMATION_SUFFIX, "gif"))
    }

    /// Where the final frame is written
    pub fn result_path(&self) -> PathBuf {
        sibling_path(&self.input, OUTPUT_SUFFIX, "png")
    }
}

fn sibling_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// What a finished session produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Engine that ran
    pub mode: Mode,
    /// Seed the engine was constructed with
    pub seed: u64,
    /// Frames ticked
    pub frames: usize,
    /// Animated GIF path
    pub animation: PathBuf,
    /// Final frame PNG path
    pub result: PathBuf,
}

/// One morphing run: load both images, tick the engine, record every frame
pub struct Session {
    cli: Cli,
    seed: u64,
}

impl Session {
    /// Prepare a session, drawing a fresh seed if none was given
    pub fn new(cli: Cli) -> Self {
        let seed = cli.seed.unwrap_or_else(rand::random);
        Self { cli, seed }
    }

    /// Seed used for the engine's random source
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Parsed arguments
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Run the session to completion
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The frame count or viewport size is zero
    /// - The target or source image is missing or cannot be decoded
    /// - Engine parameters fail validation
    /// - The animation or final frame cannot be written
    pub fn run(&self) -> Result<SessionSummary> {
        if self.cli.frames == 0 {
            return Err(invalid_parameter("frames", &0, &"must be at least 1"));
        }
        if self.cli.viewport == 0 {
            return Err(invalid_parameter("viewport", &0, &"must be at least 1"));
        }

        let target = load_pixel_grid(&self.cli.target, "target")?;
        let source = load_pixel_grid(&self.cli.input, "source")?;

        tracing::info!(
            mode = self.cli.mode.label(),
            seed = self.seed,
            source = %self.cli.input.display(),
            target = %self.cli.target.display(),
            "session started"
        );

        let result = self.cli.result_path();
        match self.cli.mode {
            Mode::Evolve => {
                let working = PixelGrid::canvas_from(
                    &source,
                    target.width(),
                    target.height(),
                    WORKING_BACKGROUND,
                );
                let mut optimizer =
                    MutationOptimizer::new(working, target, self.cli.mutation_config(), self.seed)?;
                let initial_error = optimizer.total_error();

                self.drive(&mut optimizer, |engine, _| {
                    format!("error {}", engine.total_error())
                })?;
                export_grid_as_png(optimizer.working(), &result)?;

                let stats = optimizer.stats();
                tracing::info!(
                    initial_error,
                    final_error = optimizer.total_error(),
                    accepted = stats.accepted,
                    rejected = stats.rejected,
                    "evolution finished"
                );
            }
            Mode::Particles => {
                let transport = ParticleTransport::build_assignment(
                    &source,
                    &target,
                    Viewport::square(self.cli.viewport as f32),
                    &self.cli.transport_config(),
                    self.seed,
                )?;
                tracing::info!(
                    particles = transport.len(),
                    stride = transport.stride(),
                    "particle layout ready"
                );
                let mut animation = TransportAnimation::new(transport);

                let last = self.drive(&mut animation, |engine, elapsed| {
                    format!("{:>3.0}%", engine.progress(elapsed) * 100.0)
                })?;
                if let Some(last) = last {
                    export_image_as_png(&last, &result)?;
                }
            }
        }

        let summary = SessionSummary {
            mode: self.cli.mode,
            seed: self.seed,
            frames: self.cli.frames,
            animation: self.cli.animation_path(),
            result,
        };
        tracing::info!(
            animation = %summary.animation.display(),
            result = %summary.result.display(),
            "session finished"
        );
        Ok(summary)
    }

    // Tick once per virtual frame, firing the restart signal when requested
    fn drive<S, F>(&self, engine: &mut S, status: F) -> Result<Option<image::RgbaImage>>
    where
        S: FrameSource,
        F: Fn(&S, Duration) -> String,
    {
        let delay_ms = frame_delay_ms();
        let mut recorder = GifRecorder::create(
            &self.cli.animation_path(),
            (self.cli.viewport, self.cli.viewport),
            BACKGROUND,
            delay_ms,
        )?;
        let progress = TickProgress::new(
            self.cli.frames,
            self.cli.mode.label(),
            self.cli.should_show_progress(),
        );

        for frame_index in 0..self.cli.frames {
            let elapsed = Duration::from_millis(u64::from(delay_ms) * frame_index as u64);
            if self.cli.restart_at == Some(frame_index) {
                engine.restart(elapsed);
            }

            recorder.capture(&engine.tick(elapsed))?;
            progress.update(frame_index + 1, status(engine, elapsed));
        }

        progress.finish();
        recorder.finish()
    }
}
