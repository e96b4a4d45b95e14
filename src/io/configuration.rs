//! Engine constants and runtime configuration defaults

use crate::math::color::Rgba;

// Mutation optimizer
/// Patches proposed per displayed frame
pub const ITERATIONS_PER_TICK: usize = 200;
/// Smallest patch radius in pixels
pub const MIN_PATCH_RADIUS: u32 = 2;
/// Largest patch radius in pixels
pub const MAX_PATCH_RADIUS: u32 = 30;
/// Blend strength of every patch (always partially transparent)
pub const PATCH_ALPHA: u8 = 100;
/// Fill for working-canvas cells the source image does not cover
pub const WORKING_BACKGROUND: Rgba = [0, 0, 0, 255];

// Particle transport
/// Target number of particles emitted by the layout pass
pub const PARTICLE_BUDGET: usize = 15_000;
/// Random target candidates examined per particle
pub const MATCH_SAMPLES: usize = 100;
/// Fraction of the viewport an image's longest relevant side occupies
pub const VIEWPORT_FILL: f32 = 0.8;
/// End-position jitter as a fraction of the target's per-pixel display scale
pub const JITTER_FRACTION: f32 = 0.5;
/// Relative spread of particle sizes around their base size
pub const SIZE_JITTER: f32 = 0.2;
/// Length of the source-to-target transition
pub const TRANSITION_DURATION_MS: u64 = 3000;

// Display
/// Side length of the square display viewport
pub const VIEWPORT_SIZE: u32 = 800;
/// Frames per second of the virtual display clock
pub const FRAME_RATE: u32 = 60;
/// Frames rendered when no count is given
pub const DEFAULT_FRAMES: usize = 240;
/// Viewport clear color
pub const BACKGROUND: Rgba = [30, 30, 30, 255];
/// Pixel frames narrower than this are upscaled for display
pub const MIN_DISPLAY_WIDTH: u32 = 600;

// Files
/// Target image used when none is given
pub const DEFAULT_TARGET_PATH: &str = "truffle.png";
/// Suffix added to the animation filename
pub const ANIMATION_SUFFIX: &str = "_trufflified";
/// Suffix added to the final-frame filename
pub const OUTPUT_SUFFIX: &str = "_result";
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
/// Palette quantizer speed for GIF frames (1 is slowest and best, 30 fastest)
pub const GIF_ENCODER_SPEED: i32 = 10;
/// The final frame is held this many times longer than the others
pub const FINAL_FRAME_HOLD: u32 = 25;

/// Display frame interval in milliseconds for the virtual clock
pub const fn frame_delay_ms() -> u32 {
    1000 / FRAME_RATE
}
