//! Per-frame boundary between the engines and whatever displays them

use std::time::Duration;

use crate::algorithm::mutation::MutationOptimizer;
use crate::algorithm::particle::Primitive;
use crate::algorithm::transport::ParticleTransport;
use crate::io::configuration::TRANSITION_DURATION_MS;
use crate::spatial::PixelGrid;

/// Visual output of one tick
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<'a> {
    /// Full pixel buffer to upload as-is
    Pixels(&'a PixelGrid),
    /// Point primitives to draw over a cleared viewport
    Points(Vec<Primitive>),
}

/// An engine that can be ticked once per displayed frame
///
/// `elapsed` is the time since the session started, supplied by the driver.
/// Ticks run to completion synchronously; stopping is simply not ticking.
pub trait FrameSource {
    /// Advance by one frame and return what to show
    fn tick(&mut self, elapsed: Duration) -> Frame<'_>;

    /// Handle a restart request issued at `elapsed`
    fn restart(&mut self, elapsed: Duration);
}

impl FrameSource for MutationOptimizer {
    fn tick(&mut self, _elapsed: Duration) -> Frame<'_> {
        let accepted = self.run(self.config().iterations_per_tick);
        tracing::trace!(accepted, error = self.total_error(), "mutation tick");
        Frame::Pixels(self.working())
    }

    // The working image is the state; there is nothing to rewind.
    fn restart(&mut self, _elapsed: Duration) {}
}

/// Drives a [`ParticleTransport`] from wall-clock time
///
/// Progress is `(elapsed - origin) / duration`, clamped to `[0, 1]`. A restart
/// only moves `origin`; the particle set itself is never touched.
#[derive(Debug, Clone)]
pub struct TransportAnimation {
    transport: ParticleTransport,
    duration: Duration,
    origin: Duration,
}

impl TransportAnimation {
    /// Animate over the default transition duration
    pub const fn new(transport: ParticleTransport) -> Self {
        Self::with_duration(transport, Duration::from_millis(TRANSITION_DURATION_MS))
    }

    /// Animate over a custom duration
    pub const fn with_duration(transport: ParticleTransport, duration: Duration) -> Self {
        Self {
            transport,
            duration,
            origin: Duration::ZERO,
        }
    }

    /// Normalized progress at session time `elapsed`
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let since = elapsed.saturating_sub(self.origin);
        (since.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// The particle set being animated
    pub const fn transport(&self) -> &ParticleTransport {
        &self.transport
    }

    /// Length of one full transition
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl FrameSource for TransportAnimation {
    fn tick(&mut self, elapsed: Duration) -> Frame<'_> {
        Frame::Points(self.transport.positions_at(self.progress(elapsed)))
    }

    fn restart(&mut self, elapsed: Duration) {
        tracing::debug!(at = ?elapsed, "transition restarted");
        self.origin = elapsed;
    }
}
