//! Terminal progress display for the frame loop

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static FRAME_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the frames of one session
///
/// In quiet mode the bar is hidden but still tracks its position.
pub struct TickProgress {
    bar: ProgressBar,
}

impl TickProgress {
    /// Create a bar for `frames` ticks, labelled with the engine name
    pub fn new(frames: usize, label: &str, visible: bool) -> Self {
        let bar = ProgressBar::new(frames as u64);
        if !visible {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(FRAME_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self { bar }
    }

    /// Record that `frame` (1-based) has been rendered, with a status message
    pub fn update(&self, frame: usize, status: String) {
        self.bar.set_position(frame as u64);
        self.bar.set_message(status);
    }

    /// Frames completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total frames expected
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Leave the bar in its final state
    pub fn finish(&self) {
        self.bar.finish();
    }
}
