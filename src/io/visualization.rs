//! Headless frame rendering and streamed GIF recording
//!
//! Stands in for the on-screen display: each [`Frame`] is rasterized to an
//! RGBA image and appended to an animated GIF as it arrives, so memory use
//! does not grow with the number of frames.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::{self, FilterType};
use image::{Delay, Rgba as ImageRgba, RgbaImage};

use crate::algorithm::driver::Frame;
use crate::algorithm::particle::Primitive;
use crate::io::configuration::{
    FINAL_FRAME_HOLD, GIF_ENCODER_SPEED, MIN_DISPLAY_WIDTH, VIEWER_MIN_FRAME_DELAY_MS,
};
use crate::io::error::{Result, TrufflifyError};
use crate::io::image::create_parent_dir;
use crate::math::color::{Rgba, blend_over};

/// Draw point primitives as filled squares over a cleared canvas
///
/// Each square covers at least one pixel and is clipped to the canvas.
/// Translucent colors are composited over what is already drawn.
pub fn rasterize_points(
    primitives: &[Primitive],
    width: u32,
    height: u32,
    background: Rgba,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, ImageRgba(background));

    for primitive in primitives {
        let [x, y] = primitive.position;
        let side = primitive.size.max(1.0);
        let min_x = x.floor().max(0.0);
        let min_y = y.floor().max(0.0);
        let max_x = (x + side).floor().min(width as f32);
        let max_y = (y + side).floor().min(height as f32);
        if min_x >= max_x || min_y >= max_y {
            continue;
        }

        for py in (min_y as u32)..(max_y as u32) {
            for px in (min_x as u32)..(max_x as u32) {
                if let Some(pixel) = canvas.get_pixel_mut_checked(px, py) {
                    pixel.0 = blend_over(primitive.color, pixel.0);
                }
            }
        }
    }

    canvas
}

/// Nearest-neighbour upscale of narrow pixel frames to the minimum display width
pub fn upscale_for_display(image: &RgbaImage) -> RgbaImage {
    let width = image.width();
    if width == 0 || width >= MIN_DISPLAY_WIDTH {
        return image.clone();
    }

    let scale = f64::from(MIN_DISPLAY_WIDTH) / f64::from(width);
    let height = (f64::from(image.height()) * scale).round().max(1.0) as u32;
    imageops::resize(image, MIN_DISPLAY_WIDTH, height, FilterType::Nearest)
}

/// Frame-skip factor and per-frame delay that respect the viewer delay floor
///
/// Frames faster than viewers can show are dropped so that the kept frames,
/// each shown for `delay * skip`, preserve the apparent playback speed.
pub const fn playback_timing(frame_delay_ms: u32) -> (usize, u32) {
    let delay = if frame_delay_ms == 0 { 1 } else { frame_delay_ms };
    let skip = if delay < VIEWER_MIN_FRAME_DELAY_MS {
        VIEWER_MIN_FRAME_DELAY_MS.div_ceil(delay)
    } else {
        1
    };
    (skip as usize, delay * skip)
}

/// Renders frames and streams them into an animated GIF
pub struct GifRecorder {
    encoder: GifEncoder<BufWriter<File>>,
    path: PathBuf,
    viewport: (u32, u32),
    background: Rgba,
    skip: usize,
    delay_ms: u32,
    captured: usize,
    written: usize,
    last_frame: Option<RgbaImage>,
    last_written: bool,
}

impl GifRecorder {
    /// Open `path` for a new animation with point frames drawn at `viewport` size
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The output file cannot be created
    /// - The GIF header cannot be written
    pub fn create(
        path: &Path,
        viewport: (u32, u32),
        background: Rgba,
        frame_delay_ms: u32,
    ) -> Result<Self> {
        create_parent_dir(path)?;
        let file = File::create(path).map_err(|e| TrufflifyError::FileSystem {
            path: path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_ENCODER_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| TrufflifyError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            })?;

        let (skip, delay_ms) = playback_timing(frame_delay_ms);

        Ok(Self {
            encoder,
            path: path.to_path_buf(),
            viewport,
            background,
            skip,
            delay_ms,
            captured: 0,
            written: 0,
            last_frame: None,
            last_written: false,
        })
    }

    /// Rasterize a frame the way the display would show it
    pub fn render(&self, frame: &Frame<'_>) -> RgbaImage {
        match frame {
            Frame::Pixels(grid) => upscale_for_display(&grid.to_image()),
            Frame::Points(primitives) => rasterize_points(
                primitives,
                self.viewport.0,
                self.viewport.1,
                self.background,
            ),
        }
    }

    /// Render a frame and append it to the animation if it is not skipped
    ///
    /// # Errors
    ///
    /// Returns `ImageExport` if the frame cannot be encoded
    pub fn capture(&mut self, frame: &Frame<'_>) -> Result<()> {
        let image = self.render(frame);
        let keep = self.captured % self.skip == 0;
        self.captured += 1;

        if keep {
            self.write(image.clone(), self.delay_ms)?;
        }
        self.last_written = keep;
        self.last_frame = Some(image);
        Ok(())
    }

    /// Write the final frame with a long hold and close the animation
    ///
    /// Returns the last rendered frame, if any frame was captured.
    ///
    /// # Errors
    ///
    /// Returns `ImageExport` if the closing frames cannot be encoded
    pub fn finish(mut self) -> Result<Option<RgbaImage>> {
        let Some(last) = self.last_frame.take() else {
            return Ok(None);
        };

        let hold = if self.last_written {
            self.delay_ms * (FINAL_FRAME_HOLD - 1)
        } else {
            self.delay_ms * FINAL_FRAME_HOLD
        };
        self.write(last.clone(), hold)?;

        tracing::debug!(
            path = %self.path.display(),
            captured = self.captured,
            written = self.written,
            "animation closed"
        );
        Ok(Some(last))
    }

    /// Frames passed to [`Self::capture`]
    pub const fn captured(&self) -> usize {
        self.captured
    }

    /// Frames encoded so far
    pub const fn written(&self) -> usize {
        self.written
    }

    fn write(&mut self, image: RgbaImage, delay_ms: u32) -> Result<()> {
        let frame = image::Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));
        self.encoder
            .encode_frame(frame)
            .map_err(|e| TrufflifyError::ImageExport {
                path: self.path.clone(),
                source: e,
            })?;
        self.written += 1;
        Ok(())
    }
}
