//! Fixed-size RGBA pixel grids
//!
//! Both engines read and write images through [`PixelGrid`]. Dimensions are
//! fixed at construction; every accessor takes `(x, y)` in pixel units and
//! returns `None` (or `false`) instead of panicking when out of bounds.

use image::{Rgba as ImageRgba, RgbaImage};
use ndarray::Array2;

use crate::math::color::{Rgba, color_distance_squared};

/// Rectangular grid of RGBA pixels stored row-major as `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Array2<Rgba>,
}

impl PixelGrid {
    /// Create a grid of the given size filled with one color
    pub fn new(width: usize, height: usize, fill: Rgba) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), fill),
        }
    }

    /// Copy an RGBA image into a new grid
    pub fn from_image(image: &RgbaImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let mut pixels = Array2::from_elem((height, width), [0, 0, 0, 0]);

        for (x, y, pixel) in image.enumerate_pixels() {
            if let Some(cell) = pixels.get_mut([y as usize, x as usize]) {
                *cell = pixel.0;
            }
        }

        Self { pixels }
    }

    /// Convert the grid back into an RGBA image
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width() as u32, self.height() as u32);
        for (x, y, color) in self.iter() {
            image.put_pixel(x as u32, y as u32, ImageRgba(color));
        }
        image
    }

    /// Build a `width` x `height` canvas with `source` pasted at the top-left
    ///
    /// Cells not covered by the source keep `background`; source pixels that
    /// fall outside the canvas are cropped.
    pub fn canvas_from(source: &Self, width: usize, height: usize, background: Rgba) -> Self {
        let mut canvas = Self::new(width, height, background);
        let copy_width = width.min(source.width());
        let copy_height = height.min(source.height());

        for y in 0..copy_height {
            for x in 0..copy_width {
                if let Some(color) = source.get(x, y) {
                    canvas.set(x, y, color);
                }
            }
        }

        canvas
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// True when the grid has no pixels at all
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Read the pixel at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        self.pixels.get([y, x]).copied()
    }

    /// Overwrite the pixel at `(x, y)`, returning whether it was in bounds
    pub fn set(&mut self, x: usize, y: usize, color: Rgba) -> bool {
        if let Some(cell) = self.pixels.get_mut([y, x]) {
            *cell = color;
            true
        } else {
            false
        }
    }

    /// Iterate over every pixel as `(x, y, color)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Rgba)> + '_ {
        self.pixels
            .indexed_iter()
            .map(|((y, x), &color)| (x, y, color))
    }

    /// Summed squared RGB error against another grid of the same size
    ///
    /// Only the overlapping region is compared when sizes differ.
    pub fn total_error(&self, other: &Self) -> u64 {
        self.iter()
            .filter_map(|(x, y, color)| {
                other
                    .get(x, y)
                    .map(|theirs| u64::from(color_distance_squared(color, theirs)))
            })
            .sum()
    }
}
