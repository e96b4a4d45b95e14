//! Fitting images into a display viewport

/// Display area the particle layout is computed for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in display units
    pub width: f32,
    /// Height in display units
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Square viewport with the given side length
    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }
}

/// Uniform scale plus offset mapping image pixels to display coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Display units per image pixel
    pub scale: f32,
    /// Display position of the image's top-left corner
    pub offset: [f32; 2],
}

impl Placement {
    /// Center an image in the viewport with its longest relevant side filling `fill`
    ///
    /// The scale is the largest that keeps the image within `fill` of the
    /// viewport on both axes, so whichever dimension is tighter relative to
    /// the viewport spans exactly that fraction.
    pub fn fit(width: usize, height: usize, viewport: Viewport, fill: f32) -> Self {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        let scale = fill * (viewport.width / width).min(viewport.height / height);

        Self {
            scale,
            offset: [
                width.mul_add(-scale, viewport.width) / 2.0,
                height.mul_add(-scale, viewport.height) / 2.0,
            ],
        }
    }

    /// Display position of the pixel at `(x, y)`
    pub fn to_display(&self, x: usize, y: usize) -> [f32; 2] {
        [
            (x as f32).mul_add(self.scale, self.offset[0]),
            (y as f32).mul_add(self.scale, self.offset[1]),
        ]
    }
}
