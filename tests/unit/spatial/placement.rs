//! Tests for fitting images into the viewport

#[cfg(test)]
mod tests {
    use trufflify::spatial::{Placement, Viewport};

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    // Tests a wide image is limited by its width and centered
    // Verified by using max instead of min when choosing the scale
    #[test]
    fn test_fit_wide_image() {
        let placement = Placement::fit(200, 100, Viewport::square(800.0), 0.8);

        assert_close(placement.scale, 3.2);
        assert_close(placement.offset[0], 80.0);
        assert_close(placement.offset[1], 240.0);
    }

    // Tests a tall image is limited by its height
    // Verified by always scaling by width
    #[test]
    fn test_fit_tall_image() {
        let placement = Placement::fit(50, 400, Viewport::new(800.0, 800.0), 0.8);

        assert_close(placement.scale, 1.6);
        assert_close(placement.offset[0], 360.0);
        assert_close(placement.offset[1], 80.0);
    }

    // Tests pixel-to-display mapping
    // Verified by dropping the offset
    #[test]
    fn test_to_display() {
        let placement = Placement::fit(200, 100, Viewport::square(800.0), 0.8);

        let [x0, y0] = placement.to_display(0, 0);
        assert_close(x0, 80.0);
        assert_close(y0, 240.0);

        let [x1, y1] = placement.to_display(200, 100);
        assert_close(x1, 720.0);
        assert_close(y1, 560.0);
    }

    // Tests source and target placements are independent
    // Verified by sharing one scale across both images
    #[test]
    fn test_independent_placements() {
        let viewport = Viewport::square(800.0);
        let small = Placement::fit(10, 10, viewport, 0.8);
        let large = Placement::fit(640, 640, viewport, 0.8);

        assert_close(small.scale, 64.0);
        assert_close(large.scale, 1.0);
        assert_close(small.offset[0], large.offset[0]);
    }
}
