//! Tests for loading and exporting pixel grids

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use std::fs;
    use trufflify::TrufflifyError;
    use trufflify::io::image::{create_parent_dir, export_grid_as_png, load_pixel_grid};
    use trufflify::spatial::PixelGrid;

    // Tests a written grid loads back with the same pixels
    // Verified by transposing coordinates in the image conversion
    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("grid.png");

        let mut grid = PixelGrid::new(3, 2, [0, 0, 0, 255]);
        grid.set(2, 1, [9, 8, 7, 255]);
        grid.set(0, 1, [1, 2, 3, 0]);
        export_grid_as_png(&grid, &path).expect("export succeeds");

        let loaded = load_pixel_grid(&path, "source").expect("load succeeds");
        assert_eq!(loaded, grid);
    }

    // Tests a path with no file is reported as a missing asset
    // Verified by letting the decoder report the missing file
    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.png");

        let result = load_pixel_grid(&path, "source");
        assert!(matches!(
            result,
            Err(TrufflifyError::MissingAsset { role: "source", .. })
        ));
    }

    // Tests an undecodable file is reported as a decode failure
    // Verified by treating any open error as missing
    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").expect("write file");

        let result = load_pixel_grid(&path, "target");
        assert!(matches!(result, Err(TrufflifyError::DecodeFailure { .. })));
    }

    // Tests non-RGBA images are converted on load
    // Verified by reading the raw buffer without conversion
    #[test]
    fn test_rgb_image_gets_opaque_alpha() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rgb.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([40, 50, 60]))
            .save(&path)
            .expect("write rgb");

        let grid = load_pixel_grid(&path, "source").expect("load succeeds");
        assert_eq!(grid.get(1, 1), Some([40, 50, 60, 255]));
    }

    // Tests parent creation accepts bare file names
    // Verified by creating the empty parent path
    #[test]
    fn test_create_parent_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let deep = dir.path().join("a").join("b").join("c.png");

        create_parent_dir(&deep).expect("parents created");
        assert!(dir.path().join("a").join("b").is_dir());
        create_parent_dir(std::path::Path::new("bare.png")).expect("nothing to create");

        RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))
            .save(&deep)
            .expect("parent exists");
    }
}
