//! Loading images into pixel grids and writing them back out

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::io::error::{Result, TrufflifyError};
use crate::spatial::PixelGrid;

/// Load an image file as an RGBA pixel grid
///
/// `role` names the image in error messages ("source" or "target").
///
/// # Errors
///
/// Returns an error if:
/// - No file exists at `path` (`MissingAsset`)
/// - The file cannot be decoded as an image (`DecodeFailure`)
/// - The decoded image has zero width or height (`EmptyImage`)
pub fn load_pixel_grid(path: &Path, role: &'static str) -> Result<PixelGrid> {
    if !path.is_file() {
        return Err(TrufflifyError::MissingAsset {
            path: path.to_path_buf(),
            role,
        });
    }

    let image = image::open(path).map_err(|e| TrufflifyError::DecodeFailure {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba = image.to_rgba8();

    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(TrufflifyError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        path = %path.display(),
        role,
        width = rgba.width(),
        height = rgba.height(),
        "image loaded"
    );

    Ok(PixelGrid::from_image(&rgba))
}

/// Save a pixel grid as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_grid_as_png(grid: &PixelGrid, output_path: &Path) -> Result<()> {
    export_image_as_png(&grid.to_image(), output_path)
}

/// Save an RGBA image as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_image_as_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    create_parent_dir(output_path)?;

    image
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| TrufflifyError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Create the parent directory of `path` if it has one
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created
pub fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TrufflifyError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}
