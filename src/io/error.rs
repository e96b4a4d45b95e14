//! Error types for asset loading, parameter validation and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all session operations
///
/// Every variant is raised before or after the engines run; stepping the
/// optimizer, building an assignment and querying positions cannot fail.
#[derive(Debug)]
pub enum TrufflifyError {
    /// Required image file does not exist
    MissingAsset {
        /// Path that was looked up
        path: PathBuf,
        /// Which image this was ("source" or "target")
        role: &'static str,
    },

    /// Image file exists but could not be decoded
    DecodeFailure {
        /// Path to the image file
        path: PathBuf,
        /// Underlying decoder error
        source: image::ImageError,
    },

    /// Image decoded to zero width or height
    EmptyImage {
        /// Path to the image file
        path: PathBuf,
    },

    /// Working and target grids differ in size
    DimensionMismatch {
        /// Working grid size (width, height)
        working: (usize, usize),
        /// Target grid size (width, height)
        target: (usize, usize),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to encode or save an output image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TrufflifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAsset { path, role } => {
                write!(f, "No {role} image found at '{}'", path.display())
            }
            Self::DecodeFailure { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::EmptyImage { path } => {
                write!(f, "Image '{}' has no pixels", path.display())
            }
            Self::DimensionMismatch { working, target } => {
                write!(
                    f,
                    "Working grid is {}x{} but target is {}x{}",
                    working.0, working.1, target.0, target.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TrufflifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DecodeFailure { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for session results
pub type Result<T> = std::result::Result<T, TrufflifyError>;

impl From<std::io::Error> for TrufflifyError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TrufflifyError {
    TrufflifyError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
