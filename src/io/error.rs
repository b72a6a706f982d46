//! Error types for tile map classification, configuration and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tile map operations
#[derive(Debug)]
pub enum MapError {
    /// Input rejected before any classification work was done
    ///
    /// Raised for a target tile count below one, zero-area images or cells,
    /// empty or inconsistent palettes, malformed colour strings and
    /// reference filenames that do not map onto the palette.
    InvalidInput {
        /// Name of the rejected input
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A reference tile image could not be opened or decoded
    MissingReference {
        /// Path to the reference image
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to load a source map image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
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

    /// Configuration file could not be parsed
    Config {
        /// Path to the configuration file
        path: PathBuf,
        /// Description of the parse failure
        reason: String,
    },

    /// Internal computation reached an inconsistent state
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid input '{parameter}' = '{value}': {reason}")
            }
            Self::MissingReference { path, source } => {
                write!(
                    f,
                    "Failed to open reference tile '{}': {source}",
                    path.display()
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
            Self::Config { path, reason } => {
                write!(f, "Invalid configuration '{}': {reason}", path.display())
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingReference { source, .. }
            | Self::ImageLoad { source, .. }
            | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tile map results
pub type Result<T> = std::result::Result<T, MapError>;

impl From<image::ImageError> for MapError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid input error
pub fn invalid_input(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MapError {
    MapError::InvalidInput {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MapError {
    MapError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to the path it occurred on
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MapError {
    MapError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
