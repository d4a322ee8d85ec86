//! Error types and handling for resize

use std::path::PathBuf;
use thiserror::Error;

use crate::config::{Direction, NumericField};

/// Result type alias for resize operations
pub type Result<T> = std::result::Result<T, ResizeError>;

/// Rejection of the supplied options, detected before any image is touched.
///
/// Every variant is final: nothing is retried and no partial job exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An option name outside the recognized set
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// Neither --width/--height nor --scale was given
    #[error("no target size given: pass both --width and --height, or --scale")]
    MissingGeometry,

    /// Exactly one of --width and --height was given
    #[error("--width and --height must be given together")]
    IncompleteGeometry,

    /// A numeric option whose value does not parse
    #[error("invalid value '{value}' for --{field}: {}", .field.constraint())]
    InvalidNumber { field: NumericField, value: String },

    /// A numeric option that parses but violates its range
    #[error("--{field} is out of range ({value}): {}", .field.constraint())]
    OutOfRange { field: NumericField, value: String },

    /// Unrecognized kernel name
    #[error(
        "invalid value '{token}' for --{direction}_interpolation, possible values are: {}",
        crate::config::Interpolation::names().join(", ")
    )]
    InvalidInterpolation { direction: Direction, token: String },

    /// Unrecognized output container
    #[error(
        "invalid output format '{0}', possible values are: {}",
        crate::config::OutputFormat::names().join(", ")
    )]
    InvalidFormat(String),

    /// Suffix that cannot be part of a file name
    #[error("suffix '{0}' contains characters that are not allowed in file names")]
    InvalidSuffix(String),

    /// Any other command-line syntax problem (missing value, repeated option)
    #[error("{0}")]
    Usage(String),
}

impl ConfigError {
    /// Process exit status for a rejected configuration
    pub fn exit_code(&self) -> i32 {
        2
    }

    pub(crate) fn invalid_number(field: NumericField, value: &str) -> Self {
        Self::InvalidNumber {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn out_of_range(field: NumericField, value: &str) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
        }
    }
}

/// Main error type for resize operations
#[derive(Debug, Error)]
pub enum ResizeError {
    /// Rejected command-line options
    #[error(transparent)]
    Options(#[from] ConfigError),

    /// Defaults file errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serde(String),

    /// An input image could not be opened or decoded
    #[error("Failed to read {file:?}: {source}")]
    Decode {
        file: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A resized image could not be encoded or written
    #[error("Failed to write {file:?}: {source}")]
    Encode {
        file: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Target size is beyond what the engine will allocate
    #[error("Image too large: {width}x{height} exceeds limit of {limit} for {file:?}")]
    ImageTooLarge {
        file: PathBuf,
        width: u32,
        height: u32,
        limit: u64,
    },

    /// Another input of the same batch resolves to the same output file
    #[error("Output {output:?} is also the output of another input")]
    OutputConflict { file: PathBuf, output: PathBuf },

    /// Directory traversal errors during input discovery
    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Worker pool errors
    #[error("Parallel processing error: {message}")]
    Parallel { message: String },
}

impl ResizeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new parallel processing error
    pub fn parallel<S: Into<String>>(message: S) -> Self {
        Self::Parallel {
            message: message.into(),
        }
    }

    /// Create a new decode error for `file`
    pub fn decode(file: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            file: file.into(),
            source,
        }
    }

    /// Create a new encode error for `file`
    pub fn encode(file: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Encode {
            file: file.into(),
            source,
        }
    }

    /// Create a new size limit error for `file`
    pub fn image_too_large(file: impl Into<PathBuf>, width: u32, height: u32, limit: u64) -> Self {
        Self::ImageTooLarge {
            file: file.into(),
            width,
            height,
            limit,
        }
    }

    /// Check if this error is recoverable (the batch can continue)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // These errors concern a single file
            Self::Decode { .. }
            | Self::Encode { .. }
            | Self::ImageTooLarge { .. }
            | Self::OutputConflict { .. }
            | Self::Walk(_) => true,

            // These errors should stop the run
            Self::Options(_) | Self::Config { .. } | Self::Serde(_) | Self::Parallel { .. } => {
                false
            }
        }
    }

    /// Get the associated file path if available
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Decode { file, .. }
            | Self::Encode { file, .. }
            | Self::ImageTooLarge { file, .. }
            | Self::OutputConflict { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Options(e) => e.exit_code(),
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for ResizeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serde(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_yaml::Error> for ResizeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serde(format!("YAML parsing error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ResizeError::config("test message");
        assert!(matches!(err, ResizeError::Config { .. }));
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::invalid_number(NumericField::Width, "A");
        assert_eq!(
            err.to_string(),
            "invalid value 'A' for --width: must be a positive integer"
        );

        let err = ConfigError::out_of_range(NumericField::JpegQuality, "-1");
        assert!(err.to_string().contains("--jpeg_quality"));
        assert!(err.to_string().contains("between 0 and 100"));

        let err = ConfigError::InvalidInterpolation {
            direction: Direction::Up,
            token: "invalid".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("--up_interpolation"));
        assert!(msg.contains("nearest, linear, cubic, area, lanczos"));

        let err = ConfigError::InvalidFormat("gif".to_string());
        assert!(err.to_string().contains("jpg, jpeg, png"));
    }

    #[test]
    fn test_recoverable_errors() {
        let too_large = ResizeError::image_too_large("big.png", 40_000, 10, 32_768);
        assert!(too_large.is_recoverable());
        assert_eq!(too_large.file_path(), Some(&PathBuf::from("big.png")));
        assert!(!ResizeError::parallel("test").is_recoverable());
        assert!(!ResizeError::from(ConfigError::MissingGeometry).is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ConfigError::IncompleteGeometry.exit_code(), 2);
        assert_eq!(ResizeError::from(ConfigError::MissingGeometry).exit_code(), 2);
        assert_eq!(ResizeError::config("bad file").exit_code(), 1);
    }

    #[test]
    fn test_file_path() {
        let source = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "broken",
        ));
        let err = ResizeError::decode("photo.jpg", source);
        assert_eq!(err.file_path(), Some(&PathBuf::from("photo.jpg")));
        assert!(ResizeError::config("test").file_path().is_none());
    }
}
