//! Error types for leafy.

use serde::Serialize;

/// Result type alias for leafy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for leafy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Source photo is unreadable or not a valid image.
    #[error("failed to decode image '{path}'")]
    ImageDecode {
        /// Path to the photo.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Re-encoding the photo to the model raster format failed.
    #[error("failed to re-encode image '{path}' for the model")]
    UnsupportedFormat {
        /// Path to the photo.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No model path was configured.
    #[error("no model specified (use --model or set model.path in config)")]
    ModelNotConfigured,

    /// Model artifact is missing or corrupt.
    #[error("failed to load model '{path}': {reason}")]
    ModelLoad {
        /// Path to the model file.
        path: std::path::PathBuf,
        /// Description of the load failure.
        reason: String,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Model output contained no class indices.
    #[error("model produced an empty prediction")]
    EmptyPrediction,

    /// Class index outside the label space.
    #[error("class index {index} is outside the label space")]
    InvalidClassIndex {
        /// The offending index.
        index: i64,
    },

    /// Summary lookup for a species failed.
    #[error("could not resolve species '{species}'")]
    SpeciesNotResolvable {
        /// Species name used as the lookup key.
        species: String,
        /// Underlying fetch error.
        #[source]
        source: crate::knowledge::FetchError,
    },

    /// Failed to build the HTTP client.
    #[error("failed to create HTTP client: {reason}")]
    HttpClient {
        /// Description of the failure.
        reason: String,
    },

    /// Failed to write JSON output.
    #[error("failed to write JSON output")]
    JsonWrite {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

/// Coarse classification of an [`Error`] for rendering user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Photo could not be decoded.
    ImageDecode,
    /// Photo could not be re-encoded.
    UnsupportedFormat,
    /// Model could not be loaded.
    ModelLoad,
    /// Forward pass failed.
    Inference,
    /// Model output was empty.
    EmptyPrediction,
    /// Voted index has no label.
    InvalidClassIndex,
    /// Summary stage failed.
    SpeciesNotResolvable,
    /// Configuration problem.
    Config,
    /// Anything else.
    Internal,
}

impl Error {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ImageDecode { .. } => ErrorKind::ImageDecode,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::ModelNotConfigured | Self::ModelLoad { .. } => ErrorKind::ModelLoad,
            Self::Inference { .. } => ErrorKind::Inference,
            Self::EmptyPrediction => ErrorKind::EmptyPrediction,
            Self::InvalidClassIndex { .. } => ErrorKind::InvalidClassIndex,
            Self::SpeciesNotResolvable { .. } => ErrorKind::SpeciesNotResolvable,
            Self::ConfigDirNotFound
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigValidation { .. }
            | Self::ConfigWrite { .. }
            | Self::ConfigSerialize { .. } => ErrorKind::Config,
            Self::Io(_) | Self::HttpClient { .. } | Self::JsonWrite { .. } | Self::Internal { .. } => {
                ErrorKind::Internal
            }
        }
    }
}
