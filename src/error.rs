use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while discovering, validating or materialising sequences.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The manifest file is missing or could not be opened.
    #[error("Manifest unavailable at {path}: {source}")]
    ManifestUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The manifest could not be read as comma-delimited text.
    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: csv::Error,
    },
    /// A manifest row declares a frame count that is not a non-negative integer.
    #[error("Manifest row {row}: frame count '{value}' is not a valid integer")]
    MalformedFrameCount { row: usize, value: String },
    /// A class label that is not part of the vocabulary.
    #[error("Unknown class '{0}'")]
    InvalidClass(String),
    /// Resampling asked for more rows than the sequence holds.
    #[error("Cannot resample {available} rows down to {target}")]
    ResampleTooShort { available: usize, target: usize },
    /// A required feature cache file does not exist.
    #[error("Feature file missing: {path}")]
    FeaturesUnavailable { path: PathBuf },
    /// A feature cache file exists but could not be read.
    #[error("Failed to read feature file {path}: {source}")]
    FeatureRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A feature cache file contains a non-numeric token.
    #[error("Invalid feature file {path}, line {line}: {message}")]
    FeatureParse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    /// Feature rows of differing widths, within a file or across a partition.
    #[error("Feature width mismatch in {context}: expected {expected}, found {found}")]
    RaggedFeatures {
        context: String,
        expected: usize,
        found: usize,
    },
    /// A frame image could not be decoded.
    #[error("Failed to decode frame {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// A frame directory exists but could not be listed.
    #[error("Failed to list frames in {path}: {source}")]
    FrameDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Stacked sequences did not fit the expected array shape.
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for [`crate::DatasetConfig`].
    #[error("Invalid config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
