use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Enumerated options
// ---------------------------------------------------------------------------

/// What each sample is materialised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataType {
    /// Decoded frame images, windowed into fixed-length sequences.
    #[default]
    Images,
    /// Pre-extracted feature tables from the sequence cache.
    Features,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Images => write!(f, "Images"),
            DataType::Features => write!(f, "Features"),
        }
    }
}

/// How the assembler reacts to a sample whose feature file is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingFeatures {
    /// Abort the partition load with [`DatasetError::FeaturesUnavailable`].
    #[default]
    Fail,
    /// Log a warning and leave the sample out.
    Skip,
}

/// Target frame tensor shape as (height, width, channels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageShape {
    pub height: u32,
    pub width: u32,
    pub channels: usize,
}

impl Default for ImageShape {
    fn default() -> Self {
        Self {
            height: 224,
            width: 224,
            channels: 3,
        }
    }
}

impl ImageShape {
    pub fn new(height: u32, width: u32, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    /// `[height, width, channels]` as array dimensions.
    pub fn dims(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, self.channels]
    }
}

// ---------------------------------------------------------------------------
// DatasetConfig
// ---------------------------------------------------------------------------

/// Construction parameters for [`crate::SequenceDataset`].
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides:
///
/// ```json
/// { "seq_length": 20, "data_type": "Features", "sequence_dir": "cache" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Comma-delimited manifest, one sample per row, no header.
    pub manifest_path: PathBuf,
    /// Directory holding `<partition>/<class>/<sample_id>*.<ext>` frames.
    pub frames_root: PathBuf,
    /// Directory holding `<sample_id>-<seq_length>-<data_type>.txt` feature files.
    pub sequence_dir: PathBuf,
    /// Window length and minimum declared frame count.
    pub seq_length: usize,
    pub data_type: DataType,
    pub image_shape: ImageShape,
    /// Frame file extension, without the leading dot.
    pub image_extension: String,
    /// Rows each feature sequence is resampled to. `None` means `seq_length`.
    pub feature_target: Option<usize>,
    pub missing_features: MissingFeatures,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("./workspace/FilesData.csv"),
            frames_root: PathBuf::from("."),
            sequence_dir: PathBuf::from("./workspace/sequences"),
            seq_length: 40,
            data_type: DataType::Images,
            image_shape: ImageShape::default(),
            image_extension: "jpg".to_string(),
            feature_target: None,
            missing_features: MissingFeatures::Fail,
        }
    }
}

impl DatasetConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DatasetConfig =
            serde_json::from_str(&text).map_err(|source| DatasetError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Resample target for feature mode.
    pub fn feature_target(&self) -> usize {
        self.feature_target.unwrap_or(self.seq_length)
    }

    pub fn validate(&self) -> Result<()> {
        if self.seq_length == 0 {
            return Err(DatasetError::Config("seq_length must be positive".into()));
        }
        let shape = &self.image_shape;
        if shape.height == 0 || shape.width == 0 {
            return Err(DatasetError::Config(format!(
                "image_shape {}x{} has a zero dimension",
                shape.height, shape.width
            )));
        }
        if !matches!(shape.channels, 1 | 3 | 4) {
            return Err(DatasetError::Config(format!(
                "image_shape channels must be 1, 3 or 4, got {}",
                shape.channels
            )));
        }
        if self.feature_target == Some(0) {
            return Err(DatasetError::Config("feature_target must be positive".into()));
        }
        Ok(())
    }
}
