//! Manifest-driven loader for labelled video-frame and feature sequences.
//!
//! ```text
//!  DatasetConfig ──▶ SequenceDataset::new
//!                         │  manifest → vocabulary → clean
//!                         ▼
//!                  load_partition(Split)
//!                    ├─ Images:   resolve frames → window → decode
//!                    └─ Features: cache file → resample rows
//!                         ▼
//!                  LoadedSequences { inputs, labels }
//! ```

pub mod config;
pub mod data;
pub mod dataset;
pub mod error;
pub mod features;
pub mod frames;
pub mod sequence;

pub use config::{DataType, DatasetConfig, ImageShape, MissingFeatures};
pub use data::model::{SampleRecord, Split};
pub use data::vocabulary::ClassVocabulary;
pub use dataset::{LoadedSequences, SequenceDataset};
pub use error::{DatasetError, Result};
pub use frames::{FrameDecoder, ImageDecoder};
