use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayD, IxDyn};

use crate::config::{DataType, DatasetConfig, MissingFeatures};
use crate::data::filter::clean_records;
use crate::data::manifest::read_manifest;
use crate::data::model::{SampleRecord, Split};
use crate::data::split::split_train_test;
use crate::data::vocabulary::ClassVocabulary;
use crate::error::{DatasetError, Result};
use crate::features::{feature_path, load_features};
use crate::frames::{build_image_sequence, resolve_frames, FrameDecoder, ImageDecoder};
use crate::sequence::{resample_rows, window_frames};

// ---------------------------------------------------------------------------
// LoadedSequences – the materialised partition
// ---------------------------------------------------------------------------

/// Inputs and one-hot labels for a whole partition, aligned on axis 0.
///
/// * Images: `inputs` is `(n, seq_length, height, width, channels)`
/// * Features: `inputs` is `(n, feature_target, feature_dim)`
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSequences {
    pub inputs: ArrayD<f32>,
    /// `(n, num_classes)`.
    pub labels: Array2<f32>,
}

impl LoadedSequences {
    /// Number of training examples.
    pub fn len(&self) -> usize {
        self.labels.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// SequenceDataset
// ---------------------------------------------------------------------------

/// Manifest-backed dataset of fixed-length frame or feature sequences.
///
/// The manifest is read and cleaned once at construction; everything after
/// that is read-only.
pub struct SequenceDataset {
    config: DatasetConfig,
    vocabulary: ClassVocabulary,
    records: Vec<SampleRecord>,
    decoder: Box<dyn FrameDecoder>,
}

impl SequenceDataset {
    /// Build from `config`, decoding frames with the `image` crate.
    pub fn new(config: DatasetConfig) -> Result<Self> {
        Self::with_decoder(config, Box::new(ImageDecoder))
    }

    /// Build from `config` with a custom frame decoder.
    pub fn with_decoder(config: DatasetConfig, decoder: Box<dyn FrameDecoder>) -> Result<Self> {
        config.validate()?;

        let raw = read_manifest(&config.manifest_path)?;
        // Vocabulary comes from the raw rows so that length filtering never
        // shifts class indices.
        let vocabulary = ClassVocabulary::from_records(&raw);
        let records = clean_records(&raw, config.seq_length, &vocabulary)?;

        info!(
            "Manifest {}: {} rows, {} usable samples, {} classes",
            config.manifest_path.display(),
            raw.len(),
            records.len(),
            vocabulary.len()
        );

        Ok(SequenceDataset {
            config,
            vocabulary,
            records,
            decoder,
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Sorted class labels.
    pub fn classes(&self) -> &[String] {
        self.vocabulary.classes()
    }

    pub fn vocabulary(&self) -> &ClassVocabulary {
        &self.vocabulary
    }

    /// Samples that passed cleaning, in manifest order.
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn class_index(&self, class: &str) -> Result<usize> {
        self.vocabulary.index_of(class)
    }

    pub fn class_one_hot(&self, class: &str) -> Result<Array1<f32>> {
        self.vocabulary.one_hot(class)
    }

    /// `(train, test)` groups of the cleaned samples.
    pub fn split(&self) -> (Vec<SampleRecord>, Vec<SampleRecord>) {
        split_train_test(&self.records)
    }

    /// Materialise every example of one partition in memory.
    pub fn load_partition(&self, which: Split) -> Result<LoadedSequences> {
        let (train, test) = self.split();
        let samples = match which {
            Split::Train => train,
            Split::Test => test,
        };

        info!(
            "Loading {} samples into memory for {}.",
            samples.len(),
            which.activity()
        );

        match self.config.data_type {
            DataType::Images => self.load_images(&samples),
            DataType::Features => self.load_feature_sequences(&samples, which),
        }
    }

    fn load_images(&self, samples: &[SampleRecord]) -> Result<LoadedSequences> {
        let window = self.config.seq_length;
        let shape = &self.config.image_shape;

        let mut inputs: Vec<f32> = Vec::new();
        let mut labels: Vec<f32> = Vec::new();
        let mut count = 0usize;

        for sample in samples {
            let frames = resolve_frames(
                &self.config.frames_root,
                sample,
                &self.config.image_extension,
            )?;
            let windows = window_frames(&frames, window);
            if windows.is_empty() {
                debug!("{sample}: {} frames, no full window", frames.len());
                continue;
            }
            let label = self.vocabulary.one_hot(&sample.class_label)?;

            for paths in &windows {
                for tensor in build_image_sequence(self.decoder.as_ref(), paths, shape)? {
                    inputs.extend(tensor.iter().copied());
                }
                labels.extend(label.iter().copied());
                count += 1;
            }
        }

        let [h, w, c] = shape.dims();
        let inputs = ArrayD::from_shape_vec(IxDyn(&[count, window, h, w, c]), inputs)?;
        let labels = Array2::from_shape_vec((count, self.vocabulary.len()), labels)?;
        Ok(LoadedSequences { inputs, labels })
    }

    fn load_feature_sequences(
        &self,
        samples: &[SampleRecord],
        which: Split,
    ) -> Result<LoadedSequences> {
        let target = self.config.feature_target();

        let mut inputs: Vec<f32> = Vec::new();
        let mut labels: Vec<f32> = Vec::new();
        let mut width: Option<usize> = None;
        let mut count = 0usize;

        for sample in samples {
            let path = feature_path(
                &self.config.sequence_dir,
                &sample.sample_id,
                self.config.seq_length,
                self.config.data_type,
            );
            let table = match load_features(&path)? {
                Some(table) => table,
                None => match self.config.missing_features {
                    MissingFeatures::Fail => {
                        return Err(DatasetError::FeaturesUnavailable { path });
                    }
                    MissingFeatures::Skip => {
                        warn!("Skipping {sample}: no features at {}", path.display());
                        continue;
                    }
                },
            };

            let sequence = resample_rows(&table, target)?;
            let found = sequence.ncols();
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(DatasetError::RaggedFeatures {
                        context: format!("{which} partition, sample {}", sample.sample_id),
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }

            inputs.extend(sequence.iter().copied());
            labels.extend(self.vocabulary.one_hot(&sample.class_label)?.iter().copied());
            count += 1;
        }

        let dim = width.unwrap_or(0);
        let inputs = ArrayD::from_shape_vec(IxDyn(&[count, target, dim]), inputs)?;
        let labels = Array2::from_shape_vec((count, self.vocabulary.len()), labels)?;
        Ok(LoadedSequences { inputs, labels })
    }
}
