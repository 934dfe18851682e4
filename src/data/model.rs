use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// RawRecord – one unvalidated manifest row
// ---------------------------------------------------------------------------

/// A manifest row exactly as read: the ordered string fields.
pub type RawRecord = Vec<String>;

/// Partition tag that marks a training sample. Anything else is test data.
pub const TRAIN_TAG: &str = "Train";

/// Whether a raw row carries no data at all (blank line or only empty cells).
pub fn is_empty_record(record: &RawRecord) -> bool {
    record.iter().all(|field| field.is_empty())
}

// ---------------------------------------------------------------------------
// SampleRecord – a validated manifest row
// ---------------------------------------------------------------------------

/// One labelled sample that passed the manifest filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    /// Partition tag, `"Train"` for training data.
    pub partition: String,
    pub class_label: String,
    /// Prefix of the frame files and stem of the feature cache file.
    pub sample_id: String,
    /// Total frames the manifest declares for this sample.
    pub frame_count: usize,
    /// Trailing manifest fields beyond the first four, kept verbatim.
    pub extra: Vec<String>,
}

impl SampleRecord {
    pub fn is_train(&self) -> bool {
        self.partition == TRAIN_TAG
    }
}

impl fmt::Display for SampleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} ({} frames)",
            self.partition, self.class_label, self.sample_id, self.frame_count
        )
    }
}

// ---------------------------------------------------------------------------
// Split – which partition to load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    /// Gerund used in progress logs ("training" / "testing").
    pub fn activity(&self) -> &'static str {
        match self {
            Split::Train => "training",
            Split::Test => "testing",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Train => write!(f, "Train"),
            Split::Test => write!(f, "Test"),
        }
    }
}

impl FromStr for Split {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            other => Err(format!("unknown split '{other}', expected train or test")),
        }
    }
}
