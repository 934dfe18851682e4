use std::path::{Path, PathBuf};

use log::debug;
use ndarray::Array2;

use crate::config::DataType;
use crate::error::{DatasetError, Result};

/// Cache file for one sample: `<sequence_dir>/<sample_id>-<seq_length>-<data_type>.txt`.
pub fn feature_path(
    sequence_dir: &Path,
    sample_id: &str,
    seq_length: usize,
    data_type: DataType,
) -> PathBuf {
    sequence_dir.join(format!("{sample_id}-{seq_length}-{data_type}.txt"))
}

/// Load the cached feature table at `path`.
///
/// Returns `Ok(None)` when the file does not exist; the caller decides
/// whether that is fatal.
pub fn load_features(path: &Path) -> Result<Option<Array2<f32>>> {
    if !path.is_file() {
        debug!("No feature file at {}", path.display());
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::FeatureRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_feature_table(&text, path).map(Some)
}

/// Parse whitespace-delimited numeric rows. Blank lines are ignored.
pub fn parse_feature_table(text: &str, path: &Path) -> Result<Array2<f32>> {
    let mut values: Vec<f32> = Vec::new();
    let mut width: Option<usize> = None;
    let mut rows = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let before = values.len();
        for tok in line.split_whitespace() {
            let v = tok.parse::<f32>().map_err(|_| DatasetError::FeatureParse {
                path: path.to_path_buf(),
                line: line_no + 1,
                message: format!("'{tok}' is not a number"),
            })?;
            values.push(v);
        }
        let found = values.len() - before;
        match width {
            None => width = Some(found),
            Some(expected) if expected != found => {
                return Err(DatasetError::RaggedFeatures {
                    context: format!("{} line {}", path.display(), line_no + 1),
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let width = width.unwrap_or(0);
    Ok(Array2::from_shape_vec((rows, width), values)?)
}
