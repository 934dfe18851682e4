use std::path::Path;

use csv::ReaderBuilder;
use log::debug;

use super::model::RawRecord;
use crate::error::{DatasetError, Result};

/// Read every row of a comma-delimited manifest, in file order.
///
/// There is no header row and rows may have any number of fields; validation
/// happens later in [`super::filter::clean_records`]. A file with no rows
/// yields an empty list.
pub fn read_manifest(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::ManifestUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| DatasetError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record.iter().map(|field| field.to_string()).collect());
    }

    debug!("Read {} manifest rows from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_rows_in_order_without_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("FilesData.csv");
        fs::write(&path, "Train,Run,v_run_01,80\nTest,Walk,v_walk_02,41,extra\n").unwrap();

        let rows = read_manifest(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Train", "Run", "v_run_01", "80"]);
        assert_eq!(rows[1].len(), 5);
    }

    #[test]
    fn empty_manifest_is_not_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("FilesData.csv");
        fs::write(&path, "").unwrap();
        assert!(read_manifest(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_manifest_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = read_manifest(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::ManifestUnavailable { .. }));
    }
}
