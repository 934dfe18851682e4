use std::num::IntErrorKind;

use log::debug;

use super::model::{is_empty_record, RawRecord, SampleRecord};
use super::vocabulary::ClassVocabulary;
use crate::error::{DatasetError, Result};

/// Minimum fields a usable row carries: partition, class, sample id, frame count.
const REQUIRED_FIELDS: usize = 4;

/// Keep the rows that can produce at least one full sequence.
///
/// A row survives when:
/// * it is non-empty and has all four required fields (otherwise dropped silently)
/// * its declared frame count is at least `seq_length`
/// * its class is in `vocabulary`
///
/// Input order is preserved. Negative counts are simply too short. A frame
/// count that is not an integer at all fails the whole manifest with
/// [`DatasetError::MalformedFrameCount`].
pub fn clean_records(
    records: &[RawRecord],
    seq_length: usize,
    vocabulary: &ClassVocabulary,
) -> Result<Vec<SampleRecord>> {
    let mut clean = Vec::with_capacity(records.len());

    for (row, rec) in records.iter().enumerate() {
        if is_empty_record(rec) {
            continue;
        }
        if rec.len() < REQUIRED_FIELDS {
            debug!("Dropping manifest row {row}: only {} fields", rec.len());
            continue;
        }

        let declared = parse_frame_count(&rec[3]).ok_or_else(|| {
            DatasetError::MalformedFrameCount {
                row,
                value: rec[3].clone(),
            }
        })?;

        if declared < seq_length as i128 {
            debug!("Dropping manifest row {row}: {declared} frames < {seq_length}");
            continue;
        }
        let frame_count = usize::try_from(declared).unwrap_or(usize::MAX);
        if !vocabulary.contains(&rec[1]) {
            debug!("Dropping manifest row {row}: class '{}' not in vocabulary", rec[1]);
            continue;
        }

        clean.push(SampleRecord {
            partition: rec[0].clone(),
            class_label: rec[1].clone(),
            sample_id: rec[2].clone(),
            frame_count,
            extra: rec[REQUIRED_FIELDS..].to_vec(),
        });
    }

    Ok(clean)
}

/// Parse a declared frame count as a signed integer.
///
/// Values beyond the `i128` range saturate rather than fail. `None` means the
/// text is not an integer.
fn parse_frame_count(text: &str) -> Option<i128> {
    match text.trim().parse::<i128>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i128::MAX),
            IntErrorKind::NegOverflow => Some(i128::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> RawRecord {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn keeps_only_long_enough_known_samples_in_order() {
        let records = vec![
            row(&["Train", "Run", "a", "80"]),
            row(&["Train", "Walk", "b", "39"]),
            vec![],
            row(&["Test", "Walk", "c", "40"]),
            row(&["Test", "Run"]),
        ];
        let vocab = ClassVocabulary::from_records(&records);
        let clean = clean_records(&records, 40, &vocab).unwrap();

        let ids: Vec<&str> = clean.iter().map(|r| r.sample_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        for rec in &clean {
            assert!(rec.frame_count >= 40);
            assert!(vocab.contains(&rec.class_label));
        }
    }

    #[test]
    fn classes_outside_vocabulary_are_dropped() {
        let records = vec![row(&["Train", "Run", "a", "80"]), row(&["Train", "Swim", "b", "80"])];
        let vocab = ClassVocabulary::from_records(&records[..1]);
        let clean = clean_records(&records, 10, &vocab).unwrap();
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].class_label, "Run");
    }

    #[test]
    fn extra_fields_are_preserved() {
        let records = vec![row(&["Train", "Run", "a", "80", "note"])];
        let vocab = ClassVocabulary::from_records(&records);
        let clean = clean_records(&records, 40, &vocab).unwrap();
        assert_eq!(clean[0].extra, vec!["note"]);
    }

    #[test]
    fn negative_frame_count_is_dropped_as_too_short() {
        let records = vec![
            row(&["Train", "Run", "a", "80"]),
            row(&["Train", "Run", "b", "-1"]),
            row(&["Test", "Run", "c", " 41 "]),
        ];
        let vocab = ClassVocabulary::from_records(&records);
        let clean = clean_records(&records, 40, &vocab).unwrap();

        let ids: Vec<&str> = clean.iter().map(|r| r.sample_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(clean[1].frame_count, 41);
    }

    #[test]
    fn oversized_frame_counts_saturate() {
        let records = vec![
            row(&["Train", "Run", "huge", "99999999999999999999999"]),
            row(&["Train", "Run", "huger", "9999999999999999999999999999999999999999999"]),
            row(&["Train", "Run", "tiny", "-9999999999999999999999999999999999999999999"]),
        ];
        let vocab = ClassVocabulary::from_records(&records);
        let clean = clean_records(&records, 40, &vocab).unwrap();

        assert_eq!(clean.len(), 2);
        assert!(clean.iter().all(|r| r.frame_count == usize::MAX));
    }

    #[test]
    fn fractional_frame_count_is_malformed() {
        let records = vec![row(&["Train", "Run", "a", "40.5"])];
        let vocab = ClassVocabulary::from_records(&records);
        assert!(matches!(
            clean_records(&records, 40, &vocab),
            Err(DatasetError::MalformedFrameCount { row: 0, .. })
        ));
    }

    #[test]
    fn non_numeric_frame_count_is_malformed() {
        let records = vec![row(&["Train", "Run", "a", "eighty"])];
        let vocab = ClassVocabulary::from_records(&records);
        let err = clean_records(&records, 40, &vocab).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MalformedFrameCount { row: 0, ref value } if value == "eighty"
        ));
    }
}
