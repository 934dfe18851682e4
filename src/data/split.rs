use super::model::SampleRecord;

/// Partition records into `(train, test)` by their partition tag.
///
/// Only the exact tag `"Train"` selects the training group; every other value
/// lands in test. Order is preserved within each group.
pub fn split_train_test(records: &[SampleRecord]) -> (Vec<SampleRecord>, Vec<SampleRecord>) {
    records.iter().cloned().partition(|rec| rec.is_train())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(partition: &str, id: &str) -> SampleRecord {
        SampleRecord {
            partition: partition.to_string(),
            class_label: "Run".to_string(),
            sample_id: id.to_string(),
            frame_count: 40,
            extra: Vec::new(),
        }
    }

    #[test]
    fn split_is_a_strict_partition() {
        let records = vec![
            sample("Train", "a"),
            sample("Test", "b"),
            sample("train", "c"),
            sample("Train", "d"),
            sample("Validation", "e"),
        ];
        let (train, test) = split_train_test(&records);

        let train_ids: Vec<&str> = train.iter().map(|r| r.sample_id.as_str()).collect();
        let test_ids: Vec<&str> = test.iter().map(|r| r.sample_id.as_str()).collect();
        assert_eq!(train_ids, vec!["a", "d"]);
        assert_eq!(test_ids, vec!["b", "c", "e"]);
        assert_eq!(train.len() + test.len(), records.len());
        assert!(train.iter().all(|t| !test.contains(t)));
    }
}
