use std::collections::BTreeSet;

use ndarray::Array1;

use super::model::{is_empty_record, RawRecord};
use crate::error::{DatasetError, Result};

/// Sorted, deduplicated class labels. A class's index is its sorted position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassVocabulary {
    classes: Vec<String>,
}

impl ClassVocabulary {
    /// Collect the label column (field 1) of every non-empty raw row.
    pub fn from_records(records: &[RawRecord]) -> Self {
        let unique: BTreeSet<&str> = records
            .iter()
            .filter(|rec| !is_empty_record(rec))
            .filter_map(|rec| rec.get(1))
            .map(String::as_str)
            .collect();

        ClassVocabulary {
            classes: unique.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.index_of(class).is_ok()
    }

    /// Canonical integer index of `class`.
    pub fn index_of(&self, class: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(class))
            .map_err(|_| DatasetError::InvalidClass(class.to_string()))
    }

    /// Unit vector of vocabulary length with a 1.0 at the class index.
    pub fn one_hot(&self, class: &str) -> Result<Array1<f32>> {
        let index = self.index_of(class)?;
        let mut label = Array1::zeros(self.classes.len());
        label[index] = 1.0;
        Ok(label)
    }
}
