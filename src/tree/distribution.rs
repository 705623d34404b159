use crate::data::dataset::WholeNumber;
use crate::error::TreeError;
use nalgebra::DVector;
use std::cmp::Ordering;
use std::collections::HashMap;

/// The empirical class distribution of a label vector: for every label
/// present, the fraction of observations carrying it.
///
/// Proportions are non-negative and sum to 1.0 within floating-point
/// tolerance. Absent labels have no entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDistribution<YT: WholeNumber> {
    proportions: HashMap<YT, f64>,
}

impl<YT: WholeNumber> ClassDistribution<YT> {
    /// Counts the labels in `labels` and converts the counts to fractions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the label vector is empty.
    pub fn from_labels(labels: &DVector<YT>) -> Result<Self, TreeError> {
        if labels.is_empty() {
            return Err(TreeError::InvalidInput(
                "cannot compute class proportions of an empty label vector".to_string(),
            ));
        }

        let mut counts = HashMap::new();
        for label in labels.iter() {
            *counts.entry(*label).or_insert(0_usize) += 1;
        }

        Ok(Self::from_counts(&counts, labels.len()))
    }

    /// Converts precomputed label counts to fractions of `total`.
    /// Zero-count entries are skipped so the distribution only carries
    /// labels actually present.
    pub(crate) fn from_counts(counts: &HashMap<YT, usize>, total: usize) -> Self {
        let proportions = counts
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&label, &count)| (label, count as f64 / total as f64))
            .collect();

        Self { proportions }
    }

    pub fn proportion(&self, label: &YT) -> Option<f64> {
        self.proportions.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&YT, &f64)> {
        self.proportions.iter()
    }

    /// Number of distinct labels present.
    pub fn len(&self) -> usize {
        self.proportions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proportions.is_empty()
    }

    /// The single label carrying the whole distribution, if there is
    /// exactly one.
    pub fn sole_label(&self) -> Option<YT> {
        if self.proportions.len() == 1 {
            self.proportions.keys().next().copied()
        } else {
            None
        }
    }

    /// The label with the highest proportion. Ties are broken toward the
    /// smaller label so the result does not depend on hash iteration order.
    pub fn majority_label(&self) -> Option<YT> {
        self.proportions
            .iter()
            .max_by(|(label_a, prop_a), (label_b, prop_b)| {
                prop_a
                    .partial_cmp(prop_b)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| {
                        label_b
                            .partial_cmp(label_a)
                            .unwrap_or(Ordering::Equal)
                    })
            })
            .map(|(&label, _)| label)
    }
}
