use super::distribution::ClassDistribution;
use super::impurity::ImpurityFn;
use crate::data::dataset::{RealNumber, WholeNumber};
use nalgebra::DVector;
use std::collections::HashMap;

/// One candidate split of a feature column: the threshold and the combined
/// impurity of the two sides it induces.
///
/// The score is `|left| * impurity(left) + |right| * impurity(right)`,
/// intentionally not normalized by the region size. Candidates are only
/// compared within one node, where the region size is constant.
#[derive(Clone, Debug)]
pub struct CandidateSplit<XT: RealNumber> {
    pub threshold: XT,
    pub weighted_impurity: f64,
}

/// Lazily scans one feature column for candidate splits.
///
/// Observations are sorted by feature value once; the iterator then walks
/// the sorted order and emits a candidate at every boundary between two
/// distinct values. The threshold is the midpoint of the two values, so a
/// run of equal values is never split and a constant column yields nothing.
/// Class counts for both sides are maintained incrementally across the walk.
pub struct SplitScan<XT: RealNumber, YT: WholeNumber> {
    pairs: Vec<(XT, YT)>,
    left_counts: HashMap<YT, usize>,
    right_counts: HashMap<YT, usize>,
    position: usize,
    impurity: ImpurityFn<YT>,
}

impl<XT: RealNumber, YT: WholeNumber> SplitScan<XT, YT> {
    pub fn new(feature: &DVector<XT>, labels: &DVector<YT>, impurity: ImpurityFn<YT>) -> Self {
        debug_assert_eq!(feature.len(), labels.len());

        let mut pairs = feature
            .iter()
            .zip(labels.iter())
            .map(|(&value, &label)| (value, label))
            .collect::<Vec<_>>();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_counts = HashMap::new();
        let mut right_counts = HashMap::new();
        if !pairs.is_empty() {
            left_counts.insert(pairs[0].1, 1);
            for &(_, label) in &pairs[1..] {
                *right_counts.entry(label).or_insert(0_usize) += 1;
            }
        }

        Self {
            pairs,
            left_counts,
            right_counts,
            position: 1,
            impurity,
        }
    }
}

impl<XT: RealNumber, YT: WholeNumber> Iterator for SplitScan<XT, YT> {
    type Item = CandidateSplit<XT>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.pairs.len();

        while self.position < total {
            let previous_value = self.pairs[self.position - 1].0;
            let (current_value, current_label) = self.pairs[self.position];

            // Left side is pairs[..position]; score the boundary before
            // moving the current observation across it.
            let candidate = if current_value != previous_value {
                let left_size = self.position;
                let right_size = total - self.position;
                let left = ClassDistribution::from_counts(&self.left_counts, left_size);
                let right = ClassDistribution::from_counts(&self.right_counts, right_size);

                Some(CandidateSplit {
                    threshold: (previous_value + current_value) / XT::from_f64(2.0).unwrap(),
                    weighted_impurity: left_size as f64 * (self.impurity)(&left)
                        + right_size as f64 * (self.impurity)(&right),
                })
            } else {
                None
            };

            *self.left_counts.entry(current_label).or_insert(0) += 1;
            if let Some(count) = self.right_counts.get_mut(&current_label) {
                *count -= 1;
                if *count == 0 {
                    self.right_counts.remove(&current_label);
                }
            }
            self.position += 1;

            if candidate.is_some() {
                return candidate;
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::impurity::gini_index;
    use approx::assert_abs_diff_eq;

    fn scan(feature: Vec<f64>, labels: Vec<i32>) -> Vec<CandidateSplit<f64>> {
        SplitScan::new(
            &DVector::from_vec(feature),
            &DVector::from_vec(labels),
            gini_index,
        )
        .collect()
    }

    #[test]
    fn test_equal_value_runs_are_never_split() {
        let candidates = scan(vec![1.0, 1.0, 2.0, 3.0], vec![0, 0, 1, 1]);

        assert_eq!(candidates.len(), 2);
        assert_abs_diff_eq!(candidates[0].threshold, 1.5);
        assert_abs_diff_eq!(candidates[1].threshold, 2.5);
    }

    #[test]
    fn test_constant_column_yields_nothing() {
        let candidates = scan(vec![4.0, 4.0, 4.0], vec![0, 1, 0]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_single_observation_yields_nothing() {
        let candidates = scan(vec![4.0], vec![0]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_thresholds_ascend_with_unsorted_input() {
        let candidates = scan(vec![3.0, 1.0, 2.0], vec![0, 0, 1]);

        let thresholds: Vec<f64> = candidates.iter().map(|c| c.threshold).collect();
        assert_eq!(thresholds, vec![1.5, 2.5]);
    }

    #[test]
    fn test_weighted_impurity_of_perfect_boundary() {
        let candidates = scan(vec![1.0, 2.0, 3.0, 4.0], vec![0, 0, 1, 1]);

        assert_eq!(candidates.len(), 3);
        // Cutting between the two classes leaves both sides pure.
        assert_abs_diff_eq!(candidates[1].threshold, 2.5);
        assert_abs_diff_eq!(candidates[1].weighted_impurity, 0.0);

        // Cutting inside a class leaves a mixed three-row side:
        // 3 * gini({1/3, 2/3}) = 3 * 4/9.
        assert_abs_diff_eq!(
            candidates[0].weighted_impurity,
            3.0 * (4.0 / 9.0),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            candidates[2].weighted_impurity,
            3.0 * (4.0 / 9.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_scores_are_not_normalized_by_region_size() {
        // Both sides fully mixed: 2 * 0.5 + 2 * 0.5 = 2, not 0.5.
        let candidates = scan(vec![1.0, 1.0, 2.0, 2.0], vec![0, 1, 0, 1]);

        assert_eq!(candidates.len(), 1);
        assert_abs_diff_eq!(candidates[0].weighted_impurity, 2.0, epsilon = 1e-9);
    }
}
