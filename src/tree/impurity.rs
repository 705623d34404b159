use super::distribution::ClassDistribution;
use crate::data::dataset::WholeNumber;

/// An impurity metric maps a class distribution to a non-negative score,
/// 0.0 meaning pure. A plain function value is injected per tree at
/// construction time, so alternates drop in without touching any consumer.
pub type ImpurityFn<YT> = fn(&ClassDistribution<YT>) -> f64;

/// Gini index: `sum over labels of p * (1 - p)`.
///
/// Zero exactly when one label holds the whole distribution; the maximum is
/// `1 - 1/k` for `k` equally likely classes.
pub fn gini_index<YT: WholeNumber>(distribution: &ClassDistribution<YT>) -> f64 {
    distribution
        .iter()
        .map(|(_, &proportion)| proportion * (1.0 - proportion))
        .sum()
}

/// Shannon entropy: `-sum over labels of p * ln(p)`.
pub fn entropy<YT: WholeNumber>(distribution: &ClassDistribution<YT>) -> f64 {
    -distribution
        .iter()
        .map(|(_, &proportion)| proportion * proportion.ln())
        .sum::<f64>()
}
