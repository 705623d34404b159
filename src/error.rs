use thiserror::Error;

/// Errors reported by tree training, prediction and the surrounding data
/// plumbing. Every failure is deterministic for a given input and is
/// surfaced to the caller; a failed `fit` leaves the tree untrained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Malformed input shape: empty label vector, empty dataset, or a
    /// row/label count mismatch.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `fit` was called on a tree that has already been trained.
    #[error("cannot retrain an already trained tree")]
    AlreadyTrained,

    /// `predict` was called before the tree was trained.
    #[error("the tree has not been trained yet")]
    NotTrained,

    /// A prediction input's width differs from the trained feature count.
    #[error("expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },
}
