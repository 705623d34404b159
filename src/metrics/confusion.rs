use std::collections::HashSet;

use nalgebra::{DMatrix, DVector};

use crate::data::dataset::WholeNumber;
use crate::error::TreeError;

type ConfusionMatrix = DMatrix<usize>;

/// Evaluation helpers shared by classifiers. Rows of the confusion matrix
/// are true classes, columns predicted classes, both in ascending label
/// order over the labels seen in either vector.
pub trait ClassificationMetrics<T: WholeNumber> {
    /// Computes the confusion matrix of true versus predicted labels.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the two vectors differ in length.
    fn confusion_matrix(
        &self,
        y_true: &DVector<T>,
        y_pred: &DVector<T>,
    ) -> Result<ConfusionMatrix, TreeError> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::InvalidInput(
                "predictions and labels are of different sizes".to_string(),
            ));
        }

        let mut classes_set = HashSet::<T>::new();
        classes_set.extend(y_true);
        classes_set.extend(y_pred);

        let mut classes = Vec::from_iter(classes_set.iter().cloned());
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());

        for (truth, prediction) in y_true.iter().zip(y_pred.iter()) {
            let row = classes.iter().position(|c| c == truth);
            let col = classes.iter().position(|c| c == prediction);
            if let (Some(row), Some(col)) = (row, col) {
                matrix[(row, col)] += 1;
            }
        }

        Ok(matrix)
    }

    /// Fraction of predictions matching the true labels.
    fn accuracy(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;

        let correct: usize = matrix.diagonal().iter().sum();

        Ok(correct as f64 / y_true.len() as f64)
    }
}
