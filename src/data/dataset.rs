use crate::error::TreeError;
use nalgebra::{DMatrix, DVector};
use num_traits::{Float, FromPrimitive, Num, ToPrimitive};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::PartialOrd;
use std::fmt::{self, Display};
use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + FromPrimitive
        + ToPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + Display
        + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

/// Integer-like values: exact equality, orderable, hashable. Class labels
/// are required to satisfy this.
pub trait WholeNumber: Number + Eq + Hash {}
impl<T> WholeNumber for T where T: Number + Eq + Hash {}

pub trait RealNumber: Number + Float {}
impl<T> RealNumber for T where T: Number + Float {}

/// A fixed-width observation matrix paired with its label vector.
///
/// `x` holds one observation per row and one feature per column; `y` holds
/// the parallel labels, one per row of `x`.
pub struct Dataset<XT: Number, YT: WholeNumber> {
    pub x: DMatrix<XT>,
    pub y: DVector<YT>,
}

impl<XT: Number, YT: WholeNumber> Debug for Dataset<XT, YT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset {{\n    x: [\n")?;

        for i in 0..self.x.nrows() {
            write!(f, "        [")?;
            for j in 0..self.x.ncols() {
                write!(f, "{:?}, ", self.x[(i, j)])?;
            }
            writeln!(f, "],")?;
        }

        write!(f, "    ],\n    y: [")?;
        for i in 0..self.y.len() {
            write!(f, "{:?}, ", self.y[i])?;
        }
        write!(f, "]\n}}")
    }
}

impl<XT: Number, YT: WholeNumber> Dataset<XT, YT> {
    pub fn new(x: DMatrix<XT>, y: DVector<YT>) -> Self {
        Self { x, y }
    }

    pub fn into_parts(&self) -> (&DMatrix<XT>, &DVector<YT>) {
        (&self.x, &self.y)
    }

    pub fn is_not_empty(&self) -> bool {
        !(self.x.is_empty() || self.y.is_empty())
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// Splits the observations into two datasets on one feature column.
    ///
    /// Rows whose value in `feature_index` is strictly less than `threshold`
    /// go left, all others go right. An empty side is returned as a dataset
    /// with zero rows and the original column count.
    pub fn partition(&self, feature_index: usize, threshold: XT) -> (Self, Self) {
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            (0..self.x.nrows()).partition(|&row| self.x[(row, feature_index)] < threshold);

        (self.select_rows(&left_rows), self.select_rows(&right_rows))
    }

    fn select_rows(&self, rows: &[usize]) -> Self {
        if rows.is_empty() {
            return Self::new(DMatrix::zeros(0, self.x.ncols()), DVector::zeros(0));
        }
        let x = self.x.select_rows(rows);
        let y = DVector::from_iterator(rows.len(), rows.iter().map(|&row| self.y[row]));
        Self::new(x, y)
    }

    /// Shuffles the observations and splits them into a train and a test
    /// dataset. `train_size` is the fraction of rows assigned to the train
    /// side.
    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), TreeError> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidInput(
                "train size should be between 0.0 and 1.0".to_string(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.x.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_rows = (self.x.nrows() as f64 * train_size).floor() as usize;

        Ok((
            self.select_rows(&indices[..train_rows]),
            self.select_rows(&indices[train_rows..]),
        ))
    }

    /// Draws a bootstrap sample of `sample_size` rows with replacement.
    /// Forest orchestrators use this to resample per tree.
    pub fn samples(&self, sample_size: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let nrows = self.x.nrows();
        let sample_rows = (0..sample_size)
            .map(|_| rng.gen_range(0..nrows))
            .collect::<Vec<_>>();

        self.select_rows(&sample_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_new() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x.clone(), y.clone());
        assert_eq!(dataset.x, x);
        assert_eq!(dataset.y, y);
    }

    #[test]
    fn test_dataset_into_parts() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x.clone(), y.clone());
        let (x_part, y_part) = dataset.into_parts();
        assert_eq!(x_part, &x);
        assert_eq!(y_part, &y);
    }

    #[test]
    fn test_dataset_is_not_empty() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x, y);
        assert!(dataset.is_not_empty());

        let empty_x = DMatrix::<f64>::from_row_slice(0, 2, &[]);
        let empty_y = DVector::<i32>::from_vec(vec![]);
        let empty_dataset = Dataset::new(empty_x, empty_y);
        assert!(!empty_dataset.is_not_empty());
    }

    #[test]
    fn test_dataset_partition_is_strict() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        // Row with value exactly 5.0 must land on the right side.
        let (left, right) = dataset.partition(0, 5.0);
        assert_eq!(left.x.nrows(), 2);
        assert_eq!(right.x.nrows(), 2);
        assert_eq!(left.y, DVector::from_vec(vec![9, 10]));
        assert_eq!(right.y, DVector::from_vec(vec![11, 12]));
    }

    #[test]
    fn test_dataset_partition_left_empty() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let (left, right) = dataset.partition(0, -1.0);
        assert_eq!(left.x.nrows(), 0);
        assert_eq!(left.x.ncols(), 2);
        assert_eq!(right.x.nrows(), 4);
    }

    #[test]
    fn test_dataset_partition_right_empty() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let (left, right) = dataset.partition(0, 9.0);
        assert_eq!(left.x.nrows(), 4);
        assert_eq!(right.x.nrows(), 0);
    }

    #[test]
    fn test_dataset_train_test_split() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let (train, test) = dataset.train_test_split(0.75, None).unwrap();
        assert_eq!(train.x.nrows(), 3);
        assert_eq!(test.x.nrows(), 1);
    }

    #[test]
    fn test_dataset_train_test_split_rejects_bad_fraction() {
        let x = DMatrix::from_row_slice(2, 1, &[1.0, 2.0]);
        let y = DVector::from_vec(vec![0, 1]);
        let dataset = Dataset::new(x, y);

        assert!(matches!(
            dataset.train_test_split(1.5, None),
            Err(TreeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dataset_samples() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let sampled = dataset.samples(2, None);
        assert_eq!(sampled.x.nrows(), 2);
    }

    #[test]
    fn test_dataset_samples_with_seed_is_deterministic() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let first = dataset.samples(3, Some(1000));
        let second = dataset.samples(3, Some(1000));
        assert_eq!(first.x, second.x);
        assert_eq!(first.y, second.y);
    }
}
