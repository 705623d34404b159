//! Decision Tree Classifier
use super::builder;
use super::impurity::{gini_index, ImpurityFn};
use super::node::Node;
use crate::data::dataset::{Dataset, RealNumber, WholeNumber};
use crate::error::TreeError;
use crate::metrics::confusion::ClassificationMetrics;
use nalgebra::{DMatrix, DVector};

/// A CART classification tree.
///
/// The tree is grown recursively until every region is pure, with the
/// impurity metric injected at construction time (Gini by default). Nodes
/// live in a flat arena in pre-order; training fills the arena exactly once
/// and prediction walks it read-only, so a trained tree can serve
/// concurrent `predict` calls.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<XT: RealNumber, YT: WholeNumber> {
    nodes: Vec<Node<XT, YT>>,
    num_features: Option<usize>,
    impurity: ImpurityFn<YT>,
}

impl<XT: RealNumber, YT: WholeNumber> Default for DecisionTreeClassifier<XT, YT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: RealNumber, YT: WholeNumber> ClassificationMetrics<YT> for DecisionTreeClassifier<XT, YT> {}

impl<XT: RealNumber, YT: WholeNumber> DecisionTreeClassifier<XT, YT> {
    /// Creates an untrained tree using the Gini index.
    pub fn new() -> Self {
        Self::with_impurity(gini_index)
    }

    /// Creates an untrained tree using a custom impurity metric, e.g.
    /// [`entropy`](crate::tree::impurity::entropy).
    pub fn with_impurity(impurity: ImpurityFn<YT>) -> Self {
        Self {
            nodes: Vec::new(),
            num_features: None,
            impurity,
        }
    }

    /// Trains the tree on a dataset.
    ///
    /// Grows the tree region by region until purity. A tree can be trained
    /// exactly once; the trained/untrained state is also the guard against
    /// concurrent training, since `fit` takes `&mut self`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyTrained` when the tree was already fitted, and
    /// `InvalidInput` when the dataset is empty or its row and label counts
    /// differ. On any error the tree stays untrained.
    pub fn fit(&mut self, dataset: &Dataset<XT, YT>) -> Result<(), TreeError> {
        if self.num_features.is_some() {
            return Err(TreeError::AlreadyTrained);
        }
        if !dataset.is_not_empty() {
            return Err(TreeError::InvalidInput(
                "cannot fit on an empty dataset".to_string(),
            ));
        }
        if dataset.x.nrows() != dataset.y.len() {
            return Err(TreeError::InvalidInput(format!(
                "{} observations but {} labels",
                dataset.x.nrows(),
                dataset.y.len()
            )));
        }

        let mut nodes = Vec::new();
        builder::grow(&mut nodes, dataset, 0, self.impurity)?;

        self.nodes = nodes;
        self.num_features = Some(dataset.ncols());
        Ok(())
    }

    /// Predicts the label of a single observation.
    ///
    /// Walks from the root, descending left when
    /// `features[split.feature_index] < split.threshold` and right
    /// otherwise. This is the same strict `<` the training partition uses,
    /// so an observation that lands exactly on a threshold goes right.
    ///
    /// # Errors
    ///
    /// Returns `NotTrained` before `fit`, and `FeatureCountMismatch` when
    /// the observation's width differs from the trained feature count.
    pub fn predict_row(&self, features: &DVector<XT>) -> Result<YT, TreeError> {
        let expected = self.num_features.ok_or(TreeError::NotTrained)?;
        if features.len() != expected {
            return Err(TreeError::FeatureCountMismatch {
                expected,
                actual: features.len(),
            });
        }

        let mut node = &self.nodes[0];
        loop {
            if let Some(label) = node.label {
                return Ok(label);
            }
            let split = node.split.as_ref().expect("internal node carries a split");
            let (left, right) = node.children.expect("internal node carries children");

            node = if features[split.feature_index] < split.threshold {
                &self.nodes[left]
            } else {
                &self.nodes[right]
            };
        }
    }

    /// Predicts labels for every row of a feature matrix.
    pub fn predict(&self, features: &DMatrix<XT>) -> Result<DVector<YT>, TreeError> {
        let predictions = features
            .row_iter()
            .map(|row| self.predict_row(&row.transpose()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DVector::from_vec(predictions))
    }

    pub fn is_trained(&self) -> bool {
        self.num_features.is_some()
    }

    /// Feature count recorded at training time, if trained.
    pub fn num_features(&self) -> Option<usize> {
        self.num_features
    }

    /// Every node of the trained tree in pre-order, a parent before either
    /// of its children. Empty before training.
    pub fn nodes(&self) -> &[Node<XT, YT>] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
