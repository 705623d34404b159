//! # Arbor
//!
//! `arbor` trains CART classification trees from labeled numeric observations
//! and predicts labels for new observations. A tree grows until every region
//! is pure, using an injectable impurity metric (Gini by default), and is
//! meant as the building block for a random forest.
//!
//! ## Getting Started
//!
//! To use `arbor`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! arbor = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can train a tree and predict a label:
//!
//! ```rust
//!
//! use arbor::data::dataset::Dataset;
//! use arbor::tree::classifier::DecisionTreeClassifier;
//! use nalgebra::{DMatrix, DVector};
//!
//! let x = DMatrix::from_row_slice(4, 1, &[0.0, 0.0, 1.0, 1.0]);
//! let y = DVector::from_vec(vec![0, 0, 1, 1]);
//!
//! let dataset = Dataset::new(x, y);
//!
//! let mut tree = DecisionTreeClassifier::new();
//!
//! tree.fit(&dataset).unwrap();
//!
//! let label = tree.predict_row(&DVector::from_vec(vec![1.0])).unwrap();
//! assert_eq!(label, 1);
//! ```

/// Dataset and data manipulation utilities
pub mod data;
/// Error types reported by training and prediction
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Classification trees
pub mod tree;
