use super::distribution::ClassDistribution;
use super::impurity::ImpurityFn;
use super::node::{Node, NodeId, Split};
use super::split::{CandidateSplit, SplitScan};
use crate::data::dataset::{Dataset, RealNumber, WholeNumber};
use crate::error::TreeError;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Recursively grows the subtree for one region of the observations.
///
/// Pushes the region's node into the arena, stops on purity, otherwise
/// finds the best split over all feature columns, partitions the region and
/// recurses into both sides. The node is pushed before either child, so the
/// arena ends up in pre-order: a node, its entire left subtree, then its
/// entire right subtree.
///
/// Returns the id of the node created for this region.
pub(crate) fn grow<XT: RealNumber, YT: WholeNumber>(
    nodes: &mut Vec<Node<XT, YT>>,
    dataset: &Dataset<XT, YT>,
    depth: usize,
    impurity: ImpurityFn<YT>,
) -> Result<NodeId, TreeError> {
    let distribution = ClassDistribution::from_labels(&dataset.y)?;
    let node_impurity = impurity(&distribution);

    let node_id = nodes.len();
    nodes.push(Node::new(depth, distribution, node_impurity));

    // Purity is the sole stopping rule. A single-observation region is
    // trivially pure, which bounds the recursion.
    if let Some(label) = nodes[node_id].distribution.sole_label() {
        nodes[node_id].label = Some(label);
        return Ok(node_id);
    }

    match best_split(dataset, impurity) {
        Some(split) => {
            let (left, right) = dataset.partition(split.feature_index, split.threshold);

            nodes[node_id].split = Some(split);
            let left_id = grow(nodes, &left, depth + 1, impurity)?;
            let right_id = grow(nodes, &right, depth + 1, impurity)?;
            nodes[node_id].children = Some((left_id, right_id));
        }
        None => {
            // Every feature column is constant across the region while the
            // labels still differ. The region cannot be split further, so it
            // becomes a leaf predicting its majority label.
            let majority = nodes[node_id].distribution.majority_label();
            nodes[node_id].label = majority;
        }
    }

    Ok(node_id)
}

/// Scans every feature column and returns the split with the lowest
/// weighted impurity, or `None` when no column produces a candidate.
///
/// Columns are scanned in parallel but reduced sequentially in column
/// order with a strictly-lower comparison, so ties deterministically go to
/// the earliest column and, within a column, to the lowest threshold.
fn best_split<XT: RealNumber, YT: WholeNumber>(
    dataset: &Dataset<XT, YT>,
    impurity: ImpurityFn<YT>,
) -> Option<Split<XT>> {
    let per_column: Vec<Option<CandidateSplit<XT>>> = (0..dataset.ncols())
        .into_par_iter()
        .map(|feature_index| {
            let column = dataset.x.column(feature_index).into_owned();
            let mut best: Option<CandidateSplit<XT>> = None;
            for candidate in SplitScan::new(&column, &dataset.y, impurity) {
                let improves = best
                    .as_ref()
                    .map_or(true, |b| candidate.weighted_impurity < b.weighted_impurity);
                if improves {
                    best = Some(candidate);
                }
            }
            best
        })
        .collect();

    let mut best: Option<Split<XT>> = None;
    let mut best_score = f64::INFINITY;
    for (feature_index, candidate) in per_column.into_iter().enumerate() {
        if let Some(candidate) = candidate {
            if candidate.weighted_impurity < best_score {
                best_score = candidate.weighted_impurity;
                best = Some(Split {
                    feature_index,
                    threshold: candidate.threshold,
                });
            }
        }
    }
    best
}
