//! Decision tree structure and CART classifier.
//!
//! This module provides:
//! - The `TreeNode` structure with the structural queries the report
//!   layer consumes (node counts, depth, decision paths)
//! - A CART classifier using Gini impurity
//!
//! # Example
//!
//! ```
//! use informe::primitives::Matrix;
//! use informe::tree::DecisionTreeClassifier;
//!
//! // Simple 1D binary classification: class 0 below 2.5, class 1 above
//! let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let y = vec![0, 0, 1, 1];
//!
//! let mut tree = DecisionTreeClassifier::new().with_max_depth(3);
//! tree.fit(&x, &y).unwrap();
//!
//! let predictions = tree.predict(&x).unwrap();
//! assert_eq!(predictions, vec![0, 0, 1, 1]);
//! ```

use crate::error::{InformeError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Internal node in a decision tree.
///
/// Contains a split condition (feature and threshold) and pointers to
/// left and right subtrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node in a decision tree.
///
/// A leaf without an assigned class is an *undefined leaf*: a terminal
/// region no training sample reached. Such leaves occur in externally
/// constructed trees; `fit` never produces them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted class label, if one was assigned
    pub class_label: Option<usize>,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Node(Node),
    /// Leaf node with optional class prediction
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    /// Returns the total number of nodes, leaves included.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Node(node) => 1 + node.left.n_nodes() + node.right.n_nodes(),
        }
    }

    /// Returns the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Node(node) => node.left.n_leaves() + node.right.n_leaves(),
        }
    }

    /// Returns the number of leaves with no assigned class.
    #[must_use]
    pub fn n_undefined_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(leaf) => usize::from(leaf.class_label.is_none()),
            TreeNode::Node(node) => {
                node.left.n_undefined_leaves() + node.right.n_undefined_leaves()
            }
        }
    }

    /// Routes a single sample to its leaf and returns the leaf's class.
    ///
    /// Returns `None` when the sample lands on an undefined leaf.
    #[must_use]
    pub fn predict_one(&self, sample: &[f32]) -> Option<usize> {
        match self {
            TreeNode::Leaf(leaf) => leaf.class_label,
            TreeNode::Node(node) => {
                if sample[node.feature_idx] <= node.threshold {
                    node.left.predict_one(sample)
                } else {
                    node.right.predict_one(sample)
                }
            }
        }
    }

    /// Renders every root-to-leaf path as a branch-condition description.
    ///
    /// Each entry reads like `x0 <= 2.5 -> x1 > 0.8 -> class 1`; an
    /// undefined leaf terminates with `class undefined`.
    #[must_use]
    pub fn decision_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        self.collect_paths(&mut prefix, &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &mut Vec<String>, out: &mut Vec<String>) {
        match self {
            TreeNode::Leaf(leaf) => {
                let terminal = match leaf.class_label {
                    Some(label) => format!("class {label}"),
                    None => "class undefined".to_string(),
                };
                let mut steps = prefix.clone();
                steps.push(terminal);
                out.push(steps.join(" -> "));
            }
            TreeNode::Node(node) => {
                prefix.push(format!("x{} <= {}", node.feature_idx, node.threshold));
                node.left.collect_paths(prefix, out);
                prefix.pop();

                prefix.push(format!("x{} > {}", node.feature_idx, node.threshold));
                node.right.collect_paths(prefix, out);
                prefix.pop();
            }
        }
    }
}

/// Decision tree classifier using the CART algorithm.
///
/// Splits on Gini impurity and builds trees recursively. Deterministic:
/// features and thresholds are scanned in order and ties keep the first
/// candidate found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    min_samples_split: usize,
    /// Number of features the model was trained on (for validation)
    n_features: Option<usize>,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            min_samples_split: 2,
            n_features: None,
        }
    }

    /// Sets the maximum depth of the tree.
    ///
    /// # Arguments
    ///
    /// * `depth` - Maximum depth (a root-only tree has depth 0)
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the minimum number of samples required to split a node.
    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    /// Wraps an externally built tree as a fitted classifier.
    ///
    /// This is how pre-trained models with fixed decision boundaries enter
    /// the library: the tree structure is data, not the product of `fit`.
    #[must_use]
    pub fn from_tree(tree: TreeNode, n_features: usize) -> Self {
        Self {
            tree: Some(tree),
            max_depth: None,
            min_samples_split: 2,
            n_features: Some(n_features),
        }
    }

    /// Returns the fitted tree structure, if any.
    #[must_use]
    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    /// Fits the decision tree to training data.
    ///
    /// # Arguments
    ///
    /// * `x` - Training features (n_samples x n_features)
    /// * `y` - Training labels (n_samples class indices)
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty or dimensions mismatch.
    pub fn fit(&mut self, x: &Matrix, y: &[usize]) -> Result<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows == 0 {
            return Err(InformeError::empty_input("training data"));
        }
        if n_rows != y.len() {
            return Err(InformeError::dimension_mismatch("samples", n_rows, y.len()));
        }

        let indices: Vec<usize> = (0..n_rows).collect();
        let tree = build_tree(x, y, &indices, 0, self.max_depth, self.min_samples_split);
        self.n_features = Some(n_cols);
        self.tree = Some(tree);
        Ok(())
    }

    /// Predicts class labels for samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted, the feature dimension
    /// mismatches, or a sample reaches an undefined leaf.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        let tree = self.tree.as_ref().ok_or("Model not fitted")?;
        let (n_rows, n_cols) = x.shape();
        if let Some(n_features) = self.n_features {
            if n_cols != n_features {
                return Err(InformeError::dimension_mismatch(
                    "features", n_features, n_cols,
                ));
            }
        }

        let mut predictions = Vec::with_capacity(n_rows);
        for i in 0..n_rows {
            let label = tree
                .predict_one(x.row(i))
                .ok_or("sample reached an undefined leaf")?;
            predictions.push(label);
        }
        Ok(predictions)
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tree building helpers
// ============================================================================

/// Gini impurity of the labels selected by `indices`.
fn gini(y: &[usize], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let max_label = indices.iter().map(|&i| y[i]).max().unwrap_or(0);
    let mut counts = vec![0usize; max_label + 1];
    for &i in indices {
        counts[y[i]] += 1;
    }
    let n = indices.len() as f64;
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

/// Majority class among the labels selected by `indices`.
///
/// Ties resolve to the smallest label so fitting stays deterministic.
fn majority_class(y: &[usize], indices: &[usize]) -> Option<usize> {
    let max_label = indices.iter().map(|&i| y[i]).max()?;
    let mut counts = vec![0usize; max_label + 1];
    for &i in indices {
        counts[y[i]] += 1;
    }
    counts
        .iter()
        .enumerate()
        .max_by(|(label_a, count_a), (label_b, count_b)| {
            count_a.cmp(count_b).then(label_b.cmp(label_a))
        })
        .map(|(label, _)| label)
}

/// Finds the split minimizing weighted Gini impurity.
///
/// Zero-gain splits are kept (XOR-like data only separates after a first
/// zero-gain cut); recursion still terminates because both sides must be
/// non-empty. Returns `None` when no threshold separates the samples.
fn best_split(
    x: &Matrix,
    y: &[usize],
    indices: &[usize],
) -> Option<(usize, f32, Vec<usize>, Vec<usize>)> {
    let (_, n_cols) = x.shape();
    let n = indices.len() as f64;

    let mut best: Option<(f64, usize, f32, Vec<usize>, Vec<usize>)> = None;

    for feature in 0..n_cols {
        let mut values: Vec<f32> = indices.iter().map(|&i| x.get(i, feature)).collect();
        values.sort_by(|a, b| a.partial_cmp(b).expect("feature values are not NaN"));
        values.dedup();

        for window in values.windows(2) {
            let threshold = (window[0] + window[1]) / 2.0;
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .copied()
                .partition(|&i| x.get(i, feature) <= threshold);
            if left.is_empty() || right.is_empty() {
                continue;
            }

            let weighted = (left.len() as f64 / n) * gini(y, &left)
                + (right.len() as f64 / n) * gini(y, &right);

            let improves = match &best {
                Some((best_impurity, ..)) => weighted < *best_impurity,
                None => true,
            };
            if improves {
                best = Some((weighted, feature, threshold, left, right));
            }
        }
    }

    best.map(|(_, feature, threshold, left, right)| (feature, threshold, left, right))
}

fn build_tree(
    x: &Matrix,
    y: &[usize],
    indices: &[usize],
    depth: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
) -> TreeNode {
    let make_leaf = || {
        TreeNode::Leaf(Leaf {
            class_label: majority_class(y, indices),
            n_samples: indices.len(),
        })
    };

    if let Some(limit) = max_depth {
        if depth >= limit {
            return make_leaf();
        }
    }
    if indices.len() < min_samples_split {
        return make_leaf();
    }
    // Pure node: nothing left to separate
    let first_label = y[indices[0]];
    if indices.iter().all(|&i| y[i] == first_label) {
        return make_leaf();
    }

    match best_split(x, y, indices) {
        None => make_leaf(),
        Some((feature_idx, threshold, left, right)) => TreeNode::Node(Node {
            feature_idx,
            threshold,
            left: Box::new(build_tree(
                x,
                y,
                &left,
                depth + 1,
                max_depth,
                min_samples_split,
            )),
            right: Box::new(build_tree(
                x,
                y,
                &right,
                depth + 1,
                max_depth,
                min_samples_split,
            )),
        }),
    }
}
