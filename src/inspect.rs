//! Model inspection.
//!
//! Walks a fitted tree together with its training data and derives every
//! statistic the report layer recognizes. This is the producer side of
//! `Report::add_information`.

use crate::error::{InformeError, Result};
use crate::primitives::Matrix;
use crate::report::{Report, ReportValue};
use crate::tree::TreeNode;
use std::collections::{BTreeMap, HashMap};

/// Structural statistics extracted from a fitted tree and its data.
#[derive(Debug, Clone)]
pub struct TreeInspection {
    /// Source dataset name
    pub data_set: String,
    /// Total sample count
    pub samples: usize,
    /// Feature count
    pub features: usize,
    /// Ordered class label names
    pub class_labels: Vec<String>,
    /// Sample count per class label
    pub samples_per_class: BTreeMap<String, u64>,
    /// Total node count
    pub nodes: usize,
    /// Terminal node count
    pub leaf_nodes: usize,
    /// Leaves with no assigned class
    pub undefined_leaf_nodes: usize,
    /// Rendered root-to-leaf paths
    pub decision_paths: Vec<String>,
    /// Tree depth
    pub max_depth: usize,
}

impl TreeInspection {
    /// Inspects a fitted tree against the data it was trained on.
    ///
    /// `class_labels[i]` names class index `i`; every entry of `y` must
    /// index into it.
    ///
    /// # Errors
    ///
    /// Returns an error if `y` does not match `x` row-for-row or a label
    /// index is out of range.
    pub fn of(
        data_set: &str,
        x: &Matrix,
        y: &[usize],
        class_labels: &[String],
        tree: &TreeNode,
    ) -> Result<Self> {
        let (n_samples, n_features) = x.shape();
        if y.len() != n_samples {
            return Err(InformeError::dimension_mismatch(
                "samples", n_samples, y.len(),
            ));
        }

        let mut samples_per_class: BTreeMap<String, u64> = class_labels
            .iter()
            .map(|label| (label.clone(), 0))
            .collect();
        for &label_idx in y {
            let name = class_labels.get(label_idx).ok_or_else(|| {
                InformeError::Other(format!(
                    "class index {label_idx} out of range (classes={})",
                    class_labels.len()
                ))
            })?;
            *samples_per_class
                .get_mut(name)
                .expect("key inserted above") += 1;
        }

        Ok(Self {
            data_set: data_set.to_string(),
            samples: n_samples,
            features: n_features,
            class_labels: class_labels.to_vec(),
            samples_per_class,
            nodes: tree.n_nodes(),
            leaf_nodes: tree.n_leaves(),
            undefined_leaf_nodes: tree.n_undefined_leaves(),
            decision_paths: tree.decision_paths(),
            max_depth: tree.depth(),
        })
    }

    /// Renders the inspection as the mapping `Report::add_information`
    /// consumes. Attributes counts the features plus the label column.
    #[must_use]
    pub fn to_information(&self) -> HashMap<String, ReportValue> {
        let int = |v: usize| ReportValue::Int(v as i64);
        HashMap::from([
            (
                "Data Set".to_string(),
                ReportValue::Text(self.data_set.clone()),
            ),
            ("Samples".to_string(), int(self.samples)),
            ("Attributes".to_string(), int(self.features + 1)),
            ("Features".to_string(), int(self.features)),
            ("Classes".to_string(), int(self.class_labels.len())),
            (
                "Samples per Class".to_string(),
                ReportValue::Counts(self.samples_per_class.clone()),
            ),
            (
                "Class Labels".to_string(),
                ReportValue::List(self.class_labels.clone()),
            ),
            ("Nodes".to_string(), int(self.nodes)),
            ("Leaf Nodes".to_string(), int(self.leaf_nodes)),
            ("Undefined Leaf Nodes".to_string(), int(self.undefined_leaf_nodes)),
            (
                "Decision Paths".to_string(),
                ReportValue::List(self.decision_paths.clone()),
            ),
            ("Max Depth".to_string(), int(self.max_depth)),
        ])
    }

    /// Builds a fully populated report from this inspection.
    ///
    /// # Errors
    ///
    /// Propagates `add_information` failures; with this producer the
    /// mapping is always well typed, so failures indicate a bug.
    pub fn report(&self) -> Result<Report> {
        let mut report = Report::new();
        report.add_information(&self.to_information())?;
        Ok(report)
    }
}
