//! Structural report for trained classifiers.
//!
//! `Report` accumulates a fixed set of named statistics about a model
//! (sample/feature/class counts, tree node counts, decision paths) and
//! exports them as a one-row CSV named `GeneralReport.csv`.
//!
//! The field set is closed: `add_information` accepts a mapping, stores
//! values for recognized keys, and silently ignores everything else.
//! `Decision Nodes` is never stored; it is derived as
//! `Nodes - Leaf Nodes` each time the record is materialized.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use informe::report::{Report, ReportValue};
//!
//! let mut report = Report::new();
//! report.add_information(&HashMap::from([
//!     ("Samples".to_string(), ReportValue::Int(400)),
//!     ("Nodes".to_string(), ReportValue::Int(15)),
//!     ("Leaf Nodes".to_string(), ReportValue::Int(8)),
//! ])).unwrap();
//!
//! let record = report.to_record().unwrap();
//! assert_eq!(record.get("Decision Nodes"), Some(&ReportValue::Int(7)));
//! ```

use crate::error::{InformeError, Result};
use crate::file_io;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// File name of the exported report.
pub const GENERAL_REPORT_FILE: &str = "GeneralReport.csv";

/// Key of the derived field; recognized in records only, never settable.
const DECISION_NODES: &str = "Decision Nodes";

/// A value carried by one report field.
///
/// The source system stored untyped values; here the shapes the report
/// actually uses form a closed enum. Nested values render as JSON in the
/// CSV cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportValue {
    /// Scalar count
    Int(i64),
    /// Free-form text (dataset names)
    Text(String),
    /// Ordered list of strings (class labels, decision paths)
    List(Vec<String>),
    /// Per-class counts, ordered by class name
    Counts(BTreeMap<String, u64>),
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Int(v) => write!(f, "{v}"),
            ReportValue::Text(v) => write!(f, "{v}"),
            ReportValue::List(v) => {
                let json = serde_json::to_string(v).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
            ReportValue::Counts(v) => {
                let json = serde_json::to_string(v).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
        }
    }
}

/// The closed set of settable report fields.
///
/// Key matching is case- and spelling-exact. `Decision Nodes` is absent on
/// purpose: it is derived at record time and attempts to set it fall
/// through as unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    /// Source dataset name (tracked, not exported)
    DataSet,
    /// Total sample count
    Samples,
    /// Features plus the label column
    Attributes,
    /// Feature count
    Features,
    /// Number of class labels
    Classes,
    /// Class balance
    SamplesPerClass,
    /// Ordered label names
    ClassLabels,
    /// Total nodes in the decision structure
    Nodes,
    /// Terminal node count
    LeafNodes,
    /// Leaves with no assigned class
    UndefinedLeafNodes,
    /// Root-to-leaf path descriptions
    DecisionPaths,
    /// Tree depth (tracked, not exported)
    MaxDepth,
}

impl ReportField {
    /// Canonical field name, as it appears in mappings and the CSV header.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ReportField::DataSet => "Data Set",
            ReportField::Samples => "Samples",
            ReportField::Attributes => "Attributes",
            ReportField::Features => "Features",
            ReportField::Classes => "Classes",
            ReportField::SamplesPerClass => "Samples per Class",
            ReportField::ClassLabels => "Class Labels",
            ReportField::Nodes => "Nodes",
            ReportField::LeafNodes => "Leaf Nodes",
            ReportField::UndefinedLeafNodes => "Undefined Leaf Nodes",
            ReportField::DecisionPaths => "Decision Paths",
            ReportField::MaxDepth => "Max Depth",
        }
    }

    /// Resolves a mapping key to a field. Unrecognized keys yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Data Set" => Some(ReportField::DataSet),
            "Samples" => Some(ReportField::Samples),
            "Attributes" => Some(ReportField::Attributes),
            "Features" => Some(ReportField::Features),
            "Classes" => Some(ReportField::Classes),
            "Samples per Class" => Some(ReportField::SamplesPerClass),
            "Class Labels" => Some(ReportField::ClassLabels),
            "Nodes" => Some(ReportField::Nodes),
            "Leaf Nodes" => Some(ReportField::LeafNodes),
            "Undefined Leaf Nodes" => Some(ReportField::UndefinedLeafNodes),
            "Decision Paths" => Some(ReportField::DecisionPaths),
            "Max Depth" => Some(ReportField::MaxDepth),
            _ => None,
        }
    }
}

/// The materialized report record: field/value pairs in canonical order.
///
/// Only populated fields appear, so the CSV header is exactly the set of
/// keys present here.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Vec<(&'static str, ReportValue)>);

impl Record {
    /// Field/value pairs in canonical order.
    #[must_use]
    pub fn entries(&self) -> &[(&'static str, ReportValue)] {
        &self.0
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReportValue> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Field names in canonical order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.0.iter().map(|(key, _)| *key).collect()
    }
}

/// Accumulator for classifier structure statistics.
///
/// Fields are optional-until-set; `add_information` performs a partial
/// update, later calls overwrite earlier values key by key.
///
/// `Data Set` and `Max Depth` are tracked but never exported. The source
/// system had the same asymmetry; it is preserved here rather than
/// silently fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    data_set: Option<String>,
    samples: Option<i64>,
    attributes: Option<i64>,
    features: Option<i64>,
    classes: Option<i64>,
    samples_per_class: Option<BTreeMap<String, u64>>,
    class_labels: Option<Vec<String>>,
    nodes: Option<i64>,
    leaf_nodes: Option<i64>,
    undefined_leaf_nodes: Option<i64>,
    decision_paths: Option<Vec<String>>,
    max_depth: Option<i64>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the values of every recognized key in `info`.
    ///
    /// Recognized keys overwrite previously stored values; unrecognized
    /// keys are silently ignored. Fields absent from `info` keep their
    /// current values.
    ///
    /// # Errors
    ///
    /// Returns `FieldType` if a recognized key carries a value of the
    /// wrong kind (e.g. text where a count belongs). All entries are
    /// validated before any is stored, so a failed call leaves the
    /// report unchanged.
    pub fn add_information(&mut self, info: &HashMap<String, ReportValue>) -> Result<()> {
        let mut updates = Vec::new();
        for (key, value) in info {
            if let Some(field) = ReportField::from_name(key) {
                check_kind(field, value)?;
                updates.push((field, value.clone()));
            }
        }
        for (field, value) in updates {
            self.store(field, value);
        }
        Ok(())
    }

    /// Stores a value already validated by `check_kind`.
    fn store(&mut self, field: ReportField, value: ReportValue) {
        match (field, value) {
            (ReportField::DataSet, ReportValue::Text(v)) => self.data_set = Some(v),
            (ReportField::Samples, ReportValue::Int(v)) => self.samples = Some(v),
            (ReportField::Attributes, ReportValue::Int(v)) => self.attributes = Some(v),
            (ReportField::Features, ReportValue::Int(v)) => self.features = Some(v),
            (ReportField::Classes, ReportValue::Int(v)) => self.classes = Some(v),
            (ReportField::SamplesPerClass, ReportValue::Counts(v)) => {
                self.samples_per_class = Some(v);
            }
            (ReportField::ClassLabels, ReportValue::List(v)) => self.class_labels = Some(v),
            (ReportField::Nodes, ReportValue::Int(v)) => self.nodes = Some(v),
            (ReportField::LeafNodes, ReportValue::Int(v)) => self.leaf_nodes = Some(v),
            (ReportField::UndefinedLeafNodes, ReportValue::Int(v)) => {
                self.undefined_leaf_nodes = Some(v);
            }
            (ReportField::DecisionPaths, ReportValue::List(v)) => {
                self.decision_paths = Some(v);
            }
            (ReportField::MaxDepth, ReportValue::Int(v)) => self.max_depth = Some(v),
            (field, _) => unreachable!("value kind checked for {}", field.name()),
        }
    }

    /// Materializes the record, deriving `Decision Nodes`.
    ///
    /// Pure read: repeated calls with no intervening `add_information`
    /// return equal records. `Data Set` and `Max Depth` never appear.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `Nodes` or `Leaf Nodes` was never set;
    /// the derived field cannot be computed without them.
    pub fn to_record(&self) -> Result<Record> {
        let nodes = self.nodes.ok_or(InformeError::MissingField {
            field: ReportField::Nodes.name(),
        })?;
        let leaf_nodes = self.leaf_nodes.ok_or(InformeError::MissingField {
            field: ReportField::LeafNodes.name(),
        })?;

        let mut entries = Vec::new();
        if let Some(v) = self.samples {
            entries.push((ReportField::Samples.name(), ReportValue::Int(v)));
        }
        if let Some(v) = self.attributes {
            entries.push((ReportField::Attributes.name(), ReportValue::Int(v)));
        }
        if let Some(v) = self.features {
            entries.push((ReportField::Features.name(), ReportValue::Int(v)));
        }
        if let Some(v) = self.classes {
            entries.push((ReportField::Classes.name(), ReportValue::Int(v)));
        }
        if let Some(v) = &self.samples_per_class {
            entries.push((
                ReportField::SamplesPerClass.name(),
                ReportValue::Counts(v.clone()),
            ));
        }
        if let Some(v) = &self.class_labels {
            entries.push((ReportField::ClassLabels.name(), ReportValue::List(v.clone())));
        }
        entries.push((ReportField::Nodes.name(), ReportValue::Int(nodes)));
        entries.push((DECISION_NODES, ReportValue::Int(nodes - leaf_nodes)));
        entries.push((ReportField::LeafNodes.name(), ReportValue::Int(leaf_nodes)));
        if let Some(v) = self.undefined_leaf_nodes {
            entries.push((ReportField::UndefinedLeafNodes.name(), ReportValue::Int(v)));
        }
        if let Some(v) = &self.decision_paths {
            entries.push((
                ReportField::DecisionPaths.name(),
                ReportValue::List(v.clone()),
            ));
        }
        Ok(Record(entries))
    }

    /// Exports the record as `GeneralReport.csv` under `directory`.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` as `to_record` would, or the collaborator's
    /// I/O error untranslated (the directory is not created here).
    pub fn export_csv(&self, directory: &Path) -> Result<()> {
        let record = self.to_record()?;
        file_io::write_csv(GENERAL_REPORT_FILE, &record, directory)
    }
}

/// Verifies that `value` has the kind `field` stores.
fn check_kind(field: ReportField, value: &ReportValue) -> Result<()> {
    let expected = match field {
        ReportField::DataSet => match value {
            ReportValue::Text(_) => return Ok(()),
            _ => "text",
        },
        ReportField::Samples
        | ReportField::Attributes
        | ReportField::Features
        | ReportField::Classes
        | ReportField::Nodes
        | ReportField::LeafNodes
        | ReportField::UndefinedLeafNodes
        | ReportField::MaxDepth => match value {
            ReportValue::Int(_) => return Ok(()),
            _ => "an integer",
        },
        ReportField::SamplesPerClass => match value {
            ReportValue::Counts(_) => return Ok(()),
            _ => "per-class counts",
        },
        ReportField::ClassLabels => match value {
            ReportValue::List(_) => return Ok(()),
            _ => "a list of labels",
        },
        ReportField::DecisionPaths => match value {
            ReportValue::List(_) => return Ok(()),
            _ => "a list of paths",
        },
    };
    Err(InformeError::FieldType {
        field: field.name(),
        expected,
    })
}
