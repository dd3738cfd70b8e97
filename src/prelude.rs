//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use informe::prelude::*;
//! ```

pub use crate::classification::{DistanceMetric, KNearestNeighbors};
pub use crate::error::{InformeError, Result};
pub use crate::inspect::TreeInspection;
pub use crate::primitives::Matrix;
pub use crate::report::{Record, Report, ReportField, ReportValue};
pub use crate::tree::{DecisionTreeClassifier, Leaf, Node, TreeNode};
