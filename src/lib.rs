//! Informe: classifier structure reporting and partition validation.
//!
//! Informe collects structural statistics about trained classifiers
//! (node counts, depth, per-class sample counts) into a fixed-shape
//! report and exports them as a one-row CSV. It ships the minimal model
//! surface those statistics describe (a CART decision tree and a k-NN
//! classifier) plus the inspection routine connecting models to reports.
//!
//! # Quick Start
//!
//! ```
//! use informe::prelude::*;
//!
//! // Train a small tree
//! let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 8.0, 9.0]).unwrap();
//! let y = vec![0, 0, 1, 1];
//! let mut model = DecisionTreeClassifier::new();
//! model.fit(&x, &y).unwrap();
//!
//! // Inspect it and materialize the report record
//! let labels = vec!["low".to_string(), "high".to_string()];
//! let inspection =
//!     TreeInspection::of("toy", &x, &y, &labels, model.tree().unwrap()).unwrap();
//! let record = inspection.report().unwrap().to_record().unwrap();
//! assert_eq!(record.get("Decision Nodes"), Some(&ReportValue::Int(1)));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major feature matrix
//! - [`tree`]: Decision tree structure and CART classifier
//! - [`classification`]: K-Nearest Neighbors
//! - [`inspect`]: Derives report statistics from fitted models
//! - [`report`]: The report accumulator and its CSV export
//! - [`file_io`]: One-row CSV writing collaborator
//! - [`error`]: Error types

pub mod classification;
pub mod error;
pub mod file_io;
pub mod inspect;
pub mod prelude;
pub mod primitives;
pub mod report;
pub mod tree;
