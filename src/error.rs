//! Error types for Informe operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Informe operations.
///
/// Covers report assembly failures (missing or mistyped fields), model
/// input validation, and I/O errors surfaced while exporting.
///
/// # Examples
///
/// ```
/// use informe::error::InformeError;
///
/// let err = InformeError::MissingField { field: "Nodes" };
/// assert!(err.to_string().contains("Nodes"));
/// ```
#[derive(Debug)]
pub enum InformeError {
    /// A required report field was never populated.
    MissingField {
        /// Canonical field name
        field: &'static str,
    },

    /// A recognized report field received a value of the wrong kind.
    FieldType {
        /// Canonical field name
        field: &'static str,
        /// Expected value kind description
        expected: &'static str,
    },

    /// Matrix/label dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// I/O error (directory missing, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for InformeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InformeError::MissingField { field } => {
                write!(f, "Missing required report field: {field}")
            }
            InformeError::FieldType { field, expected } => {
                write!(f, "Report field {field} expects {expected}")
            }
            InformeError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            InformeError::Io(e) => write!(f, "I/O error: {e}"),
            InformeError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for InformeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InformeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InformeError {
    fn from(err: std::io::Error) -> Self {
        InformeError::Io(err)
    }
}

impl From<&str> for InformeError {
    fn from(msg: &str) -> Self {
        InformeError::Other(msg.to_string())
    }
}

impl From<String> for InformeError {
    fn from(msg: String) -> Self {
        InformeError::Other(msg)
    }
}

impl InformeError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, InformeError>;
