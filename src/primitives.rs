//! Core feature container for classifier inputs.
//!
//! A deliberately small, row-major `Matrix<f32>`: just enough surface for
//! the tree and k-NN models to fit on and predict from.

use crate::error::{InformeError, Result};
use serde::{Deserialize, Serialize};

/// Dense row-major matrix of `f32` features.
///
/// # Example
///
/// ```
/// use informe::primitives::Matrix;
///
/// let x = Matrix::from_vec(2, 3, vec![
///     1.0, 2.0, 3.0,
///     4.0, 5.0, 6.0,
/// ]).unwrap();
/// assert_eq!(x.shape(), (2, 3));
/// assert_eq!(x.get(1, 2), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a matrix from a flat row-major vector.
    ///
    /// NaN values are rejected here so the comparison-based code paths
    /// downstream (split search, neighbor sorting) never see one.
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != rows * cols` or any value is NaN.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(InformeError::DimensionMismatch {
                expected: format!("{rows}x{cols} = {} values", rows * cols),
                actual: format!("{} values", data.len()),
            });
        }
        if let Some(idx) = data.iter().position(|v| v.is_nan()) {
            return Err(InformeError::Other(format!(
                "NaN feature value at index {idx}"
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Returns `(n_rows, n_cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        assert!(i < self.rows, "row index out of bounds");
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}
