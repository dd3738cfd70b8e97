//! Instance-based classification.
//!
//! K-Nearest Neighbors: the second model family whose input-space
//! partitioning the property suites validate.

use crate::error::{InformeError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Distance metric for nearest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// L2 distance
    Euclidean,
    /// L1 distance
    Manhattan,
}

/// K-Nearest Neighbors classifier.
///
/// Lazy learner: `fit` stores the training data, `predict` votes among the
/// k closest training samples. Voting ties resolve to the smallest class
/// label so predictions stay deterministic.
///
/// # Example
///
/// ```
/// use informe::classification::KNearestNeighbors;
/// use informe::primitives::Matrix;
///
/// let x = Matrix::from_vec(6, 2, vec![
///     0.0, 0.0,  // class 0
///     0.0, 1.0,  // class 0
///     1.0, 0.0,  // class 0
///     5.0, 5.0,  // class 1
///     5.0, 6.0,  // class 1
///     6.0, 5.0,  // class 1
/// ]).unwrap();
/// let y = vec![0, 0, 0, 1, 1, 1];
///
/// let mut knn = KNearestNeighbors::new(3);
/// knn.fit(&x, &y).unwrap();
///
/// let test = Matrix::from_vec(1, 2, vec![0.5, 0.5]).unwrap();
/// assert_eq!(knn.predict(&test).unwrap(), vec![0]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNearestNeighbors {
    /// Number of neighbors to use
    k: usize,
    /// Distance metric
    metric: DistanceMetric,
    /// Training feature matrix (stored during fit)
    x_train: Option<Matrix>,
    /// Training labels (stored during fit)
    y_train: Option<Vec<usize>>,
}

impl KNearestNeighbors {
    /// Creates a new K-Nearest Neighbors classifier.
    ///
    /// # Arguments
    ///
    /// * `k` - Number of neighbors to use for voting
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            metric: DistanceMetric::Euclidean,
            x_train: None,
            y_train: None,
        }
    }

    /// Sets the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Fits the model by storing the training data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty, dimensions mismatch, or
    /// `k` exceeds the number of training samples.
    pub fn fit(&mut self, x: &Matrix, y: &[usize]) -> Result<()> {
        let (n_samples, _n_features) = x.shape();

        if n_samples == 0 {
            return Err(InformeError::empty_input("training data"));
        }
        if y.len() != n_samples {
            return Err(InformeError::dimension_mismatch(
                "samples", n_samples, y.len(),
            ));
        }
        if self.k == 0 || self.k > n_samples {
            return Err("k must be in 1..=n_samples".into());
        }

        self.x_train = Some(x.clone());
        self.y_train = Some(y.to_vec());
        Ok(())
    }

    /// Predicts class labels for samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or dimensions mismatch.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        let x_train = self.x_train.as_ref().ok_or("Model not fitted")?;
        let y_train = self.y_train.as_ref().ok_or("Model not fitted")?;

        let (n_samples, n_features) = x.shape();
        let (_n_train, n_train_features) = x_train.shape();
        if n_features != n_train_features {
            return Err(InformeError::dimension_mismatch(
                "features",
                n_train_features,
                n_features,
            ));
        }

        let mut predictions = Vec::with_capacity(n_samples);
        for i in 0..n_samples {
            let mut distances: Vec<(f32, usize)> = Vec::with_capacity(y_train.len());
            for (j, &label) in y_train.iter().enumerate() {
                let dist = self.distance(x.row(i), x_train.row(j));
                distances.push((dist, label));
            }

            // Stable sort keeps earlier training samples first on equal distance
            distances.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .expect("distance values are valid f32 (not NaN)")
            });
            predictions.push(majority_vote(&distances[..self.k]));
        }
        Ok(predictions)
    }

    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self.metric {
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(p, q)| (p - q) * (p - q))
                .sum::<f32>()
                .sqrt(),
            DistanceMetric::Manhattan => a.iter().zip(b).map(|(p, q)| (p - q).abs()).sum(),
        }
    }
}

/// Most frequent label among the neighbors; ties go to the smallest label.
fn majority_vote(neighbors: &[(f32, usize)]) -> usize {
    let max_label = neighbors
        .iter()
        .map(|&(_, label)| label)
        .max()
        .unwrap_or(0);
    let mut counts = vec![0usize; max_label + 1];
    for &(_, label) in neighbors {
        counts[label] += 1;
    }
    counts
        .iter()
        .enumerate()
        .max_by(|(label_a, count_a), (label_b, count_b)| {
            count_a.cmp(count_b).then(label_b.cmp(label_a))
        })
        .map(|(label, _)| label)
        .unwrap_or(0)
}
