//! Classifier inference.
//!
//! The trained artifact ships the fitted parameters of an
//! impute -> standardize -> logistic-regression pipeline; inference replays
//! those steps in closed form. Training itself happens in an out-of-band job
//! and is not part of this service.

use serde::{Deserialize, Serialize};

/// A probability function over a feature vector.
///
/// Implementations must be pure: the same vector always yields the same
/// probability. Callers are responsible for passing a vector of the length
/// declared by the owning model's feature columns.
pub trait Classifier: Send + Sync {
    /// Number of features the classifier was fitted on.
    fn n_features(&self) -> usize;

    /// Probability of the positive ("has disease risk") class, in [0, 1].
    fn predict_proba(&self, features: &[f64]) -> f64;
}

/// Fitted parameters of the logistic pipeline.
///
/// Per feature i the pipeline computes
/// `z_i = (impute(x_i) - mean_i) / scale_i` and then
/// `sigmoid(intercept + sum(coef_i * z_i))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticPipeline {
    /// Imputation value per feature, substituted for non-finite inputs.
    pub medians: Vec<f64>,
    /// Standardization means.
    pub means: Vec<f64>,
    /// Standardization scales (standard deviations).
    pub scales: Vec<f64>,
    /// Logistic regression coefficients, one per standardized feature.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Classifier for LogisticPipeline {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &[f64]) -> f64 {
        let mut logit = self.intercept;
        for (i, coef) in self.coefficients.iter().enumerate() {
            let raw = features.get(i).copied().unwrap_or(f64::NAN);
            let x = if raw.is_finite() {
                raw
            } else {
                self.medians.get(i).copied().unwrap_or(0.0)
            };
            let mean = self.means.get(i).copied().unwrap_or(0.0);
            let scale = self.scales.get(i).copied().unwrap_or(1.0);
            // Zero-variance features carry no signal after standardization.
            let z = if scale != 0.0 { (x - mean) / scale } else { 0.0 };
            logit += coef * z;
        }
        sigmoid(logit)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
