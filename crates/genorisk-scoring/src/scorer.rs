//! Risk scoring against the latest trained model.

use std::sync::Arc;

use genorisk_common::{GenoriskError, Result, RiskLevel};
use genorisk_model::{ModelProvider, TrainedModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::features::FeatureVector;

/// A scored request: probability of the positive class, its risk band, and
/// the model version that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScore {
    pub probability: f64,
    pub level: RiskLevel,
    pub model_id: Uuid,
}

/// Applies the authoritative classifier of a disease to a feature vector.
#[derive(Clone)]
pub struct RiskScorer {
    provider: Arc<dyn ModelProvider>,
}

impl RiskScorer {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Score a feature vector for a disease.
    ///
    /// Fetches one model snapshot for the whole call. Fails with
    /// `ModelNotFound` when no model exists for the disease; a fallback
    /// probability is never fabricated.
    pub async fn score(&self, disease_id: Uuid, features: &FeatureVector) -> Result<RiskScore> {
        let model = self
            .provider
            .latest_model(disease_id)
            .await?
            .ok_or(GenoriskError::ModelNotFound(disease_id))?;
        Self::score_with_model(&model, features)
    }

    /// Score against an already-fetched model snapshot.
    pub fn score_with_model(model: &TrainedModel, features: &FeatureVector) -> Result<RiskScore> {
        let vector = features.as_array();
        if vector.len() != model.feature_columns.len() {
            // Should not occur when the builder's contract is honoured;
            // guards against catalog/model version skew.
            error!(
                model_id = %model.id,
                expected = model.feature_columns.len(),
                actual = vector.len(),
                "feature shape mismatch"
            );
            return Err(GenoriskError::FeatureShapeMismatch {
                expected: model.feature_columns.len(),
                actual: vector.len(),
            });
        }

        let probability = model.classifier().predict_proba(&vector);
        let level = RiskLevel::from_probability(probability);
        debug!(model_id = %model.id, probability, ?level, "scored feature vector");

        Ok(RiskScore {
            probability,
            level,
            model_id: model.id,
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use genorisk_model::{
        ClassifierSpec, InMemoryModelProvider, LogisticPipeline, ModelArtifact,
    };

    fn model_with_columns(disease_id: Uuid, columns: &[&str]) -> TrainedModel {
        let n = columns.len();
        let artifact = ModelArtifact {
            disease_id,
            created_at: Utc::now(),
            feature_names: columns.iter().map(|c| c.to_string()).collect(),
            training_rows: 512,
            accuracy: Some(0.8),
            classifier: ClassifierSpec::LogisticPipeline(LogisticPipeline {
                medians: vec![0.0; n],
                means: vec![0.0; n],
                scales: vec![1.0; n],
                coefficients: vec![0.0; n],
                intercept: 0.5,
            }),
        };
        TrainedModel::from_artifact(Uuid::new_v4(), artifact).unwrap()
    }

    fn four_column_model(disease_id: Uuid) -> TrainedModel {
        model_with_columns(
            disease_id,
            &["odds_ratio", "risk_allele_freq", "chromosome", "position"],
        )
    }

    #[tokio::test]
    async fn test_missing_model_is_fatal() {
        let scorer = RiskScorer::new(Arc::new(InMemoryModelProvider::new()));
        let disease_id = Uuid::new_v4();

        let err = scorer
            .score(disease_id, &FeatureVector::neutral())
            .await
            .unwrap_err();
        assert!(matches!(err, GenoriskError::ModelNotFound(id) if id == disease_id));
    }

    #[tokio::test]
    async fn test_scores_with_latest_model() {
        let disease_id = Uuid::new_v4();
        let provider = InMemoryModelProvider::new().with_model(four_column_model(disease_id));
        let scorer = RiskScorer::new(Arc::new(provider));

        let score = scorer
            .score(disease_id, &FeatureVector::neutral())
            .await
            .unwrap();

        // All-zero coefficients: probability is sigmoid(0.5) regardless of
        // input, and the band follows the shared thresholds.
        let expected = 1.0 / (1.0 + (-0.5f64).exp());
        assert!((score.probability - expected).abs() < 1e-12);
        assert_eq!(score.level, RiskLevel::from_probability(score.probability));
        assert_eq!(score.level, RiskLevel::Medium);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let model = model_with_columns(Uuid::new_v4(), &["odds_ratio", "risk_allele_freq"]);
        let err = RiskScorer::score_with_model(&model, &FeatureVector::neutral()).unwrap_err();
        assert!(matches!(
            err,
            GenoriskError::FeatureShapeMismatch {
                expected: 2,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_deterministic_for_fixed_model_and_input() {
        let model = four_column_model(Uuid::new_v4());
        let features = FeatureVector {
            odds_ratio: 1.31,
            risk_allele_freq: 0.215,
            chromosome: 6.5,
            position: 63_552_013.5,
        };
        let a = RiskScorer::score_with_model(&model, &features).unwrap();
        let b = RiskScorer::score_with_model(&model, &features).unwrap();
        assert_eq!(a.probability, b.probability);
        assert_eq!(a.level, b.level);
    }
}
