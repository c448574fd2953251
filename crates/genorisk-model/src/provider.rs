//! Trait for trained-model access.
//!
//! Model versioning is an externally-mutable resource: new artifacts may be
//! published while the service runs. The provider therefore models "latest"
//! as an explicit read of an ordered-by-timestamp collection, never a cached
//! singleton; each request takes one consistent snapshot and concurrent
//! requests may legitimately observe different versions.

use std::sync::Mutex;

use async_trait::async_trait;
use genorisk_common::Result;
use uuid::Uuid;

use crate::artifact::TrainedModel;

/// Trait for fetching the authoritative model of a disease.
///
/// Implementations can use:
/// - the PostgreSQL document collection (production, see
///   [`crate::PgModelStore`])
/// - in-memory artifacts (testing)
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// The newest model for a disease by creation time, or `None` when no
    /// model has been trained for it yet.
    async fn latest_model(&self, disease_id: Uuid) -> Result<Option<TrainedModel>>;
}

// ── In-memory implementation ────────────────────────────────────────────────

/// In-memory provider with hardcoded models for unit tests.
#[derive(Default)]
pub struct InMemoryModelProvider {
    models: Mutex<Vec<TrainedModel>>,
}

impl InMemoryModelProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model version.
    pub fn with_model(self, model: TrainedModel) -> Self {
        self.models.lock().unwrap().push(model);
        self
    }

    /// Publish a model version after construction (concurrent-publish tests).
    pub fn publish(&self, model: TrainedModel) {
        self.models.lock().unwrap().push(model);
    }
}

#[async_trait]
impl ModelProvider for InMemoryModelProvider {
    async fn latest_model(&self, disease_id: Uuid) -> Result<Option<TrainedModel>> {
        let models = self.models.lock().unwrap();
        Ok(models
            .iter()
            .filter(|m| m.disease_id == disease_id)
            .max_by_key(|m| m.created_at)
            .cloned())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ModelArtifact, TrainedModel};
    use crate::classifier::LogisticPipeline;
    use crate::ClassifierSpec;
    use chrono::{Duration, Utc};

    fn model(disease_id: Uuid, age_days: i64) -> TrainedModel {
        let artifact = ModelArtifact {
            disease_id,
            created_at: Utc::now() - Duration::days(age_days),
            feature_names: vec!["odds_ratio".to_string(), "risk_allele_freq".to_string()],
            training_rows: 100,
            accuracy: None,
            classifier: ClassifierSpec::LogisticPipeline(LogisticPipeline {
                medians: vec![1.0, 0.3],
                means: vec![1.0, 0.3],
                scales: vec![1.0, 1.0],
                coefficients: vec![0.5, 0.5],
                intercept: 0.0,
            }),
        };
        TrainedModel::from_artifact(Uuid::new_v4(), artifact).unwrap()
    }

    #[tokio::test]
    async fn test_latest_by_created_at_wins() {
        let disease_id = Uuid::new_v4();
        let old = model(disease_id, 30);
        let new = model(disease_id, 1);
        let new_id = new.id;

        // Insertion order must not matter.
        let provider = InMemoryModelProvider::new().with_model(new).with_model(old);
        let latest = provider.latest_model(disease_id).await.unwrap().unwrap();
        assert_eq!(latest.id, new_id);
    }

    #[tokio::test]
    async fn test_absence_is_none_not_default() {
        let provider = InMemoryModelProvider::new().with_model(model(Uuid::new_v4(), 1));
        assert!(provider.latest_model(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_publish_changes_subsequent_reads_only() {
        let disease_id = Uuid::new_v4();
        let provider = InMemoryModelProvider::new().with_model(model(disease_id, 10));

        let before = provider.latest_model(disease_id).await.unwrap().unwrap();
        let fresh = model(disease_id, 0);
        let fresh_id = fresh.id;
        provider.publish(fresh);
        let after = provider.latest_model(disease_id).await.unwrap().unwrap();

        assert_ne!(before.id, after.id);
        assert_eq!(after.id, fresh_id);
    }
}
