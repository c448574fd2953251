//! Versioned model artifact documents.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use genorisk_common::{GenoriskError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::{Classifier, LogisticPipeline};

/// Classifier payload inside an artifact document.
///
/// Tagged so future artifact generations can ship a different format without
/// breaking older documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierSpec {
    LogisticPipeline(LogisticPipeline),
}

/// A model artifact as stored in the document collection.
///
/// Multiple artifacts may exist per disease; the newest `created_at` is
/// authoritative. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub disease_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Order-significant: feature vectors fed to the classifier must follow
    /// exactly this column order and length.
    pub feature_names: Vec<String>,
    pub training_rows: i64,
    /// Training accuracy; absent in older documents.
    #[serde(default)]
    pub accuracy: Option<f64>,
    pub classifier: ClassifierSpec,
}

/// A decoded, ready-to-score model.
#[derive(Clone)]
pub struct TrainedModel {
    pub id: Uuid,
    pub disease_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub feature_columns: Vec<String>,
    pub training_rows: i64,
    pub accuracy: Option<f64>,
    classifier: Arc<dyn Classifier>,
}

impl TrainedModel {
    /// Decode an artifact document into a scorable model.
    ///
    /// Fails with `MalformedArtifact` when the classifier's parameter shape
    /// disagrees with the declared feature columns.
    pub fn from_artifact(id: Uuid, artifact: ModelArtifact) -> Result<Self> {
        let classifier: Arc<dyn Classifier> = match artifact.classifier {
            ClassifierSpec::LogisticPipeline(pipeline) => Arc::new(pipeline),
        };
        if classifier.n_features() != artifact.feature_names.len() {
            return Err(GenoriskError::MalformedArtifact(id));
        }
        Ok(Self {
            id,
            disease_id: artifact.disease_id,
            created_at: artifact.created_at,
            feature_columns: artifact.feature_names,
            training_rows: artifact.training_rows,
            accuracy: artifact.accuracy,
            classifier,
        })
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

impl std::fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedModel")
            .field("id", &self.id)
            .field("disease_id", &self.disease_id)
            .field("created_at", &self.created_at)
            .field("feature_columns", &self.feature_columns)
            .field("training_rows", &self.training_rows)
            .field("accuracy", &self.accuracy)
            .finish_non_exhaustive()
    }
}
