//! Prediction orchestration.
//!
//! Sequences one request through
//! `DiseaseValidated -> PatientRecorded -> FeaturesBuilt -> Scored ->
//! Persisted`, with failure exits for an unknown disease (rejected before
//! anything is written) and a missing model (aborts after the patient row;
//! there is intentionally no compensating rollback, patients persist
//! independent of prediction success).

use std::sync::Arc;

use genorisk_common::{
    GenoriskError, NewPatient, NewPrediction, Result, RiskLevel, VariantObservation,
};
use genorisk_db::{PatientStore, PredictionStore, VariantCatalog};
use genorisk_model::{InputArchive, InputRecord};
use genorisk_scoring::{build_feature_vector, RiskScorer};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub patient: NewPatient,
    pub disease_name: String,
    pub observations: Vec<VariantObservation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub patient_id: Uuid,
    pub disease: String,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub model_id: Uuid,
}

/// Runs the full pipeline for one request. Stateless across requests; every
/// collaborator is an Arc'd trait object so the pipeline composes identically
/// over PostgreSQL and in-memory stores.
#[derive(Clone)]
pub struct PredictionOrchestrator {
    catalog: Arc<dyn VariantCatalog>,
    patients: Arc<dyn PatientStore>,
    predictions: Arc<dyn PredictionStore>,
    archive: Arc<dyn InputArchive>,
    scorer: RiskScorer,
}

impl PredictionOrchestrator {
    pub fn new(
        catalog: Arc<dyn VariantCatalog>,
        patients: Arc<dyn PatientStore>,
        predictions: Arc<dyn PredictionStore>,
        archive: Arc<dyn InputArchive>,
        scorer: RiskScorer,
    ) -> Self {
        Self {
            catalog,
            patients,
            predictions,
            archive,
            scorer,
        }
    }

    pub async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse> {
        // Reject unknown diseases before any write.
        let disease = self
            .catalog
            .find_disease(&request.disease_name)
            .await?
            .ok_or_else(|| GenoriskError::UnknownDisease(request.disease_name.clone()))?;

        let patient = self.patients.insert_patient(request.patient.clone()).await?;

        let outcome =
            build_feature_vector(self.catalog.as_ref(), disease.id, &request.observations).await?;
        if outcome.matched_count() == 0 && !request.observations.is_empty() {
            warn!(
                patient_id = %patient.id,
                disease = %disease.name,
                submitted = request.observations.len(),
                "no submitted variant matched the disease; scoring the default vector"
            );
        }

        // A missing model aborts here: the patient row above remains, no
        // prediction row is written.
        let score = self.scorer.score(disease.id, &outcome.vector).await?;

        let record = InputRecord {
            patient_id: patient.id,
            disease_id: disease.id,
            model_id: score.model_id,
            raw_variants: request
                .observations
                .iter()
                .map(|o| (o.rsid.clone(), o.allele.clone()))
                .collect(),
            derived_features: outcome.vector.to_map(),
        };
        // The archive is an audit artifact, not a correctness dependency.
        if let Err(err) = self.archive.record(record).await {
            warn!(patient_id = %patient.id, %err, "failed to archive raw input");
        }

        self.predictions
            .insert_prediction(NewPrediction {
                patient_id: patient.id,
                disease_id: disease.id,
                probability: score.probability,
                risk_level: score.level,
                model_id: score.model_id,
            })
            .await?;

        info!(
            patient_id = %patient.id,
            disease = %disease.name,
            probability = score.probability,
            level = score.level.as_str(),
            "prediction persisted"
        );

        Ok(PredictionResponse {
            patient_id: patient.id,
            disease: disease.name,
            probability: score.probability,
            risk_level: score.level,
            model_id: score.model_id,
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
