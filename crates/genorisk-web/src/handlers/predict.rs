//! Prediction endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use genorisk_common::{NewPatient, RiskLevel, VariantObservation};
use genorisk_pipeline::PredictionRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct PatientIn {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Deserialize)]
pub struct SnpIn {
    pub rsid: String,
    pub allele: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictIn {
    pub patient: PatientIn,
    pub disease_name: String,
    pub snps: Vec<SnpIn>,
}

#[derive(Debug, Serialize)]
pub struct PredictOut {
    pub patient_id: Uuid,
    pub disease: String,
    pub risk_probability: f64,
    pub risk_level: RiskLevel,
    pub model_id: Uuid,
}

/// POST /api/predict - Run the full pipeline for one submission.
pub async fn predict(
    State(state): State<SharedState>,
    Json(input): Json<PredictIn>,
) -> Result<impl IntoResponse, ApiError> {
    let request = PredictionRequest {
        patient: NewPatient {
            name: input.patient.name,
            age: input.patient.age,
            gender: input.patient.gender,
        },
        disease_name: input.disease_name,
        observations: input
            .snps
            .into_iter()
            .map(|s| VariantObservation {
                rsid: s.rsid,
                allele: s.allele,
            })
            .collect(),
    };

    let response = state.orchestrator.predict(request).await?;

    Ok(Json(PredictOut {
        patient_id: response.patient_id,
        disease: response.disease,
        risk_probability: response.probability,
        risk_level: response.risk_level,
        model_id: response.model_id,
    }))
}
