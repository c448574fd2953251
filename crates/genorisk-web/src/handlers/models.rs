//! Model metadata endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub model_id: Uuid,
    pub disease: String,
    pub feature_columns: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub training_rows: i64,
    pub accuracy: Option<f64>,
}

/// GET /api/models/{disease_name} - Metadata of the authoritative model.
///
/// 404 covers both an unknown disease and a known disease with no trained
/// model; the body distinguishes the two.
pub async fn model_info(
    State(state): State<SharedState>,
    Path(disease_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(disease) = state.catalog.find_disease(&disease_name).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("unknown disease: {disease_name}") })),
        )
            .into_response());
    };

    let Some(model) = state.models.latest_model(disease.id).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("no trained model for {}", disease.name) })),
        )
            .into_response());
    };

    let info = ModelInfo {
        model_id: model.id,
        disease: disease.name,
        feature_columns: model.feature_columns.clone(),
        created_at: model.created_at,
        training_rows: model.training_rows,
        accuracy: model.accuracy,
    };
    Ok(Json(info).into_response())
}
