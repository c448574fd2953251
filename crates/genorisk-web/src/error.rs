//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use genorisk_common::GenoriskError;
use serde::Serialize;
use tracing::error;

/// Error wrapper for handlers; maps the pipeline taxonomy onto status codes.
pub struct ApiError(GenoriskError);

impl From<GenoriskError> for ApiError {
    fn from(err: GenoriskError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            // User-correctable: the caller must fix the disease name.
            GenoriskError::UnknownDisease(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // Operational gap: known disease, no trained model yet.
            GenoriskError::ModelNotFound(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(err = %self.0, "internal error while serving request");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_of(err: GenoriskError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(GenoriskError::UnknownDisease("x".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(GenoriskError::ModelNotFound(Uuid::new_v4())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(GenoriskError::FeatureShapeMismatch {
                expected: 4,
                actual: 2
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
