use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GenoriskError {
    /// Caller-facing validation failure: the submitted disease name matches
    /// nothing in the catalog. Non-retryable; the caller must correct input.
    #[error("unknown disease: {0}")]
    UnknownDisease(String),

    /// No trained model exists for a known disease. Surfaced as-is; a default
    /// probability is never fabricated in its place.
    #[error("no trained model for disease {0}")]
    ModelNotFound(Uuid),

    /// Feature vector length disagrees with the model's declared column
    /// order. Integrity violation between catalog and model versions.
    #[error("feature shape mismatch: model expects {expected} columns, got {actual}")]
    FeatureShapeMismatch { expected: usize, actual: usize },

    /// Model artifact document could not be decoded into a classifier.
    #[error("malformed model artifact {0}")]
    MalformedArtifact(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GenoriskError>;
