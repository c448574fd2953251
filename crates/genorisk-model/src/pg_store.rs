//! PostgreSQL document store for model artifacts and input records.
//!
//! Artifacts are JSONB documents in an ordered-by-`created_at` collection;
//! "latest" is a single ordered query, so every request reads one consistent
//! snapshot without coordination.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use genorisk_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::archive::{InputArchive, InputRecord};
use crate::artifact::{ModelArtifact, TrainedModel};
use crate::provider::ModelProvider;

/// PostgreSQL-backed model store.
#[derive(Clone)]
pub struct PgModelStore {
    pool: PgPool,
}

impl PgModelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new artifact version. Called by the out-of-band training job,
    /// never by the prediction pipeline.
    pub async fn insert_artifact(&self, artifact: &ModelArtifact) -> Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO model_artifact (id, disease_id, created_at, document)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(artifact.disease_id)
        .bind(artifact.created_at)
        .bind(serde_json::to_value(artifact)?)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }
}

#[async_trait]
impl ModelProvider for PgModelStore {
    async fn latest_model(&self, disease_id: Uuid) -> Result<Option<TrainedModel>> {
        let row: Option<(Uuid, serde_json::Value)> = sqlx::query_as(
            r#"
            SELECT id, document
            FROM model_artifact
            WHERE disease_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(disease_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((id, document)) => {
                let artifact: ModelArtifact = serde_json::from_value(document)?;
                Ok(Some(TrainedModel::from_artifact(id, artifact)?))
            }
            None => Ok(None),
        }
    }
}

/// PostgreSQL-backed input archive.
#[derive(Clone)]
pub struct PgInputArchive {
    pool: PgPool,
}

impl PgInputArchive {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InputArchive for PgInputArchive {
    async fn record(&self, record: InputRecord) -> Result<()> {
        let recorded_at: DateTime<Utc> = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO genetic_input (id, patient_id, disease_id, recorded_at, document)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.patient_id)
        .bind(record.disease_id)
        .bind(recorded_at)
        .bind(serde_json::to_value(&record)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
