//! PostgreSQL implementations of the catalog and record stores.
//!
//! Catalog queries are plain exact-match reads; patient and prediction writes
//! are single-row inserts, each independently atomic.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use genorisk_common::{
    Disease, NewPatient, NewPrediction, Patient, Prediction, Result, Variant,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::VariantCatalog;
use crate::records::{PatientStore, PredictionStore};

// ── Catalog ─────────────────────────────────────────────────────────────────

/// PostgreSQL-backed reference catalog.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VariantCatalog for PgCatalog {
    async fn find_variant(&self, rsid: &str) -> Result<Option<Variant>> {
        let row = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT id, rsid, gene, chromosome, position, risk_allele,
                   odds_ratio, risk_allele_freq, p_value, is_significant
            FROM variant
            WHERE rsid = $1
            "#,
        )
        .bind(rsid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Variant::from))
    }

    async fn associated_variant_ids(&self, disease_id: Uuid) -> Result<HashSet<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT variant_id FROM disease_variant WHERE disease_id = $1",
        )
        .bind(disease_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn find_disease(&self, name: &str) -> Result<Option<Disease>> {
        let row = sqlx::query_as::<_, DiseaseRow>(
            "SELECT id, name, description FROM disease WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Disease::from))
    }
}

// ── Record stores ───────────────────────────────────────────────────────────

/// PostgreSQL-backed patient store.
#[derive(Clone)]
pub struct PgPatientStore {
    pool: PgPool,
}

impl PgPatientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientStore for PgPatientStore {
    async fn insert_patient(&self, new: NewPatient) -> Result<Patient> {
        let id = Uuid::new_v4();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO patient (id, name, age, gender)
            VALUES ($1, $2, $3, $4)
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(new.age)
        .bind(&new.gender)
        .fetch_one(&self.pool)
        .await?;

        Ok(Patient {
            id,
            name: new.name,
            age: new.age,
            gender: new.gender,
            created_at,
        })
    }
}

/// PostgreSQL-backed prediction store.
#[derive(Clone)]
pub struct PgPredictionStore {
    pool: PgPool,
}

impl PgPredictionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionStore for PgPredictionStore {
    async fn insert_prediction(&self, new: NewPrediction) -> Result<Prediction> {
        let id = Uuid::new_v4();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO prediction (id, patient_id, disease_id, probability, risk_level, model_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(new.patient_id)
        .bind(new.disease_id)
        .bind(new.probability)
        .bind(new.risk_level.as_str())
        .bind(new.model_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Prediction {
            id,
            patient_id: new.patient_id,
            disease_id: new.disease_id,
            probability: new.probability,
            risk_level: new.risk_level,
            model_id: new.model_id,
            created_at,
        })
    }
}

// ── Internal sqlx row mapping ───────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct VariantRow {
    id: Uuid,
    rsid: String,
    gene: Option<String>,
    chromosome: Option<String>,
    position: Option<i64>,
    risk_allele: Option<String>,
    odds_ratio: Option<f64>,
    risk_allele_freq: Option<f64>,
    p_value: Option<f64>,
    is_significant: bool,
}

impl From<VariantRow> for Variant {
    fn from(r: VariantRow) -> Self {
        Variant {
            id: r.id,
            rsid: r.rsid,
            gene: r.gene,
            chromosome: r.chromosome,
            position: r.position,
            risk_allele: r.risk_allele,
            odds_ratio: r.odds_ratio,
            risk_allele_freq: r.risk_allele_freq,
            p_value: r.p_value,
            is_significant: r.is_significant,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DiseaseRow {
    id: Uuid,
    name: String,
    description: String,
}

impl From<DiseaseRow> for Disease {
    fn from(r: DiseaseRow) -> Self {
        Disease {
            id: r.id,
            name: r.name,
            description: r.description,
        }
    }
}
