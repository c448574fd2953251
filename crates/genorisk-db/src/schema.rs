//! Table names and DDL for the Genorisk schema.
//!
//! All statements are idempotent (`IF NOT EXISTS`) so `Database::initialize`
//! can run on every startup. Reference tables (variant, disease,
//! disease_variant) are filled by the import job; the service only reads
//! them. The model_artifact and genetic_input tables hold JSONB documents in
//! an ordered-by-creation-time collection.

pub const TABLE_VARIANT: &str = "variant";
pub const TABLE_DISEASE: &str = "disease";
pub const TABLE_DISEASE_VARIANT: &str = "disease_variant";
pub const TABLE_PATIENT: &str = "patient";
pub const TABLE_PREDICTION: &str = "prediction";
pub const TABLE_MODEL_ARTIFACT: &str = "model_artifact";
pub const TABLE_GENETIC_INPUT: &str = "genetic_input";

pub const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS variant (
        id               UUID PRIMARY KEY,
        rsid             TEXT NOT NULL UNIQUE,
        gene             TEXT,
        chromosome       TEXT,
        position         BIGINT,
        risk_allele      TEXT,
        odds_ratio       DOUBLE PRECISION,
        risk_allele_freq DOUBLE PRECISION,
        p_value          DOUBLE PRECISION,
        is_significant   BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS disease (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS disease_variant (
        disease_id UUID NOT NULL REFERENCES disease(id),
        variant_id UUID NOT NULL REFERENCES variant(id),
        PRIMARY KEY (disease_id, variant_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS patient (
        id         UUID PRIMARY KEY,
        name       TEXT NOT NULL,
        age        INTEGER NOT NULL,
        gender     TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS prediction (
        id          UUID PRIMARY KEY,
        patient_id  UUID NOT NULL REFERENCES patient(id),
        disease_id  UUID NOT NULL REFERENCES disease(id),
        probability DOUBLE PRECISION NOT NULL,
        risk_level  TEXT NOT NULL,
        model_id    UUID NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS model_artifact (
        id         UUID PRIMARY KEY,
        disease_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        document   JSONB NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS model_artifact_latest_idx
        ON model_artifact (disease_id, created_at DESC)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS genetic_input (
        id          UUID PRIMARY KEY,
        patient_id  UUID NOT NULL,
        disease_id  UUID NOT NULL,
        recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        document    JSONB NOT NULL
    )
    "#,
];
