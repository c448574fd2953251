/// Core entity types mirroring the relational schema.
/// Reference data (variants, diseases, associations) is immutable; patients
/// and predictions are append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Variant (reference catalog)
// ---------------------------------------------------------------------------

/// A catalogued SNP with its GWAS effect statistics.
///
/// Only the import process writes these rows; the pipeline treats them as
/// read-only. Numeric fields are optional because the upstream GWAS export is
/// messy; aggregation applies the documented defaults instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: Uuid,
    /// Reference identifier, e.g. "rs7903146". Unique within the catalog.
    pub rsid: String,
    pub gene: Option<String>,
    /// Stored as text: upstream data contains values like "10", "X", "6_cox_hap2".
    pub chromosome: Option<String>,
    pub position: Option<i64>,
    pub risk_allele: Option<String>,
    /// Relative-risk multiplier; 1.0 is neutral.
    pub odds_ratio: Option<f64>,
    /// Population prevalence of the risk allele, in [0, 1].
    pub risk_allele_freq: Option<f64>,
    pub p_value: Option<f64>,
    pub is_significant: bool,
}

// ---------------------------------------------------------------------------
// Disease
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub id: Uuid,
    /// Unique, matched case-sensitively on lookup.
    pub name: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Patient
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub created_at: DateTime<Utc>,
}

/// Demographics as submitted; the store assigns id and timestamp on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

// ---------------------------------------------------------------------------
// Variant observation (transient request input)
// ---------------------------------------------------------------------------

/// One (rsid, allele) pair from a patient submission. Not a catalog entity:
/// the rsid is whatever the caller typed and may match nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantObservation {
    pub rsid: String,
    pub allele: String,
}

// ---------------------------------------------------------------------------
// Risk level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Band a probability with the fixed thresholds shared with the
    /// visualization layer. Comparisons are strict: 0.4 and 0.7 exactly fall
    /// into the lower band.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            RiskLevel::High
        } else if probability > 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Serialize to the string stored in the DB.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Parse from the string stored in the DB.
    pub fn from_str(s: &str) -> Self {
        match s {
            "High" => RiskLevel::High,
            "Medium" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// One scored request. Append-only; never mutated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub disease_id: Uuid,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub model_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrediction {
    pub patient_id: Uuid,
    pub disease_id: Uuid,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub model_id: Uuid,
}
