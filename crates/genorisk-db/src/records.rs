//! Patient and prediction stores.
//!
//! Both are append-only: a patient row is written once per prediction request
//! and never mutated; a prediction row is written once on scoring success.
//! Each insert is independently atomic. There is deliberately no transaction
//! spanning the two writes: a failure between them leaves the patient row in
//! place (documented at-most-once policy, no compensating rollback).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use genorisk_common::{NewPatient, NewPrediction, Patient, Prediction, Result};
use uuid::Uuid;

#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Insert a new patient, assigning id and creation timestamp.
    async fn insert_patient(&self, new: NewPatient) -> Result<Patient>;
}

#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Insert a new prediction record.
    async fn insert_prediction(&self, new: NewPrediction) -> Result<Prediction>;
}

// ── In-memory implementations ───────────────────────────────────────────────

/// In-memory patient store for unit tests.
#[derive(Default)]
pub struct InMemoryPatientStore {
    rows: Mutex<Vec<Patient>>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<Patient> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl PatientStore for InMemoryPatientStore {
    async fn insert_patient(&self, new: NewPatient) -> Result<Patient> {
        let patient = Patient {
            id: Uuid::new_v4(),
            name: new.name,
            age: new.age,
            gender: new.gender,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(patient.clone());
        Ok(patient)
    }
}

/// In-memory prediction store for unit tests.
#[derive(Default)]
pub struct InMemoryPredictionStore {
    rows: Mutex<Vec<Prediction>>,
}

impl InMemoryPredictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<Prediction> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionStore for InMemoryPredictionStore {
    async fn insert_prediction(&self, new: NewPrediction) -> Result<Prediction> {
        let prediction = Prediction {
            id: Uuid::new_v4(),
            patient_id: new.patient_id,
            disease_id: new.disease_id,
            probability: new.probability,
            risk_level: new.risk_level,
            model_id: new.model_id,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(prediction.clone());
        Ok(prediction)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
