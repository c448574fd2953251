//! genorisk-common - Shared types, errors, and configuration used across all Genorisk crates.

pub mod config;
pub mod entities;
pub mod error;

pub use entities::{
    Disease, NewPatient, NewPrediction, Patient, Prediction, RiskLevel, Variant,
    VariantObservation,
};
pub use error::{GenoriskError, Result};
