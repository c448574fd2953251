//! genorisk-pipeline - Per-request prediction orchestration.

pub mod orchestrator;

pub use orchestrator::{PredictionOrchestrator, PredictionRequest, PredictionResponse};
