//! Shared application state for the web server.

use std::sync::Arc;

use genorisk_common::config::ServiceConfig;
use genorisk_common::Result;
use genorisk_db::{Database, PgCatalog, PgPatientStore, PgPredictionStore, VariantCatalog};
use genorisk_model::{ModelProvider, PgInputArchive, PgModelStore};
use genorisk_pipeline::PredictionOrchestrator;
use genorisk_scoring::RiskScorer;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub orchestrator: PredictionOrchestrator,
    pub catalog: Arc<dyn VariantCatalog>,
    pub models: Arc<dyn ModelProvider>,
}

impl AppState {
    /// Connect to the configured database, apply the schema, and wire the
    /// pipeline over the PostgreSQL stores.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let db = Database::connect(&config.database_url).await?;
        db.initialize().await?;
        let pool = db.pool().clone();

        let catalog: Arc<dyn VariantCatalog> = Arc::new(PgCatalog::new(pool.clone()));
        let models: Arc<dyn ModelProvider> = Arc::new(PgModelStore::new(pool.clone()));

        let orchestrator = PredictionOrchestrator::new(
            catalog.clone(),
            Arc::new(PgPatientStore::new(pool.clone())),
            Arc::new(PgPredictionStore::new(pool.clone())),
            Arc::new(PgInputArchive::new(pool)),
            RiskScorer::new(models.clone()),
        );

        Ok(Self {
            orchestrator,
            catalog,
            models,
        })
    }
}

pub type SharedState = Arc<AppState>;
