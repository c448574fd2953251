//! Genorisk relational store.
//!
//! Read-only access to the reference catalog (variants, diseases, and their
//! associations) plus the append-only patient and prediction stores. The
//! catalog is populated by the out-of-band import job; this crate never
//! writes reference data.
//!
//! # Example
//!
//! ```rust,no_run
//! use genorisk_db::{Database, PgCatalog, VariantCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/genorisk").await?;
//!     db.initialize().await?;
//!
//!     let catalog = PgCatalog::new(db.pool().clone());
//!     let variant = catalog.find_variant("rs7903146").await?;
//!     println!("{variant:?}");
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod database;
pub mod pg;
pub mod records;
pub mod schema;

pub use catalog::{InMemoryCatalog, VariantCatalog};
pub use database::Database;
pub use pg::{PgCatalog, PgPatientStore, PgPredictionStore};
pub use records::{InMemoryPatientStore, InMemoryPredictionStore, PatientStore, PredictionStore};
