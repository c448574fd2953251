//! Genorisk model store.
//!
//! Trained classifiers live in a document collection ordered by creation
//! time; the newest document per disease is authoritative. The artifact
//! payload is opaque to the rest of the system: deserialization yields an
//! object exposing a probability function over a vector of the declared
//! feature length, nothing more.
//!
//! Also hosts the raw-input archive: every scored submission is recorded as a
//! JSON document (raw rsid/allele pairs plus the derived feature map) for
//! later audit.

pub mod archive;
pub mod artifact;
pub mod classifier;
pub mod pg_store;
pub mod provider;

pub use archive::{InMemoryInputArchive, InputArchive, InputRecord};
pub use artifact::{ClassifierSpec, ModelArtifact, TrainedModel};
pub use classifier::{Classifier, LogisticPipeline};
pub use pg_store::{PgInputArchive, PgModelStore};
pub use provider::{InMemoryModelProvider, ModelProvider};
