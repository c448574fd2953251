//! Raw-input archive.
//!
//! Every scored submission is recorded as a document: the rsid/allele pairs
//! exactly as the caller sent them, the derived feature map, and the model
//! that scored them. Write-only from the pipeline's perspective; the archive
//! exists for audit and offline analysis, not for serving.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use genorisk_common::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRecord {
    pub patient_id: Uuid,
    pub disease_id: Uuid,
    pub model_id: Uuid,
    /// rsid -> submitted allele, verbatim from the request.
    pub raw_variants: BTreeMap<String, String>,
    /// feature column -> derived value.
    pub derived_features: BTreeMap<String, f64>,
}

#[async_trait]
pub trait InputArchive: Send + Sync {
    /// Append one submission document.
    async fn record(&self, record: InputRecord) -> Result<()>;
}

/// In-memory archive for unit tests.
#[derive(Default)]
pub struct InMemoryInputArchive {
    rows: Mutex<Vec<InputRecord>>,
}

impl InMemoryInputArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<InputRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl InputArchive for InMemoryInputArchive {
    async fn record(&self, record: InputRecord) -> Result<()> {
        self.rows.lock().unwrap().push(record);
        Ok(())
    }
}
