//! Reference catalog access.
//!
//! Read-only lookups against the variant/disease reference data. Lookups that
//! find nothing return `None` or an empty set, never a default value: the
//! caller decides whether absence is fatal.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use genorisk_common::{Disease, Result, Variant};
use uuid::Uuid;

/// Trait for reference catalog lookups.
///
/// Implementations can use:
/// - PostgreSQL (production, see [`crate::PgCatalog`])
/// - In-memory fixtures (testing)
///
/// All methods are side-effect free; repeated lookups of the same key return
/// identical data.
#[async_trait]
pub trait VariantCatalog: Send + Sync {
    /// Exact-match lookup by reference identifier. No partial matching.
    async fn find_variant(&self, rsid: &str) -> Result<Option<Variant>>;

    /// All variant ids linked to a disease. Empty set if none (not an error).
    async fn associated_variant_ids(&self, disease_id: Uuid) -> Result<HashSet<Uuid>>;

    /// Exact-match, case-sensitive lookup by disease name.
    async fn find_disease(&self, name: &str) -> Result<Option<Disease>>;
}

// ── In-memory implementation ────────────────────────────────────────────────

/// In-memory catalog with hardcoded reference data for unit tests.
#[derive(Default)]
pub struct InMemoryCatalog {
    variants: HashMap<String, Variant>,
    diseases: HashMap<String, Disease>,
    associations: HashMap<Uuid, HashSet<Uuid>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalogued variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.insert(variant.rsid.clone(), variant);
        self
    }

    /// Add a disease.
    pub fn with_disease(mut self, disease: Disease) -> Self {
        self.diseases.insert(disease.name.clone(), disease);
        self
    }

    /// Link a variant to a disease.
    pub fn with_association(mut self, disease_id: Uuid, variant_id: Uuid) -> Self {
        self.associations
            .entry(disease_id)
            .or_default()
            .insert(variant_id);
        self
    }
}

#[async_trait]
impl VariantCatalog for InMemoryCatalog {
    async fn find_variant(&self, rsid: &str) -> Result<Option<Variant>> {
        Ok(self.variants.get(rsid).cloned())
    }

    async fn associated_variant_ids(&self, disease_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(self.associations.get(&disease_id).cloned().unwrap_or_default())
    }

    async fn find_disease(&self, name: &str) -> Result<Option<Disease>> {
        Ok(self.diseases.get(name).cloned())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
