//! Feature vector construction.
//!
//! Turns a patient's submitted variant/allele pairs plus a disease id into a
//! fixed 4-channel feature vector: weighted odds ratio, weighted risk-allele
//! frequency, weighted chromosome, weighted position. Variants whose effect
//! size deviates further from neutral get proportionally more influence; a
//! weight floor of 1.0 keeps near-neutral SNPs from being zeroed out while
//! still down-weighting them relative to strong-effect SNPs.
//!
//! This step raises no errors: anything that cannot contribute is skipped and
//! an empty match degrades to the neutral default vector. A typo'd or
//! obsolete rsid reduces the prediction's input richness, it does not abort
//! the request.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use genorisk_common::{Result, Variant, VariantObservation};
use genorisk_db::VariantCatalog;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Feature column order. Vectors fed to a classifier follow exactly this
/// order; models declare the same list in their artifact metadata.
pub const FEATURE_COLUMNS: [&str; 4] =
    ["odds_ratio", "risk_allele_freq", "chromosome", "position"];

/// The 4-channel aggregated feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub odds_ratio: f64,
    pub risk_allele_freq: f64,
    pub chromosome: f64,
    pub position: f64,
}

impl FeatureVector {
    /// Default vector when zero variants were retained: neutral odds ratio,
    /// zero elsewhere.
    pub fn neutral() -> Self {
        Self {
            odds_ratio: 1.0,
            risk_allele_freq: 0.0,
            chromosome: 0.0,
            position: 0.0,
        }
    }

    /// Channels in [`FEATURE_COLUMNS`] order.
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.odds_ratio,
            self.risk_allele_freq,
            self.chromosome,
            self.position,
        ]
    }

    /// Column-keyed map, for the input archive document.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        FEATURE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .zip(self.as_array())
            .collect()
    }
}

/// Outcome of one observation lookup. Kept explicit so the aggregation's
/// skip decisions are traceable and testable, not buried in logging.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantResolution {
    /// In the catalog and associated with the target disease; contributes.
    Matched(Variant),
    /// rsid matches no catalog entry.
    NotInCatalog,
    /// In the catalog but not linked to the target disease. Excluded: a SNP
    /// unrelated to the disease must not influence its score.
    NotAssociated,
}

#[derive(Debug, Clone)]
pub struct ResolvedObservation {
    pub observation: VariantObservation,
    pub resolution: VariantResolution,
}

/// Feature vector plus the per-observation resolutions that produced it.
#[derive(Debug, Clone)]
pub struct FeatureOutcome {
    pub vector: FeatureVector,
    pub resolved: Vec<ResolvedObservation>,
}

impl FeatureOutcome {
    pub fn matched_count(&self) -> usize {
        self.resolved
            .iter()
            .filter(|r| matches!(r.resolution, VariantResolution::Matched(_)))
            .count()
    }
}

/// Build the feature vector for a disease from submitted observations.
///
/// The submitted allele is carried through for archiving but does not gate or
/// adjust a matched variant's contribution.
pub async fn build_feature_vector(
    catalog: &dyn VariantCatalog,
    disease_id: Uuid,
    observations: &[VariantObservation],
) -> Result<FeatureOutcome> {
    let allowed = catalog.associated_variant_ids(disease_id).await?;
    if allowed.is_empty() {
        debug!(%disease_id, "no variant associations for disease; all submissions will be ignored");
    }

    let mut resolved = Vec::with_capacity(observations.len());
    let mut retained = Vec::new();

    for observation in observations {
        let resolution = match catalog.find_variant(&observation.rsid).await? {
            None => VariantResolution::NotInCatalog,
            Some(variant) if !allowed.contains(&variant.id) => VariantResolution::NotAssociated,
            Some(variant) => {
                retained.push(variant.clone());
                VariantResolution::Matched(variant)
            }
        };
        resolved.push(ResolvedObservation {
            observation: observation.clone(),
            resolution,
        });
    }

    let vector = aggregate(&retained);
    debug!(
        matched = retained.len(),
        submitted = observations.len(),
        ?vector,
        "aggregated feature vector"
    );

    Ok(FeatureOutcome { vector, resolved })
}

/// Weighted-average aggregation over the retained variants.
///
/// Weight per variant is `max(1.0, |odds_ratio - 1.0|)`; each channel is
/// `sum(value * weight) / sum(weight)`. Empty input yields the neutral
/// default instead of dividing by zero.
pub fn aggregate(variants: &[Variant]) -> FeatureVector {
    if variants.is_empty() {
        return FeatureVector::neutral();
    }

    let mut sums = [0.0f64; 4];
    let mut total_weight = 0.0f64;

    for variant in variants {
        let odds_ratio = variant.odds_ratio.unwrap_or(1.0);
        let values = [
            odds_ratio,
            variant.risk_allele_freq.unwrap_or(0.0),
            parse_chromosome(variant.chromosome.as_deref()),
            variant.position.map(|p| p as f64).unwrap_or(0.0),
        ];
        let weight = variant_weight(odds_ratio);
        for (sum, value) in sums.iter_mut().zip(values) {
            *sum += value * weight;
        }
        total_weight += weight;
    }

    FeatureVector {
        odds_ratio: sums[0] / total_weight,
        risk_allele_freq: sums[1] / total_weight,
        chromosome: sums[2] / total_weight,
        position: sums[3] / total_weight,
    }
}

/// Influence of a variant in the weighted average. Deviation from the
/// neutral odds ratio, floored at 1.0 so near-neutral SNPs still contribute.
pub fn variant_weight(odds_ratio: f64) -> f64 {
    (odds_ratio - 1.0).abs().max(1.0)
}

/// Numeric chromosome for aggregation. Takes the leading chromosome token of
/// the stored text (upstream data contains values like "10", "chr7", "X",
/// "22q13"), mapping X to 23 and Y to 24. Absent or unparseable values
/// contribute 0.0.
pub fn parse_chromosome(raw: Option<&str>) -> f64 {
    static CHROM_RE: OnceLock<Regex> = OnceLock::new();
    let re = CHROM_RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:chr)?(x|y|[1-9][0-9]?)").expect("static pattern")
    });

    let Some(raw) = raw else { return 0.0 };
    match re.captures(raw.trim()).and_then(|c| c.get(1)) {
        Some(m) => match m.as_str().to_ascii_uppercase().as_str() {
            "X" => 23.0,
            "Y" => 24.0,
            digits => digits.parse().unwrap_or(0.0),
        },
        None => 0.0,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use genorisk_common::Disease;
    use genorisk_db::InMemoryCatalog;

    fn variant(rsid: &str, or: f64, freq: f64, chrom: &str, pos: i64) -> Variant {
        Variant {
            id: Uuid::new_v4(),
            rsid: rsid.to_string(),
            gene: None,
            chromosome: Some(chrom.to_string()),
            position: Some(pos),
            risk_allele: Some("T".to_string()),
            odds_ratio: Some(or),
            risk_allele_freq: Some(freq),
            p_value: None,
            is_significant: true,
        }
    }

    fn observation(rsid: &str) -> VariantObservation {
        VariantObservation {
            rsid: rsid.to_string(),
            allele: "T".to_string(),
        }
    }

    /// Catalog with one disease and the given variants all associated to it.
    fn catalog_with(variants: &[Variant]) -> (InMemoryCatalog, Uuid) {
        let disease_id = Uuid::new_v4();
        let mut catalog = InMemoryCatalog::new().with_disease(Disease {
            id: disease_id,
            name: "Type 2 Diabetes".to_string(),
            description: String::new(),
        });
        for v in variants {
            catalog = catalog
                .with_variant(v.clone())
                .with_association(disease_id, v.id);
        }
        (catalog, disease_id)
    }

    #[tokio::test]
    async fn test_empty_submission_yields_neutral_default() {
        let (catalog, disease_id) = catalog_with(&[]);
        let outcome = build_feature_vector(&catalog, disease_id, &[]).await.unwrap();
        assert_eq!(outcome.vector, FeatureVector::neutral());
        assert_eq!(outcome.vector.as_array(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_unknown_rsids_yield_neutral_default() {
        let (catalog, disease_id) = catalog_with(&[]);
        let obs = [observation("rs0000001"), observation("rs0000002")];
        let outcome = build_feature_vector(&catalog, disease_id, &obs).await.unwrap();

        assert_eq!(outcome.vector.as_array(), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(outcome.matched_count(), 0);
        assert!(outcome
            .resolved
            .iter()
            .all(|r| r.resolution == VariantResolution::NotInCatalog));
    }

    #[tokio::test]
    async fn test_disease_gating_excludes_unassociated_variant() {
        // Variant exists in the catalog but is linked to a different disease.
        let v = variant("rs7903146", 1.37, 0.28, "10", 114_758_349);
        let (catalog, _) = catalog_with(&[v.clone()]);
        let other_disease = Uuid::new_v4();
        let catalog = catalog.with_disease(Disease {
            id: other_disease,
            name: "Alzheimer's Disease".to_string(),
            description: String::new(),
        });

        let outcome = build_feature_vector(&catalog, other_disease, &[observation("rs7903146")])
            .await
            .unwrap();

        assert_eq!(outcome.vector, FeatureVector::neutral());
        assert_eq!(
            outcome.resolved[0].resolution,
            VariantResolution::NotAssociated
        );
    }

    #[tokio::test]
    async fn test_weight_floor_for_neutral_odds_ratio() {
        // OR of exactly 1.0 gets weight 1.0, not 0: the average equals the
        // variant's raw values instead of a division by zero.
        let v = variant("rs12255372", 1.0, 0.31, "10", 114_808_902);
        let (catalog, disease_id) = catalog_with(&[v]);

        let outcome = build_feature_vector(&catalog, disease_id, &[observation("rs12255372")])
            .await
            .unwrap();

        assert_eq!(outcome.vector.odds_ratio, 1.0);
        assert_eq!(outcome.vector.risk_allele_freq, 0.31);
        assert_eq!(outcome.vector.chromosome, 10.0);
        assert_eq!(outcome.vector.position, 114_808_902.0);
    }

    #[tokio::test]
    async fn test_weighted_average_two_variants() {
        // Both ORs deviate less than 1.0 from neutral, so both weights floor
        // to 1.0 and the channels reduce to plain averages.
        let v1 = variant("rs7903146", 1.37, 0.28, "10", 114_758_349);
        let v2 = variant("rs1801282", 1.25, 0.15, "3", 12_345_678);
        let (catalog, disease_id) = catalog_with(&[v1, v2]);

        let obs = [observation("rs7903146"), observation("rs1801282")];
        let outcome = build_feature_vector(&catalog, disease_id, &obs).await.unwrap();

        let [or, freq, chrom, pos] = outcome.vector.as_array();
        assert!((or - 1.31).abs() < 1e-9);
        assert!((freq - 0.215).abs() < 1e-9);
        assert!((chrom - 6.5).abs() < 1e-9);
        assert!((pos - 63_552_013.5).abs() < 1e-3);
    }

    #[test]
    fn test_strong_effect_variant_dominates() {
        let strong = variant("rs429358", 3.5, 0.14, "19", 45_411_941);
        let weak = variant("rs7412", 1.1, 0.08, "19", 45_412_079);

        // Weights: |3.5 - 1| = 2.5 and max(1.0, 0.1) = 1.0.
        let vec = aggregate(&[strong, weak]);
        let expected_or = (3.5 * 2.5 + 1.1 * 1.0) / 3.5;
        let expected_freq = (0.14 * 2.5 + 0.08 * 1.0) / 3.5;
        assert!((vec.odds_ratio - expected_or).abs() < 1e-9);
        assert!((vec.risk_allele_freq - expected_freq).abs() < 1e-9);
    }

    #[test]
    fn test_missing_fields_use_channel_defaults() {
        let v = Variant {
            id: Uuid::new_v4(),
            rsid: "rs999".to_string(),
            gene: None,
            chromosome: None,
            position: None,
            risk_allele: None,
            odds_ratio: None,
            risk_allele_freq: None,
            p_value: None,
            is_significant: false,
        };
        let vec = aggregate(&[v]);
        assert_eq!(vec.as_array(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_submitted_allele_does_not_gate_contribution() {
        // The catalog risk allele is T; the patient reports G. The variant
        // still contributes: the submitted allele is recorded but unused in
        // aggregation.
        let v = variant("rs7903146", 1.37, 0.28, "10", 114_758_349);
        let (catalog, disease_id) = catalog_with(&[v]);

        let obs = [VariantObservation {
            rsid: "rs7903146".to_string(),
            allele: "G".to_string(),
        }];
        let outcome = build_feature_vector(&catalog, disease_id, &obs).await.unwrap();
        assert_eq!(outcome.matched_count(), 1);
        assert!((outcome.vector.odds_ratio - 1.37).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_determinism() {
        let v1 = variant("rs7903146", 1.37, 0.28, "10", 114_758_349);
        let v2 = variant("rs1801282", 1.25, 0.15, "3", 12_345_678);
        let (catalog, disease_id) = catalog_with(&[v1, v2]);
        let obs = [observation("rs7903146"), observation("rs1801282")];

        let a = build_feature_vector(&catalog, disease_id, &obs).await.unwrap();
        let b = build_feature_vector(&catalog, disease_id, &obs).await.unwrap();
        assert_eq!(a.vector, b.vector);
    }

    #[test]
    fn test_parse_chromosome() {
        assert_eq!(parse_chromosome(Some("10")), 10.0);
        assert_eq!(parse_chromosome(Some(" 12 ")), 12.0);
        assert_eq!(parse_chromosome(Some("X")), 23.0);
        assert_eq!(parse_chromosome(Some("y")), 24.0);
        assert_eq!(parse_chromosome(Some("22q13")), 22.0);
        assert_eq!(parse_chromosome(Some("chr7")), 7.0);
        assert_eq!(parse_chromosome(Some("garbage")), 0.0);
        assert_eq!(parse_chromosome(Some("")), 0.0);
        assert_eq!(parse_chromosome(None), 0.0);
    }

    #[test]
    fn test_feature_map_follows_column_order() {
        let map = FeatureVector::neutral().to_map();
        assert_eq!(map.len(), 4);
        assert_eq!(map["odds_ratio"], 1.0);
        assert_eq!(map["position"], 0.0);
    }
}
