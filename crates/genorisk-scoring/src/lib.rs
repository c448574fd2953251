//! genorisk-scoring - Feature aggregation and risk scoring.
//!
//! The one algorithmic piece of the service: patient-submitted variant
//! observations are matched against the reference catalog, gated to the
//! target disease, aggregated into a fixed 4-channel weighted-average feature
//! vector, and scored by the disease's latest trained classifier.

pub mod features;
pub mod scorer;

pub use features::{
    build_feature_vector, FeatureOutcome, FeatureVector, ResolvedObservation, VariantResolution,
    FEATURE_COLUMNS,
};
pub use scorer::{RiskScore, RiskScorer};
