//! Error handling for the long-duration outcomes pipeline.
//!
//! Every error here is fatal to the per-location run: there is no partial
//! output and no retry. A half-completed location must never be persisted.

use thiserror::Error;

use crate::models::cluster::SymptomCluster;
use crate::models::series::{DemographicKey, SeriesKey};
use crate::models::tier::Tier;

/// Specialized error type for pipeline operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The five-column key failed to uniquely identify rows before a merge.
    /// Aborts instead of silently deduplicating or double-counting.
    #[error("duplicate key in {context}: {key:?}")]
    DuplicateKey {
        /// Which series the duplicate was found in
        context: &'static str,
        /// The offending key
        key: SeriesKey,
    },

    /// An input series is empty; the run fails closed rather than producing
    /// empty output as if it were valid.
    #[error("empty input series: {0}")]
    EmptyInput(&'static str),

    /// A requested (outcome, population tier) pair is absent from the
    /// reference parameter table. No default is substituted.
    #[error("no parameters for outcome '{cluster}' in population '{tier}'")]
    MissingParameter {
        /// Severity tier of the lookup
        tier: Tier,
        /// Symptom cluster of the lookup
        cluster: SymptomCluster,
    },

    /// A reference parameter is outside its valid range.
    #[error("invalid parameters for outcome '{cluster}' in population '{tier}': {detail}")]
    InvalidParameter {
        /// Severity tier of the record
        tier: Tier,
        /// Symptom cluster of the record
        cluster: SymptomCluster,
        /// What was wrong with the record
        detail: String,
    },

    /// Parameter records could not be deserialized.
    #[error("failed to parse parameter records: {0}")]
    ParameterParse(#[from] serde_json::Error),

    /// No population count for a (location, age group, sex) combination.
    #[error("no population count for {key:?}")]
    MissingPopulation {
        /// The demographic key of the failed lookup
        key: DemographicKey,
    },

    /// A population count that cannot serve as a rate denominator.
    #[error("non-positive population count {value} for {key:?}")]
    InvalidPopulation {
        /// The demographic key of the bad count
        key: DemographicKey,
        /// The offending count
        value: f64,
    },

    /// A collapsed annual measure came out negative, which signals an
    /// inconsistency between the configured lag offsets/durations and the
    /// data's temporal coverage. Surfaced, never silently zeroed.
    #[error("negative {measure} for outcome '{cluster}' in location {location_id}: {value}")]
    NegativeMeasure {
        /// Which measure was negative ("incidence" or "prevalence")
        measure: &'static str,
        /// Symptom cluster of the offending column
        cluster: SymptomCluster,
        /// Location whose collapse produced the negative value
        location_id: i32,
        /// The offending value
        value: f64,
    },
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
