//! A Rust library for estimating long-duration (post-acute) symptom cluster
//! incidence and prevalence from short-term COVID-19 outcome draws.
//!
//! The pipeline turns daily time series of infections, hospital admissions,
//! ICU admissions, and deaths into annual, population-rate estimates of seven
//! mutually exclusive long-duration symptom clusters (cognitive, fatigue,
//! respiratory, and their combinations), stratified by severity of the acute
//! illness, location, age group, sex, and uncertainty draw.
//!
//! Stages, per severity tier: date lagging, at-risk derivation, overlap
//! decomposition into mutually exclusive categories, and duration-bounded
//! prevalence conversion. Tiers are then merged, restricted to the reference
//! year, collapsed to annual totals, and divided by population counts.
//!
//! Input retrieval and output serialization are out of scope; callers hand in
//! already-tabular series keyed by (location, age group, sex, draw, date) and
//! receive one output table per symptom cluster.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;

// Re-export the most common types for easier use
// Core types
pub use config::{LagConfig, PipelineConfig};
pub use error::{Error, Result};

// Data model
pub use models::cluster::{ClusterTotals, ClusterVector, Symptom, SymptomCluster};
pub use models::parameters::{ParameterEntry, ParameterRecord, ParameterTable};
pub use models::population::PopulationTable;
pub use models::series::{AnnualKey, DemographicKey, SeriesKey, TimeSeries};
pub use models::tier::Tier;

// Pipeline entry points
pub use algorithm::aggregate::{ClusterRow, LocationOutput};
pub use algorithm::pipeline::{Pipeline, TierInputs};
pub use algorithm::risk_pool::AdmitRecord;
