//! Data model for the long-duration outcomes pipeline
//!
//! This module contains the row keys and keyed series container, the
//! symptom-cluster taxonomy, and the read-only reference tables (outcome
//! parameters and population denominators).

pub mod cluster;
pub mod parameters;
pub mod population;
pub mod series;
pub mod tier;

// Re-export commonly used types
pub use cluster::{ClusterTotals, ClusterVector, Symptom, SymptomCluster};
pub use parameters::{ParameterEntry, ParameterRecord, ParameterTable};
pub use population::PopulationTable;
pub use series::{AnnualKey, DemographicKey, SeriesKey, TimeSeries};
pub use tier::Tier;
