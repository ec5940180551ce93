//! Core transformation stages of the long-duration outcomes pipeline.
//!
//! Per severity tier: `risk_pool` derives the at-risk population,
//! `decompose` turns overlapping symptom-cluster incidence into mutually
//! exclusive categories, and `prevalence` applies duration-bounded
//! conversion. `aggregate` merges the tiers and produces annual rates;
//! `pipeline` orchestrates one location end to end.

pub mod aggregate;
pub mod decompose;
pub mod pipeline;
pub mod prevalence;
pub mod risk_pool;
