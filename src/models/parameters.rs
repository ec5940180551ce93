//! Reference parameters: proportion and duration of each long-duration
//! outcome, per severity tier.
//!
//! Loaded once per run and read-only afterwards; safely shareable across any
//! number of concurrent location workers. Lookups are fallible and a miss is
//! fatal — no default is ever substituted.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::cluster::SymptomCluster;
use crate::models::tier::Tier;

/// Proportion of survivors developing an outcome and how long it persists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    /// Proportion of the tier's at-risk population developing the cluster,
    /// in [0, 1]. Raw (overlapping): the proportion for a single symptom
    /// includes people who also have others.
    pub proportion_mean: f64,
    /// Mean symptom duration, in fractional years
    pub duration_mean: f64,
}

/// One row of the upstream proportions/durations file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Severity tier the record applies to
    pub population: Tier,
    /// Symptom cluster the record applies to
    pub outcome: SymptomCluster,
    /// Proportion of the at-risk population developing the outcome
    pub proportion_mean: f64,
    /// Mean symptom duration, in fractional years
    pub duration_mean: f64,
}

/// Read-only lookup from (tier, cluster) to proportion and duration.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    entries: FxHashMap<(Tier, SymptomCluster), ParameterEntry>,
}

impl ParameterTable {
    /// Build a table from upstream records, validating each one.
    pub fn from_records(records: impl IntoIterator<Item = ParameterRecord>) -> Result<Self> {
        let mut entries = FxHashMap::default();
        for record in records {
            let (tier, cluster) = (record.population, record.outcome);
            if !(0.0..=1.0).contains(&record.proportion_mean) {
                return Err(Error::InvalidParameter {
                    tier,
                    cluster,
                    detail: format!("proportion_mean {} outside [0, 1]", record.proportion_mean),
                });
            }
            if record.duration_mean < 0.0 {
                return Err(Error::InvalidParameter {
                    tier,
                    cluster,
                    detail: format!("negative duration_mean {}", record.duration_mean),
                });
            }
            let entry = ParameterEntry {
                proportion_mean: record.proportion_mean,
                duration_mean: record.duration_mean,
            };
            if entries.insert((tier, cluster), entry).is_some() {
                return Err(Error::InvalidParameter {
                    tier,
                    cluster,
                    detail: "duplicate record".to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Build a table from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<ParameterRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Look up the entry for a (tier, cluster) pair.
    pub fn get(&self, tier: Tier, cluster: SymptomCluster) -> Result<ParameterEntry> {
        self.entries
            .get(&(tier, cluster))
            .copied()
            .ok_or(Error::MissingParameter { tier, cluster })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tier: Tier, cluster: SymptomCluster, prop: f64, dur: f64) -> ParameterRecord {
        ParameterRecord {
            population: tier,
            outcome: cluster,
            proportion_mean: prop,
            duration_mean: dur,
        }
    }

    #[test]
    fn test_lookup() {
        let table = ParameterTable::from_records(vec![record(
            Tier::Hospital,
            SymptomCluster::Fatigue,
            0.25,
            0.3,
        )])
        .unwrap();

        let entry = table.get(Tier::Hospital, SymptomCluster::Fatigue).unwrap();
        assert!((entry.proportion_mean - 0.25).abs() < f64::EPSILON);

        let err = table.get(Tier::Icu, SymptomCluster::Fatigue).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameter { tier: Tier::Icu, cluster: SymptomCluster::Fatigue }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_proportion() {
        let err = ParameterTable::from_records(vec![record(
            Tier::MidMod,
            SymptomCluster::Cognitive,
            1.2,
            0.3,
        )])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_rejects_duplicate_record() {
        let err = ParameterTable::from_records(vec![
            record(Tier::MidMod, SymptomCluster::Cognitive, 0.1, 0.3),
            record(Tier::MidMod, SymptomCluster::Cognitive, 0.2, 0.3),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"population": "midmod", "outcome": "cognitive_fatigue",
             "proportion_mean": 0.05, "duration_mean": 0.166}
        ]"#;
        let table = ParameterTable::from_json(json).unwrap();
        let entry = table
            .get(Tier::MidMod, SymptomCluster::CognitiveFatigue)
            .unwrap();
        assert!((entry.duration_mean - 0.166).abs() < f64::EPSILON);
    }
}
