//! Population denominators for rate calculation.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::models::series::DemographicKey;

/// Read-only population counts keyed by (location, age group, sex).
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    counts: FxHashMap<DemographicKey, f64>,
}

impl PopulationTable {
    /// Build a table from counts, rejecting non-positive denominators.
    pub fn from_counts(counts: impl IntoIterator<Item = (DemographicKey, f64)>) -> Result<Self> {
        let mut map = FxHashMap::default();
        for (key, value) in counts {
            if value <= 0.0 {
                return Err(Error::InvalidPopulation { key, value });
            }
            map.insert(key, value);
        }
        Ok(Self { counts: map })
    }

    /// Look up the population count for a demographic key.
    pub fn get(&self, key: DemographicKey) -> Result<f64> {
        self.counts
            .get(&key)
            .copied()
            .ok_or(Error::MissingPopulation { key })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: DemographicKey = DemographicKey {
        location_id: 160,
        age_group_id: 22,
        sex_id: 2,
    };

    #[test]
    fn test_lookup() {
        let table = PopulationTable::from_counts(vec![(KEY, 1_000_000.0)]).unwrap();
        assert!((table.get(KEY).unwrap() - 1_000_000.0).abs() < f64::EPSILON);

        let missing = DemographicKey { sex_id: 1, ..KEY };
        assert!(matches!(
            table.get(missing).unwrap_err(),
            Error::MissingPopulation { .. }
        ));
    }

    #[test]
    fn test_rejects_non_positive_count() {
        let err = PopulationTable::from_counts(vec![(KEY, 0.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidPopulation { .. }));
    }
}
