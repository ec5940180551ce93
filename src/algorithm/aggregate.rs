//! Severity aggregation, annual collapse, and rate calculation.
//!
//! The three tiers' per-day measures are summed into population-level
//! totals, restricted to the reference year, collapsed to one annual value
//! per (location, age group, sex, draw), checked for negativity, and divided
//! by population counts.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::cluster::{ClusterTotals, SymptomCluster};
use crate::models::population::PopulationTable;
use crate::models::series::{AnnualKey, SeriesKey, TimeSeries};

/// Sum the tiers' measures on the full key. A tier with no row for a key
/// present in another tier contributes zero, never null; per-tier
/// intermediates are consumed here and do not survive the merge.
#[must_use]
pub fn merge_tiers(tiers: [TimeSeries<ClusterTotals>; 3]) -> TimeSeries<ClusterTotals> {
    let mut merged: FxHashMap<SeriesKey, ClusterTotals> = FxHashMap::default();
    for tier in tiers {
        for (key, totals) in tier {
            merged.entry(key).or_default().add_assign(&totals);
        }
    }
    TimeSeries::from_map(merged)
}

/// Restrict to the reference year and collapse to annual totals.
///
/// All 14 measures are group-summed across the days of the year; prevalence
/// sums are then divided by the year length, yielding an annual-average
/// daily prevalence.
#[must_use]
pub fn collapse_annual(
    merged: TimeSeries<ClusterTotals>,
    config: &PipelineConfig,
) -> FxHashMap<AnnualKey, ClusterTotals> {
    let days_in_year = config.days_in_year() as f64;
    let mut annual = merged
        .restrict(config.year_start(), config.year_end())
        .collapse(SeriesKey::annual, |acc: &mut ClusterTotals, totals| {
            acc.add_assign(&totals);
        });

    for totals in annual.values_mut() {
        totals.prevalence = totals.prevalence.scaled(1.0 / days_in_year);
    }
    annual
}

/// Fail-loud negativity check on the collapsed measures.
///
/// A negative annual value signals an inconsistency between the configured
/// lag offsets/durations and the data's temporal coverage; it is surfaced
/// with the offending measure, cluster, and location instead of being
/// silently zeroed, which would mask upstream parameter bugs.
pub fn check_non_negative(annual: &FxHashMap<AnnualKey, ClusterTotals>) -> Result<()> {
    // sorted so a run with several offenders always reports the same one
    for (key, totals) in annual.iter().sorted_by(|(a, _), (b, _)| a.cmp(b)) {
        for cluster in SymptomCluster::ALL {
            if totals.incidence[cluster] < 0.0 {
                return Err(Error::NegativeMeasure {
                    measure: "incidence",
                    cluster,
                    location_id: key.location_id,
                    value: totals.incidence[cluster],
                });
            }
            if totals.prevalence[cluster] < 0.0 {
                return Err(Error::NegativeMeasure {
                    measure: "prevalence",
                    cluster,
                    location_id: key.location_id,
                    value: totals.prevalence[cluster],
                });
            }
        }
    }
    Ok(())
}

/// Final output row for one symptom cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterRow {
    /// Location identifier
    pub location_id: i32,
    /// Age group identifier
    pub age_group_id: i32,
    /// Sex identifier
    pub sex_id: i32,
    /// Uncertainty draw label
    pub draw: String,
    /// Annual exclusive incidence (count)
    pub incidence: f64,
    /// Annual-average daily prevalence (count)
    pub prevalence: f64,
    /// Annual incidence per capita
    pub incidence_rate: f64,
    /// Annual-average daily prevalence per capita
    pub prevalence_rate: f64,
    /// Years lived with disability contribution (prevalence rate times the
    /// disability weight)
    pub yld: f64,
}

/// One output table per symptom cluster, rows sorted by key.
#[derive(Debug, Clone, Default)]
pub struct LocationOutput {
    tables: [Vec<ClusterRow>; SymptomCluster::COUNT],
}

impl LocationOutput {
    /// Rows for one cluster's table.
    #[must_use]
    pub fn cluster(&self, cluster: SymptomCluster) -> &[ClusterRow] {
        &self.tables[cluster.index()]
    }

    /// Iterate over (cluster, table) pairs in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (SymptomCluster, &[ClusterRow])> {
        SymptomCluster::ALL
            .into_iter()
            .map(|cluster| (cluster, self.cluster(cluster)))
    }
}

/// Divide the annual measures by population counts and apply the disability
/// weight, partitioning the result into per-cluster tables.
pub fn rates(
    annual: FxHashMap<AnnualKey, ClusterTotals>,
    population: &PopulationTable,
    config: &PipelineConfig,
) -> Result<LocationOutput> {
    let mut output = LocationOutput::default();

    // sorted for deterministic output ordering
    for (key, totals) in annual.into_iter().sorted_by(|(a, _), (b, _)| a.cmp(b)) {
        let denominator = population.get(key.demographic())?;
        for cluster in SymptomCluster::ALL {
            let incidence = totals.incidence[cluster];
            let prevalence = totals.prevalence[cluster];
            let incidence_rate = incidence / denominator;
            let prevalence_rate = prevalence / denominator;
            output.tables[cluster.index()].push(ClusterRow {
                location_id: key.location_id,
                age_group_id: key.age_group_id,
                sex_id: key.sex_id,
                draw: key.draw.clone(),
                incidence,
                prevalence,
                incidence_rate,
                prevalence_rate,
                yld: prevalence_rate * config.disability_weight,
            });
        }
    }
    Ok(output)
}
