//! Duration-bounded conversion from exclusive incidence to prevalence.
//!
//! Prevalence on a date is incidence times the cluster's mean symptom
//! duration in days, clamped so no episode is modeled as extending past the
//! end of the reference year. The clamp depends on the row's date, so it is
//! recomputed per date.

use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::cluster::{ClusterTotals, ClusterVector, SymptomCluster};
use crate::models::parameters::ParameterTable;
use crate::models::series::TimeSeries;
use crate::models::tier::Tier;

/// Effective duration on `date`: the configured duration, shortened to the
/// remaining span of the reference year, and zero once the year has ended.
fn clamped_duration(duration_days: f64, date: NaiveDate, year_end: NaiveDate) -> f64 {
    let remaining = (year_end - date).num_days() as f64;
    if remaining < 0.0 {
        0.0
    } else {
        duration_days.min(remaining)
    }
}

/// Attach prevalence to a tier's exclusive incidence series.
///
/// Durations come from the parameter table in fractional years and are
/// converted to whole days against the reference-year length.
pub fn to_prevalence(
    incidence: TimeSeries<ClusterVector>,
    params: &ParameterTable,
    tier: Tier,
    config: &PipelineConfig,
) -> Result<TimeSeries<ClusterTotals>> {
    let days_in_year = config.days_in_year() as f64;
    let mut durations = ClusterVector::default();
    for cluster in SymptomCluster::ALL {
        durations[cluster] = (params.get(tier, cluster)?.duration_mean * days_in_year).round();
    }

    let year_end = config.year_end();
    Ok(incidence.map(|key, incidence| {
        let prevalence = ClusterVector::from_fn(|cluster| {
            incidence[cluster] * clamped_duration(durations[cluster], key.date, year_end)
        });
        ClusterTotals {
            incidence,
            prevalence,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parameters::{ParameterRecord, ParameterTable};
    use crate::models::series::SeriesKey;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(d: NaiveDate) -> SeriesKey {
        SeriesKey {
            location_id: 160,
            age_group_id: 22,
            sex_id: 1,
            draw: "draw_0".to_string(),
            date: d,
        }
    }

    fn params(duration_mean: f64) -> ParameterTable {
        let records = SymptomCluster::ALL.into_iter().map(|cluster| ParameterRecord {
            population: Tier::MidMod,
            outcome: cluster,
            proportion_mean: 0.1,
            duration_mean,
        });
        ParameterTable::from_records(records).unwrap()
    }

    fn unit_incidence(dates: &[NaiveDate]) -> TimeSeries<ClusterVector> {
        TimeSeries::from_rows(
            "incidence",
            dates.iter().map(|d| (key(*d), ClusterVector::from_fn(|_| 1.0))),
        )
        .unwrap()
    }

    #[test]
    fn test_unclamped_early_in_year() {
        // 0.166 years is a 61-day duration against a 366-day year
        let config = PipelineConfig::default();
        let series = unit_incidence(&[date(2020, 2, 1)]);

        let result = to_prevalence(series, &params(0.166), Tier::MidMod, &config).unwrap();
        let totals = result.get(&key(date(2020, 2, 1))).unwrap();
        assert!((totals.prevalence[SymptomCluster::Cognitive] - 61.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_near_year_end() {
        // 10 days before December 31 the remaining span wins
        let config = PipelineConfig::default();
        let series = unit_incidence(&[date(2020, 12, 21)]);

        let result = to_prevalence(series, &params(0.166), Tier::MidMod, &config).unwrap();
        let totals = result.get(&key(date(2020, 12, 21))).unwrap();
        assert!((totals.prevalence[SymptomCluster::Fatigue] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_at_and_after_year_end() {
        let config = PipelineConfig::default();
        let series = unit_incidence(&[date(2020, 12, 31), date(2021, 1, 15)]);

        let result = to_prevalence(series, &params(0.166), Tier::MidMod, &config).unwrap();
        let at_end = result.get(&key(date(2020, 12, 31))).unwrap();
        let past_end = result.get(&key(date(2021, 1, 15))).unwrap();
        assert_eq!(at_end.prevalence[SymptomCluster::Respiratory], 0.0);
        assert_eq!(past_end.prevalence[SymptomCluster::Respiratory], 0.0);
        // incidence itself is untouched by the clamp
        assert_eq!(past_end.incidence[SymptomCluster::Respiratory], 1.0);
    }
}
