//! Pipeline configuration constants.
//!
//! Lag offsets and reference-year boundaries are constructed once at startup
//! and threaded through every stage as an explicit parameter. Defaults match
//! the values used by the upstream short-term outcome estimation.

use chrono::NaiveDate;
use serde::Deserialize;

/// Whole-day lag offsets between acute events along the disease course.
///
/// Each offset is the number of days between the event that opens a severity
/// tier (symptom onset, hospital admission, ICU admission) and a later event
/// recorded in a different input series (escalation, death, discharge).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LagConfig {
    /// Days from symptom onset to hospital admission
    pub symp_to_hsp_admit: i64,
    /// Days from hospital admission to ICU admission
    pub hsp_to_icu_admit: i64,
    /// Days from hospital admission to death (no ICU stay)
    pub hsp_no_icu_death: i64,
    /// Days from ICU admission to death
    pub icu_to_death: i64,
    /// Days from infection to symptom onset
    pub incubation_period: i64,
    /// Days of acute mild/moderate illness when never hospitalized
    pub midmod_duration_no_hsp: i64,
    /// Days of hospital stay with neither ICU admission nor death
    pub hsp_no_icu_no_death: i64,
    /// Days of residual mild/moderate illness after hospital discharge
    pub hsp_midmod_after_discharge: i64,
    /// Days of ICU stay when the patient survives
    pub icu_no_death: i64,
    /// Days of residual mild/moderate illness after ICU discharge
    pub icu_midmod_after_discharge: i64,
}

impl Default for LagConfig {
    fn default() -> Self {
        Self {
            symp_to_hsp_admit: 7,
            hsp_to_icu_admit: 3,
            hsp_no_icu_death: 6,
            icu_to_death: 3,
            incubation_period: 6,
            midmod_duration_no_hsp: 14,
            hsp_no_icu_no_death: 11,
            hsp_midmod_after_discharge: 14,
            icu_no_death: 9,
            icu_midmod_after_discharge: 14,
        }
    }
}

impl LagConfig {
    /// Days from infection to the opening of the mild/moderate
    /// long-duration symptom window.
    #[must_use]
    pub const fn midmod_onset_shift(&self) -> i64 {
        self.incubation_period + self.midmod_duration_no_hsp
    }

    /// Days from hospital admission to the opening of the hospital tier's
    /// long-duration symptom window (survivors without ICU stay).
    #[must_use]
    pub const fn hospital_onset_shift(&self) -> i64 {
        self.hsp_no_icu_no_death + self.hsp_midmod_after_discharge
    }

    /// Days between ICU admission and the opening of the ICU tier's
    /// long-duration symptom window. Applied backward: the death-lag join
    /// already advanced this tier's dates.
    #[must_use]
    pub const fn icu_onset_shift(&self) -> i64 {
        self.icu_no_death + self.icu_midmod_after_discharge
    }
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Calendar year the annual estimates describe
    pub reference_year: i32,
    /// Disease-course lag offsets
    pub lags: LagConfig,
    /// Placeholder disability weight applied to prevalence rates until the
    /// final weights are published upstream
    pub disability_weight: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reference_year: 2020,
            lags: LagConfig::default(),
            disability_weight: 0.01,
        }
    }
}

impl PipelineConfig {
    /// January 1 of the reference year.
    #[must_use]
    pub fn year_start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.reference_year, 1, 1).unwrap()
    }

    /// December 31 of the reference year.
    #[must_use]
    pub fn year_end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.reference_year, 12, 31).unwrap()
    }

    /// Number of days in the reference year (366 for 2020).
    #[must_use]
    pub fn days_in_year(&self) -> i64 {
        (self.year_end() - self.year_start()).num_days() + 1
    }
}
