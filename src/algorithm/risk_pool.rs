//! At-risk population derivation per severity tier.
//!
//! A tier's at-risk count is its acute incidence minus everyone who
//! escalated to a more severe tier or died, each observed a tier-specific
//! number of days later. The result is then shifted onto the date the
//! long-duration symptom window opens, so downstream rows are indexed by
//! symptom-onset date rather than acute-event date.
//!
//! Raw at-risk values can dip below zero from date-misalignment noise in the
//! upstream draws; that is tolerated here and surfaced after the annual
//! collapse.

use crate::config::LagConfig;
use crate::models::series::TimeSeries;

/// Acute admissions and deaths for the hospital and ICU tiers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdmitRecord {
    /// Daily admission incidence
    pub admissions: f64,
    /// Daily deaths attributable to this tier
    pub deaths: f64,
}

/// Mild/moderate at-risk count: incidence minus hospital admissions observed
/// `symp_to_hsp_admit` days later, indexed by symptom-onset date.
pub fn midmod_risk(
    midmod: TimeSeries<f64>,
    hospital: &TimeSeries<AdmitRecord>,
    lags: &LagConfig,
) -> TimeSeries<f64> {
    let admissions = hospital
        .clone()
        .map(|_, r| r.admissions)
        .shift(lags.symp_to_hsp_admit);

    midmod
        .left_join(&admissions)
        .map(|_, (incidence, admitted)| incidence - admitted.unwrap_or(0.0))
        .shift(lags.midmod_onset_shift())
}

/// Hospital at-risk count: admissions minus ICU escalations observed
/// `hsp_to_icu_admit` days later and deaths observed `hsp_no_icu_death` days
/// later, indexed by symptom-onset date.
pub fn hospital_risk(
    hospital: TimeSeries<AdmitRecord>,
    icu: &TimeSeries<AdmitRecord>,
    lags: &LagConfig,
) -> TimeSeries<f64> {
    let escalations = icu
        .clone()
        .map(|_, r| r.admissions)
        .shift(lags.hsp_to_icu_admit);
    let deaths = hospital
        .clone()
        .map(|_, r| r.deaths)
        .shift(lags.hsp_no_icu_death);

    hospital
        .map(|_, r| r.admissions)
        .left_join(&escalations)
        .left_join(&deaths)
        .map(|_, ((admissions, escalated), died)| {
            admissions - escalated.unwrap_or(0.0) - died.unwrap_or(0.0)
        })
        .shift(lags.hospital_onset_shift())
}

/// ICU at-risk count: admissions minus ICU deaths observed `icu_to_death`
/// days later. The onset shift runs backward for this tier: the death-lag
/// join already advanced the date, and the discharge clock is subtracted
/// from it rather than added.
pub fn icu_risk(icu: TimeSeries<AdmitRecord>, lags: &LagConfig) -> TimeSeries<f64> {
    let deaths = icu.clone().map(|_, r| r.deaths).shift(lags.icu_to_death);

    icu.map(|_, r| r.admissions)
        .left_join(&deaths)
        .map(|_, (admissions, died)| admissions - died.unwrap_or(0.0))
        .shift(-lags.icu_onset_shift())
}
