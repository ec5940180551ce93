//! End-to-end orchestration of the long-duration outcomes pipeline.
//!
//! One location is processed through a linear sequence of stages with no
//! branching and no retries; any data error aborts that location's run
//! before anything is handed to the persistence layer. Locations are
//! independent and can be fanned out across rayon workers, sharing only the
//! read-only parameter, population, and configuration values.

use rayon::prelude::*;

use crate::algorithm::risk_pool::{self, AdmitRecord};
use crate::algorithm::{aggregate, decompose, prevalence};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::cluster::ClusterTotals;
use crate::models::parameters::ParameterTable;
use crate::models::population::PopulationTable;
use crate::models::series::TimeSeries;
use crate::models::tier::Tier;

pub use crate::algorithm::aggregate::LocationOutput;

/// Short-term outcome inputs for one location.
#[derive(Debug, Clone)]
pub struct TierInputs {
    /// Daily mild/moderate incidence
    pub midmod: TimeSeries<f64>,
    /// Daily hospital admissions and hospital deaths
    pub hospital: TimeSeries<AdmitRecord>,
    /// Daily ICU admissions and ICU deaths
    pub icu: TimeSeries<AdmitRecord>,
}

impl TierInputs {
    /// Fail closed on empty inputs rather than producing empty output as if
    /// it were valid.
    fn validate(&self) -> Result<()> {
        if self.midmod.is_empty() {
            return Err(Error::EmptyInput("midmod"));
        }
        if self.hospital.is_empty() {
            return Err(Error::EmptyInput("hospital"));
        }
        if self.icu.is_empty() {
            return Err(Error::EmptyInput("icu"));
        }
        Ok(())
    }
}

/// The long-duration outcomes pipeline, bound to its read-only reference
/// data and configuration.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    params: &'a ParameterTable,
    population: &'a PopulationTable,
    config: &'a PipelineConfig,
}

impl<'a> Pipeline<'a> {
    /// Bind a pipeline to its reference data.
    #[must_use]
    pub const fn new(
        params: &'a ParameterTable,
        population: &'a PopulationTable,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            params,
            population,
            config,
        }
    }

    /// Run one location end to end: at-risk derivation, decomposition, and
    /// prevalence per tier, then severity merge, annual collapse,
    /// negativity check, and rates.
    pub fn run(&self, inputs: TierInputs) -> Result<LocationOutput> {
        inputs.validate()?;
        log::debug!(
            "input rows: midmod {}, hospital {}, icu {}",
            inputs.midmod.len(),
            inputs.hospital.len(),
            inputs.icu.len()
        );

        let lags = &self.config.lags;

        log::info!("calculating mild/moderate incidence and prevalence");
        let midmod_risk = risk_pool::midmod_risk(inputs.midmod, &inputs.hospital, lags);
        let midmod = self.tier_track(midmod_risk, Tier::MidMod)?;

        log::info!("calculating severe incidence and prevalence");
        let hospital_risk = risk_pool::hospital_risk(inputs.hospital, &inputs.icu, lags);
        let hospital = self.tier_track(hospital_risk, Tier::Hospital)?;

        log::info!("calculating critical incidence and prevalence");
        let icu_risk = risk_pool::icu_risk(inputs.icu, lags);
        let icu = self.tier_track(icu_risk, Tier::Icu)?;

        log::info!("aggregating severities");
        let merged = aggregate::merge_tiers([midmod, hospital, icu]);

        log::info!("aggregating by year");
        let annual = aggregate::collapse_annual(merged, self.config);
        aggregate::check_non_negative(&annual)?;

        log::info!("calculating rates for {} annual rows", annual.len());
        aggregate::rates(annual, self.population, self.config)
    }

    /// Run many locations in parallel. The first error aborts the batch; no
    /// partially processed location produces output.
    pub fn run_many(&self, locations: Vec<TierInputs>) -> Result<Vec<LocationOutput>> {
        locations
            .into_par_iter()
            .map(|inputs| self.run(inputs))
            .collect()
    }

    /// The per-tier track: raw overlapping incidence, mutually exclusive
    /// decomposition, then duration-bounded prevalence.
    fn tier_track(
        &self,
        at_risk: TimeSeries<f64>,
        tier: Tier,
    ) -> Result<TimeSeries<ClusterTotals>> {
        let raw = decompose::raw_incidence(at_risk, self.params, tier)?;
        let exclusive = decompose::decompose(raw);
        prevalence::to_prevalence(exclusive, self.params, tier, self.config)
    }
}
