//! Overlap decomposition: raw, co-occurring symptom-cluster incidence into
//! seven mutually exclusive categories.
//!
//! Raw incidence for a cluster counts everyone with *at least* its member
//! symptoms, so the seven raw columns overlap (the "cognitive" column
//! includes people who also have fatigue). The exclusive count for a cluster
//! is the alternating sum of the raw counts of its supersets in the
//! membership lattice, which for the 3-single/3-pair/1-triple structure
//! reproduces the familiar pairwise/triple subtraction arithmetic. All seven
//! raw values are read-only while the seven exclusive values are emitted, so
//! no raw value is overwritten before a later calculation consumes it.

use crate::error::Result;
use crate::models::cluster::{ClusterVector, SymptomCluster};
use crate::models::parameters::ParameterTable;
use crate::models::series::TimeSeries;
use crate::models::tier::Tier;

/// Raw (overlapping) incidence: the at-risk count times each cluster's
/// proportion. Proportions are looked up once per tier; a missing
/// (tier, cluster) pair aborts before any arithmetic.
pub fn raw_incidence(
    at_risk: TimeSeries<f64>,
    params: &ParameterTable,
    tier: Tier,
) -> Result<TimeSeries<ClusterVector>> {
    let mut proportions = ClusterVector::default();
    for cluster in SymptomCluster::ALL {
        proportions[cluster] = params.get(tier, cluster)?.proportion_mean;
    }

    Ok(at_risk.map(|_, count| proportions.scaled(count)))
}

/// Exclusive counts from raw counts by inclusion-exclusion over the
/// membership lattice: `exclusive(c) = Σ over supersets s of c of
/// (-1)^(|s|-|c|) · raw(s)`.
#[must_use]
pub fn exclusive_counts(raw: &ClusterVector) -> ClusterVector {
    ClusterVector::from_fn(|cluster| {
        SymptomCluster::ALL
            .into_iter()
            .filter(|s| s.is_superset_of(cluster))
            .map(|s| {
                let term = raw[s];
                if (s.arity() - cluster.arity()) % 2 == 0 {
                    term
                } else {
                    -term
                }
            })
            .sum()
    })
}

/// Decompose a whole series of raw incidence vectors.
#[must_use]
pub fn decompose(raw: TimeSeries<ClusterVector>) -> TimeSeries<ClusterVector> {
    raw.map(|_, values| exclusive_counts(&values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::SymptomCluster::{
        Cognitive, CognitiveFatigue, CognitiveFatigueRespiratory, CognitiveRespiratory, Fatigue,
        FatigueRespiratory, Respiratory,
    };

    fn raw_vector() -> ClusterVector {
        let mut raw = ClusterVector::default();
        raw[Cognitive] = 30.0;
        raw[Fatigue] = 24.0;
        raw[Respiratory] = 18.0;
        raw[CognitiveFatigue] = 9.0;
        raw[CognitiveRespiratory] = 7.0;
        raw[FatigueRespiratory] = 5.0;
        raw[CognitiveFatigueRespiratory] = 2.0;
        raw
    }

    #[test]
    fn test_matches_hand_written_formulas() {
        let raw = raw_vector();
        let exclusive = exclusive_counts(&raw);

        // single: raw - (pairA - triple) - (pairB - triple) - triple
        let expected_cog = 30.0 - (9.0 - 2.0) - (7.0 - 2.0) - 2.0;
        let expected_fat = 24.0 - (9.0 - 2.0) - (5.0 - 2.0) - 2.0;
        let expected_resp = 18.0 - (5.0 - 2.0) - (7.0 - 2.0) - 2.0;
        assert!((exclusive[Cognitive] - expected_cog).abs() < 1e-12);
        assert!((exclusive[Fatigue] - expected_fat).abs() < 1e-12);
        assert!((exclusive[Respiratory] - expected_resp).abs() < 1e-12);

        // pair: raw - triple
        assert!((exclusive[CognitiveFatigue] - 7.0).abs() < 1e-12);
        assert!((exclusive[CognitiveRespiratory] - 5.0).abs() < 1e-12);
        assert!((exclusive[FatigueRespiratory] - 3.0).abs() < 1e-12);

        // triple already exclusive by construction
        assert!((exclusive[CognitiveFatigueRespiratory] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_conserves_union_population() {
        // sum of exclusives equals the inclusion-exclusion count of people
        // with at least one symptom: singles - pairs + triple of the raws
        let raw = raw_vector();
        let exclusive = exclusive_counts(&raw);

        let union = (30.0 + 24.0 + 18.0) - (9.0 + 7.0 + 5.0) + 2.0;
        assert!((exclusive.total() - union).abs() < 1e-9);
    }

    #[test]
    fn test_zero_overlap_leaves_singles_untouched() {
        let mut raw = ClusterVector::default();
        raw[Cognitive] = 0.5;
        raw[Fatigue] = 0.25;
        raw[Respiratory] = 0.125;

        let exclusive = exclusive_counts(&raw);
        assert_eq!(exclusive, raw);
    }
}
