//! Symptom-cluster taxonomy for long-duration outcomes.
//!
//! The seven output categories are every non-empty combination of the three
//! long-duration symptoms. Each variant carries its membership set as a
//! bitmask, so the inclusion-exclusion decomposition can be derived from the
//! membership structure instead of hand-written per-combination arithmetic,
//! and the taxonomy extends if the symptom count ever changes.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// A single long-duration symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symptom {
    /// Cognitive impairment ("brain fog")
    Cognitive,
    /// Post-exertional fatigue
    Fatigue,
    /// Respiratory symptoms
    Respiratory,
}

impl Symptom {
    /// All symptoms, in taxonomy order.
    pub const ALL: [Self; 3] = [Self::Cognitive, Self::Fatigue, Self::Respiratory];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// One of the seven symptom combinations.
///
/// Depending on the stage, a cluster's value is either raw (everyone with at
/// least these symptoms, overlapping with other clusters) or exclusive
/// (everyone with exactly these symptoms); see `algorithm::decompose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCluster {
    /// Cognitive only
    Cognitive,
    /// Fatigue only
    Fatigue,
    /// Respiratory only
    Respiratory,
    /// Cognitive and fatigue
    CognitiveFatigue,
    /// Cognitive and respiratory
    CognitiveRespiratory,
    /// Fatigue and respiratory
    FatigueRespiratory,
    /// All three symptoms
    CognitiveFatigueRespiratory,
}

impl SymptomCluster {
    /// Number of clusters.
    pub const COUNT: usize = 7;

    /// All clusters: singles first, then pairs, then the triple.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Cognitive,
        Self::Fatigue,
        Self::Respiratory,
        Self::CognitiveFatigue,
        Self::CognitiveRespiratory,
        Self::FatigueRespiratory,
        Self::CognitiveFatigueRespiratory,
    ];

    /// Membership bitmask, one bit per symptom.
    const fn mask(self) -> u8 {
        match self {
            Self::Cognitive => 0b001,
            Self::Fatigue => 0b010,
            Self::Respiratory => 0b100,
            Self::CognitiveFatigue => 0b011,
            Self::CognitiveRespiratory => 0b101,
            Self::FatigueRespiratory => 0b110,
            Self::CognitiveFatigueRespiratory => 0b111,
        }
    }

    /// The member symptoms of this cluster.
    pub fn members(self) -> impl Iterator<Item = Symptom> {
        Symptom::ALL
            .into_iter()
            .filter(move |s| self.mask() & s.bit() != 0)
    }

    /// Number of member symptoms (1 for singles, 2 for pairs, 3 for the triple).
    #[must_use]
    pub const fn arity(self) -> u32 {
        self.mask().count_ones()
    }

    /// Whether this cluster's membership includes all of `other`'s.
    #[must_use]
    pub const fn is_superset_of(self, other: Self) -> bool {
        self.mask() & other.mask() == other.mask()
    }

    /// Stable label matching the upstream parameter files and output names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cognitive => "cognitive",
            Self::Fatigue => "fatigue",
            Self::Respiratory => "respiratory",
            Self::CognitiveFatigue => "cognitive_fatigue",
            Self::CognitiveRespiratory => "cognitive_respiratory",
            Self::FatigueRespiratory => "fatigue_respiratory",
            Self::CognitiveFatigueRespiratory => "cognitive_fatigue_respiratory",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SymptomCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per symptom cluster; the per-row payload for raw incidence,
/// exclusive incidence, and prevalence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClusterVector([f64; SymptomCluster::COUNT]);

impl ClusterVector {
    /// Build a vector by evaluating `f` for every cluster.
    pub fn from_fn(mut f: impl FnMut(SymptomCluster) -> f64) -> Self {
        let mut values = [0.0; SymptomCluster::COUNT];
        for cluster in SymptomCluster::ALL {
            values[cluster.index()] = f(cluster);
        }
        Self(values)
    }

    /// Iterate over (cluster, value) pairs in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (SymptomCluster, f64)> + '_ {
        SymptomCluster::ALL.into_iter().map(|c| (c, self[c]))
    }

    /// Sum of all seven values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Element-wise accumulation.
    pub fn add_assign(&mut self, other: &Self) {
        for cluster in SymptomCluster::ALL {
            self[cluster] += other[cluster];
        }
    }

    /// Element-wise scaling.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_fn(|c| self[c] * factor)
    }
}

impl Index<SymptomCluster> for ClusterVector {
    type Output = f64;

    fn index(&self, cluster: SymptomCluster) -> &f64 {
        &self.0[cluster.index()]
    }
}

impl IndexMut<SymptomCluster> for ClusterVector {
    fn index_mut(&mut self, cluster: SymptomCluster) -> &mut f64 {
        &mut self.0[cluster.index()]
    }
}

/// The 14 merged measures: incidence and prevalence per cluster.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClusterTotals {
    /// Exclusive incidence per cluster
    pub incidence: ClusterVector,
    /// Prevalence per cluster
    pub prevalence: ClusterVector,
}

impl ClusterTotals {
    /// Element-wise accumulation of both measure vectors.
    pub fn add_assign(&mut self, other: &Self) {
        self.incidence.add_assign(&other.incidence);
        self.prevalence.add_assign(&other.prevalence);
    }
}
