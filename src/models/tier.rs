//! Severity strata of the acute illness.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity tier of the acute disease course.
///
/// Each tier is processed through the same lag, at-risk, decomposition, and
/// prevalence stages with tier-specific lag constants and parameters, then
/// the three results are summed into population-level totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Mild/moderate acute illness, never hospitalized
    #[serde(rename = "midmod")]
    MidMod,
    /// Hospitalized without ICU admission
    #[serde(rename = "hospital")]
    Hospital,
    /// Admitted to intensive care
    #[serde(rename = "icu")]
    Icu,
}

impl Tier {
    /// All tiers, mildest first.
    pub const ALL: [Self; 3] = [Self::MidMod, Self::Hospital, Self::Icu];

    /// Stable label matching the upstream parameter files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MidMod => "midmod",
            Self::Hospital => "hospital",
            Self::Icu => "icu",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
