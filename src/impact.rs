//! Environmental impact bands for per-person emissions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Impact classification of a trip's per-person emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Medium => "Médio",
            Self::High => "Alto",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One band: every value up to and including `max` (kg CO2 per person).
#[derive(Debug, Clone, Copy)]
pub struct ImpactBand {
    pub level: ImpactLevel,
    pub max: f64,
}

/// Ascending, contiguous and exhaustive over [0, ∞).
pub const IMPACT_BANDS: [ImpactBand; 3] = [
    ImpactBand { level: ImpactLevel::Low, max: 10.0 },
    ImpactBand { level: ImpactLevel::Medium, max: 50.0 },
    ImpactBand { level: ImpactLevel::High, max: f64::INFINITY },
];

/// Classify per-person emissions. First band whose inclusive upper bound
/// holds wins; anything left over (NaN) is high.
pub fn classify(per_person: f64) -> ImpactLevel {
    IMPACT_BANDS
        .iter()
        .find(|band| per_person <= band.max)
        .map(|band| band.level)
        .unwrap_or(ImpactLevel::High)
}

/// Level plus its label, as sent to presenters and API clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Impact {
    pub level: ImpactLevel,
    pub label: &'static str,
}

impl From<ImpactLevel> for Impact {
    fn from(level: ImpactLevel) -> Self {
        Self { level, label: level.label() }
    }
}
