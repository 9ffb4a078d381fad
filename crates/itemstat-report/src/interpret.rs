//! Interpretation bands for display.
//!
//! These thresholds are presentation policy. The engine's numbers never
//! depend on them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reliability band for Cronbach's alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityBand {
    Excellent,
    Good,
    Acceptable,
    Questionable,
    Poor,
}

/// Difficulty band for an item's mean response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBand {
    Easy,
    Moderate,
    Hard,
}

/// Discrimination band for an item's point-biserial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscriminationBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for ReliabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReliabilityBand::Excellent => write!(f, "Excellent"),
            ReliabilityBand::Good => write!(f, "Good"),
            ReliabilityBand::Acceptable => write!(f, "Acceptable"),
            ReliabilityBand::Questionable => write!(f, "Questionable"),
            ReliabilityBand::Poor => write!(f, "Poor"),
        }
    }
}

impl fmt::Display for DifficultyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyBand::Easy => write!(f, "Easy"),
            DifficultyBand::Moderate => write!(f, "Moderate"),
            DifficultyBand::Hard => write!(f, "Hard"),
        }
    }
}

impl fmt::Display for DiscriminationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscriminationBand::Excellent => write!(f, "Excellent"),
            DiscriminationBand::Good => write!(f, "Good"),
            DiscriminationBand::Fair => write!(f, "Fair"),
            DiscriminationBand::Poor => write!(f, "Poor"),
        }
    }
}

impl ReliabilityBand {
    /// CSS class used by the HTML report.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReliabilityBand::Excellent | ReliabilityBand::Good => "pass",
            ReliabilityBand::Acceptable => "warn",
            ReliabilityBand::Questionable | ReliabilityBand::Poor => "fail",
        }
    }
}

impl DiscriminationBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            DiscriminationBand::Excellent | DiscriminationBand::Good => "pass",
            DiscriminationBand::Fair => "warn",
            DiscriminationBand::Poor => "fail",
        }
    }
}

/// Lower bounds for each reliability band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityThresholds {
    pub excellent: f64,
    pub good: f64,
    pub acceptable: f64,
    pub questionable: f64,
}

impl Default for ReliabilityThresholds {
    fn default() -> Self {
        Self {
            excellent: 0.9,
            good: 0.8,
            acceptable: 0.7,
            questionable: 0.6,
        }
    }
}

/// Lower bounds for each difficulty band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyThresholds {
    pub easy: f64,
    pub moderate: f64,
}

impl Default for DifficultyThresholds {
    fn default() -> Self {
        Self {
            easy: 0.8,
            moderate: 0.4,
        }
    }
}

/// Lower bounds for each discrimination band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscriminationThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for DiscriminationThresholds {
    fn default() -> Self {
        Self {
            excellent: 0.4,
            good: 0.3,
            fair: 0.2,
        }
    }
}

/// All band thresholds, as loaded from the `[bands]` config table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    pub reliability: ReliabilityThresholds,
    pub difficulty: DifficultyThresholds,
    pub discrimination: DiscriminationThresholds,
}

impl BandThresholds {
    pub fn reliability(&self, alpha: f64) -> ReliabilityBand {
        let t = &self.reliability;
        if alpha >= t.excellent {
            ReliabilityBand::Excellent
        } else if alpha >= t.good {
            ReliabilityBand::Good
        } else if alpha >= t.acceptable {
            ReliabilityBand::Acceptable
        } else if alpha >= t.questionable {
            ReliabilityBand::Questionable
        } else {
            ReliabilityBand::Poor
        }
    }

    pub fn difficulty(&self, difficulty: f64) -> DifficultyBand {
        let t = &self.difficulty;
        if difficulty >= t.easy {
            DifficultyBand::Easy
        } else if difficulty >= t.moderate {
            DifficultyBand::Moderate
        } else {
            DifficultyBand::Hard
        }
    }

    pub fn discrimination(&self, discrimination: f64) -> DiscriminationBand {
        let t = &self.discrimination;
        if discrimination >= t.excellent {
            DiscriminationBand::Excellent
        } else if discrimination >= t.good {
            DiscriminationBand::Good
        } else if discrimination >= t.fair {
            DiscriminationBand::Fair
        } else {
            DiscriminationBand::Poor
        }
    }
}
