use super::super::domain::{Domain, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rubric for turning scenario responses into domain percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub calibration: CalibrationPolicy,
    pub tiers: TierThresholds,
    pub missed_cue_limit: usize,
    pub unmapped_domains: UnmappedDomainPolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            calibration: CalibrationPolicy::default(),
            tiers: TierThresholds::default(),
            missed_cue_limit: 2,
            unmapped_domains: UnmappedDomainPolicy::default(),
        }
    }
}

/// Confidence calibration: overconfidence on a weak answer costs points,
/// confidence on a strong answer earns them. Only `domain` is adjusted and
/// only when the scenario maps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationPolicy {
    pub domain: Domain,
    pub confidence_threshold: u8,
    pub penalty_below: f64,
    pub reward_from: f64,
    pub delta: f64,
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self {
            domain: Domain::EmailAndAwareness,
            confidence_threshold: 70,
            penalty_below: 40.0,
            reward_from: 60.0,
            delta: 5.0,
        }
    }
}

impl CalibrationPolicy {
    pub fn delta_for(&self, base: f64, confidence: u8) -> f64 {
        if confidence < self.confidence_threshold {
            return 0.0;
        }
        if base < self.penalty_below {
            -self.delta
        } else if base >= self.reward_from {
            self.delta
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub good: f64,
    pub needs_work: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            good: 75.0,
            needs_work: 40.0,
        }
    }
}

impl TierThresholds {
    pub fn classify(&self, percent: f64) -> Tier {
        if percent >= self.good {
            Tier::Good
        } else if percent >= self.needs_work {
            Tier::NeedsWork
        } else {
            Tier::AtRisk
        }
    }
}

/// How domains that no scenario maps to enter the overall average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedDomainPolicy {
    #[default]
    CountAsZero,
    Exclude,
}

impl FromStr for UnmappedDomainPolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "count_as_zero" | "zero" | "include" => Ok(Self::CountAsZero),
            "exclude" | "skip" => Ok(Self::Exclude),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown unmapped-domain policy '{}'", self.0)
    }
}

impl std::error::Error for UnknownPolicy {}
