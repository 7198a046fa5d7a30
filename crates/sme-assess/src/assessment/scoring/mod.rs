mod aggregate;
mod config;
mod scenario;
mod selection;

pub use aggregate::{aggregate_domains, overall_score, DomainScore, DomainScoreboard, OverallScore};
pub use config::{
    CalibrationPolicy, ScoringConfig, TierThresholds, UnknownPolicy, UnmappedDomainPolicy,
};
pub use scenario::{evaluate_scenario, DomainContribution, ScenarioDebrief, ScenarioOutcome};
pub use selection::{best_achievable, score_selection};
