use super::super::catalog::ScenarioCatalog;
use super::super::domain::{Domain, ScenarioId, ScenarioResponse, Tier};
use super::config::{ScoringConfig, UnmappedDomainPolicy};
use super::scenario::{evaluate_scenario, ScenarioOutcome};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainScore {
    pub domain: Domain,
    pub percent: u8,
    pub tier: Tier,
    pub earned: f64,
    pub possible: f64,
}

impl DomainScore {
    pub fn is_mapped(&self) -> bool {
        self.possible > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallScore {
    pub percent: u8,
    pub tier: Tier,
}

/// Per-domain percentages in `Domain::ordered()` order plus the overall
/// posture, and the outcomes of every answered scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainScoreboard {
    pub scores: Vec<DomainScore>,
    pub overall: OverallScore,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl DomainScoreboard {
    pub fn score(&self, domain: Domain) -> Option<&DomainScore> {
        self.scores.iter().find(|score| score.domain == domain)
    }
}

/// Aggregates answered scenarios into domain percentages.
///
/// The denominator counts every catalog scenario whether or not it was
/// answered, so a partial run is measured on the same scale as a full one.
/// Negative contributions are floored per scenario before summing.
pub fn aggregate_domains(
    catalog: &ScenarioCatalog,
    responses: &BTreeMap<ScenarioId, ScenarioResponse>,
    config: &ScoringConfig,
) -> DomainScoreboard {
    let mut possible: BTreeMap<Domain, f64> = BTreeMap::new();
    let mut earned: BTreeMap<Domain, f64> = BTreeMap::new();
    let mut outcomes = Vec::new();

    for scenario in catalog.scenarios() {
        for weight in &scenario.domain_map {
            *possible.entry(weight.domain).or_insert(0.0) += 100.0 * weight.proportion;
        }

        let Some(response) = responses.get(&scenario.id) else {
            continue;
        };

        let outcome = evaluate_scenario(scenario, response, config);
        for contribution in &outcome.contributions {
            *earned.entry(contribution.domain).or_insert(0.0) += contribution.value.max(0.0);
        }
        outcomes.push(outcome);
    }

    let scores: Vec<DomainScore> = Domain::ordered()
        .into_iter()
        .map(|domain| {
            let possible = possible.get(&domain).copied().unwrap_or(0.0);
            let earned = earned.get(&domain).copied().unwrap_or(0.0);
            let raw = if possible > 0.0 {
                (earned / possible * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };
            DomainScore {
                domain,
                percent: raw.round_ties_even() as u8,
                tier: config.tiers.classify(raw),
                earned,
                possible,
            }
        })
        .collect();

    let overall = overall_score(&scores, config);

    DomainScoreboard {
        scores,
        overall,
        outcomes,
    }
}

/// Mean of the domain percentages, following the configured treatment of
/// domains that no scenario maps to.
pub fn overall_score(scores: &[DomainScore], config: &ScoringConfig) -> OverallScore {
    let counted: Vec<f64> = scores
        .iter()
        .filter(|score| match config.unmapped_domains {
            UnmappedDomainPolicy::CountAsZero => true,
            UnmappedDomainPolicy::Exclude => score.is_mapped(),
        })
        .map(|score| f64::from(score.percent))
        .collect();

    if counted.is_empty() {
        return OverallScore {
            percent: 0,
            tier: Tier::AtRisk,
        };
    }

    let mean = (counted.iter().sum::<f64>() / counted.len() as f64).clamp(0.0, 100.0);
    OverallScore {
        percent: mean.round_ties_even() as u8,
        tier: config.tiers.classify(mean),
    }
}
