use super::super::domain::{Domain, OptionTag, Scenario, ScenarioId, ScenarioResponse};
use super::config::ScoringConfig;
use super::selection::score_selection;
use serde::Serialize;

/// Score credited to one domain by one scenario, calibration included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainContribution {
    pub domain: Domain,
    pub value: f64,
}

/// Evaluation of a single scenario response, also used as its debrief.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub scenario_id: ScenarioId,
    pub cues_score: f64,
    pub actions_score: f64,
    pub base: f64,
    pub calibration: f64,
    pub contributions: Vec<DomainContribution>,
    pub good_actions: Vec<&'static str>,
    pub risky_actions: Vec<&'static str>,
    pub missed_cues: Vec<&'static str>,
    pub hint_fix: &'static str,
    pub selected_tags: Vec<OptionTag>,
}

impl ScenarioOutcome {
    pub fn contribution(&self, domain: Domain) -> Option<f64> {
        self.contributions
            .iter()
            .find(|entry| entry.domain == domain)
            .map(|entry| entry.value)
    }

    pub fn has_tag(&self, tag: OptionTag) -> bool {
        self.selected_tags.contains(&tag)
    }

    pub fn debrief(&self) -> ScenarioDebrief {
        ScenarioDebrief {
            scenario_id: self.scenario_id,
            cues_score: round_tenth(self.cues_score),
            actions_score: round_tenth(self.actions_score),
            combined: round_tenth(self.base),
            good_moves: self.good_actions.clone(),
            risky_choices: self.risky_actions.clone(),
            missed_cues: self.missed_cues.clone(),
            hint: self.hint_fix,
        }
    }
}

/// Display form of an outcome with scores rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioDebrief {
    pub scenario_id: ScenarioId,
    pub cues_score: f64,
    pub actions_score: f64,
    pub combined: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub good_moves: Vec<&'static str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risky_choices: Vec<&'static str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missed_cues: Vec<&'static str>,
    pub hint: &'static str,
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn evaluate_scenario(
    scenario: &Scenario,
    response: &ScenarioResponse,
    config: &ScoringConfig,
) -> ScenarioOutcome {
    let cues_score = score_selection(
        &scenario.cues.options,
        &response.selected_cues,
        scenario.cues.max_select,
    );
    let actions_score = score_selection(
        &scenario.actions.options,
        &response.selected_actions,
        scenario.actions.max_select,
    );
    let base = (cues_score + actions_score) / 2.0;

    let calibration_domain = config.calibration.domain;
    let calibration = if scenario.proportion_for(calibration_domain).is_some() {
        config.calibration.delta_for(base, response.confidence)
    } else {
        0.0
    };

    let contributions = scenario
        .domain_map
        .iter()
        .map(|weight| {
            let mut value = base * weight.proportion;
            if weight.domain == calibration_domain {
                value += calibration;
            }
            DomainContribution {
                domain: weight.domain,
                value,
            }
        })
        .collect();

    let mut good_actions = Vec::new();
    let mut risky_actions = Vec::new();
    let mut selected_tags = Vec::new();
    for option in scenario.actions.selected(&response.selected_actions) {
        if option.is_positive() {
            good_actions.push(option.text);
        } else {
            risky_actions.push(option.text);
        }
        selected_tags.push(option.tag);
    }

    let missed_cues = scenario
        .cues
        .options
        .iter()
        .filter(|option| option.is_positive())
        .filter(|option| !response.selected_cues.iter().any(|text| text == option.text))
        .take(config.missed_cue_limit)
        .map(|option| option.text)
        .collect();

    ScenarioOutcome {
        scenario_id: scenario.id,
        cues_score,
        actions_score,
        base,
        calibration,
        contributions,
        good_actions,
        risky_actions,
        missed_cues,
        hint_fix: scenario.hint_fix,
        selected_tags,
    }
}
