mod feedback;
mod rules;

pub use feedback::ScenarioFeedback;

use super::controls::{BaselinePractices, ControlSection, SectionScore};
use super::intake::ProfileTag;
use serde::Serialize;
use std::collections::BTreeSet;

pub const NO_QUICK_WINS: &str = "No urgent quick wins detected.";

/// Prioritised recommendations in three tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionPlan {
    pub quick_wins: Vec<&'static str>,
    pub foundations: Vec<&'static str>,
    pub next_level: Vec<&'static str>,
}

pub struct PlanInputs<'a> {
    pub tags: &'a BTreeSet<ProfileTag>,
    pub practices: &'a BaselinePractices,
    pub sections: &'a [SectionScore],
    pub feedback: &'a ScenarioFeedback,
}

pub fn build_plan(inputs: &PlanInputs<'_>) -> ActionPlan {
    let mut plan = ActionPlan::default();

    if let Some(governance) = inputs
        .sections
        .iter()
        .find(|section| section.section == ControlSection::Governance)
    {
        let output = rules::governance_rules(governance.score, inputs.tags);
        extend_unique(&mut plan.quick_wins, output.quick_wins);
        extend_unique(&mut plan.foundations, output.foundations);
        extend_unique(&mut plan.next_level, output.next_level);
    }

    extend_unique(&mut plan.quick_wins, rules::baseline_hooks(inputs.practices));
    extend_unique(&mut plan.quick_wins, inputs.feedback.risky_fixes.clone());

    let hooks = rules::tag_hooks(inputs.tags);
    extend_unique(&mut plan.foundations, hooks.foundations);
    extend_unique(&mut plan.foundations, inputs.feedback.gap_fixes.clone());
    extend_unique(&mut plan.next_level, hooks.next_level);

    if plan.quick_wins.is_empty() {
        plan.quick_wins.push(NO_QUICK_WINS);
    }
    plan
}

pub(crate) fn push_unique(list: &mut Vec<&'static str>, item: &'static str) {
    if !list.contains(&item) {
        list.push(item);
    }
}

fn extend_unique(list: &mut Vec<&'static str>, items: Vec<&'static str>) {
    for item in items {
        push_unique(list, item);
    }
}
