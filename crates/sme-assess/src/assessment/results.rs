use super::catalog::ScenarioCatalog;
use super::controls::{score_sections, SectionScore};
use super::intake::{intake_summary, IntakeSummary, ProfileTag};
use super::plan::{build_plan, ActionPlan, PlanInputs, ScenarioFeedback};
use super::scoring::{aggregate_domains, DomainScoreboard, ScoringConfig};
use super::session::AssessmentSession;
use std::collections::BTreeSet;

/// Everything derived from a session: nothing here is stored.
#[derive(Debug, Clone)]
pub struct AssessmentResults {
    pub tags: BTreeSet<ProfileTag>,
    pub summary: IntakeSummary,
    pub scoreboard: DomainScoreboard,
    pub sections: Vec<SectionScore>,
    pub feedback: ScenarioFeedback,
    pub plan: ActionPlan,
}

impl AssessmentResults {
    pub fn compute(
        session: &AssessmentSession,
        catalog: &ScenarioCatalog,
        config: &ScoringConfig,
    ) -> Self {
        let tags = session.profile().tags();
        let answers = session.answers();
        let summary = intake_summary(answers);
        let scoreboard = aggregate_domains(catalog, session.responses(), config);
        let sections = score_sections(&tags, &answers.controls);
        let feedback = ScenarioFeedback::from_outcomes(&scoreboard.outcomes);
        let plan = build_plan(&PlanInputs {
            tags: &tags,
            practices: &answers.practices,
            sections: &sections,
            feedback: &feedback,
        });

        Self {
            tags,
            summary,
            scoreboard,
            sections,
            feedback,
            plan,
        }
    }

    pub fn strengths(&self) -> &[&'static str] {
        &self.feedback.strengths
    }

    pub fn fixes(&self) -> Vec<&'static str> {
        self.feedback.fixes()
    }
}
