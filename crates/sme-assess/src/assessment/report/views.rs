use super::super::controls::{ControlLevel, ControlSection, SectionScore};
use super::super::domain::{Domain, ScenarioId, Tier};
use super::super::intake::{BusinessProfile, IntakeSummary, InitialAnswers};
use super::super::plan::ActionPlan;
use super::super::results::AssessmentResults;
use super::super::scoring::{DomainScore, OverallScore, ScenarioDebrief};
use super::super::session::{AssessmentSession, ScenarioAnswer};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct DomainScoreView {
    pub domain: Domain,
    pub domain_label: &'static str,
    pub score: u8,
    pub tier: Tier,
    pub label: &'static str,
    pub colour: &'static str,
}

impl From<&DomainScore> for DomainScoreView {
    fn from(score: &DomainScore) -> Self {
        Self {
            domain: score.domain,
            domain_label: score.domain.label(),
            score: score.percent,
            tier: score.tier,
            label: score.tier.label(),
            colour: score.tier.colour(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallView {
    pub score: u8,
    pub tier: Tier,
    pub label: &'static str,
    pub colour: &'static str,
}

impl From<OverallScore> for OverallView {
    fn from(overall: OverallScore) -> Self {
        Self {
            score: overall.percent,
            tier: overall.tier,
            label: overall.tier.label(),
            colour: overall.tier.colour(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionScoreView {
    pub section: ControlSection,
    pub section_label: &'static str,
    pub score: f64,
    pub level: ControlLevel,
    pub level_label: &'static str,
}

impl From<&SectionScore> for SectionScoreView {
    fn from(score: &SectionScore) -> Self {
        Self {
            section: score.section,
            section_label: score.section.label(),
            score: score.score,
            level: score.level,
            level_label: score.level.label(),
        }
    }
}

/// Results payload served to clients once scoring has run.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub overall: OverallView,
    pub domain_scores: Vec<DomainScoreView>,
    pub control_sections: Vec<SectionScoreView>,
    pub debriefs: Vec<ScenarioDebrief>,
    pub strengths: Vec<&'static str>,
    pub fixes: Vec<&'static str>,
    pub plan: ActionPlan,
    pub summary: IntakeSummary,
    pub profile_tags: Vec<String>,
}

impl ResultsView {
    pub fn from_results(results: &AssessmentResults) -> Self {
        Self {
            overall: results.scoreboard.overall.into(),
            domain_scores: domain_views(results),
            control_sections: results.sections.iter().map(SectionScoreView::from).collect(),
            debriefs: results
                .scoreboard
                .outcomes
                .iter()
                .map(|outcome| outcome.debrief())
                .collect(),
            strengths: results.strengths().to_vec(),
            fixes: results.fixes(),
            plan: results.plan.clone(),
            summary: results.summary.clone(),
            profile_tags: results.tags.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Downloadable JSON document. The key set is fixed so consumers can rely on
/// every field being present.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument<'a> {
    pub profile: &'a BusinessProfile,
    pub initial_answers: &'a InitialAnswers,
    pub scenario_answers: BTreeMap<ScenarioId, ScenarioAnswer>,
    pub domain_scores: Vec<DomainScoreView>,
    pub overall: OverallView,
    pub strengths: Vec<&'static str>,
    pub fixes: Vec<&'static str>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(session: &'a AssessmentSession, results: &AssessmentResults) -> Self {
        Self {
            profile: session.profile(),
            initial_answers: session.answers(),
            scenario_answers: session.scenario_answers(),
            domain_scores: domain_views(results),
            overall: results.scoreboard.overall.into(),
            strengths: results.strengths().to_vec(),
            fixes: results.fixes(),
        }
    }
}

fn domain_views(results: &AssessmentResults) -> Vec<DomainScoreView> {
    results
        .scoreboard
        .scores
        .iter()
        .map(DomainScoreView::from)
        .collect()
}
