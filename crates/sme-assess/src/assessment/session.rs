use super::catalog::ScenarioCatalog;
use super::controls::{is_control_question, BaselinePractices, ControlAnswer};
use super::domain::{ScenarioId, ScenarioResponse};
use super::intake::{context_questions, BusinessProfile, ContextAnswer, InitialAnswers, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Intake,
    Questionnaire,
    Summary,
    Simulation,
    Results,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intake => "Intake",
            Self::Questionnaire => "Questionnaire",
            Self::Summary => "Summary",
            Self::Simulation => "Simulation",
            Self::Results => "Results",
        }
    }

    /// Stage reached by `transition`, or `None` when the move is not allowed
    /// from here.
    pub const fn next(self, transition: Transition) -> Option<Stage> {
        match (self, transition) {
            (_, Transition::Reset) => Some(Stage::Intake),
            (Stage::Intake, Transition::ProfileSubmitted) => Some(Stage::Questionnaire),
            (Stage::Questionnaire, Transition::QuestionnaireCompleted) => Some(Stage::Summary),
            (Stage::Summary, Transition::SimulationStarted) => Some(Stage::Simulation),
            (Stage::Simulation, Transition::SimulationCompleted) => Some(Stage::Results),
            (Stage::Results, Transition::Review) => Some(Stage::Simulation),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ProfileSubmitted,
    QuestionnaireCompleted,
    SimulationStarted,
    SimulationCompleted,
    Review,
    Reset,
}

/// User action against a session, as posted by the HTTP surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    SubmitProfile {
        profile: BusinessProfile,
    },
    AnswerQuestion {
        question_id: QuestionId,
        answer: ContextAnswer,
    },
    SkipQuestion,
    PreviousQuestion,
    RecordPractices {
        practices: BaselinePractices,
    },
    RecordControls {
        answers: BTreeMap<String, ControlAnswer>,
    },
    StartSimulation,
    SubmitScenario {
        #[serde(default)]
        cues: Vec<String>,
        #[serde(default)]
        actions: Vec<String>,
        #[serde(default)]
        confidence: Option<i64>,
    },
    SkipScenario,
    PreviousScenario,
    ReviewScenarios,
    Reset,
}

impl SessionCommand {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SubmitProfile { .. } => "submit_profile",
            Self::AnswerQuestion { .. } => "answer_question",
            Self::SkipQuestion => "skip_question",
            Self::PreviousQuestion => "previous_question",
            Self::RecordPractices { .. } => "record_practices",
            Self::RecordControls { .. } => "record_controls",
            Self::StartSimulation => "start_simulation",
            Self::SubmitScenario { .. } => "submit_scenario",
            Self::SkipScenario => "skip_scenario",
            Self::PreviousScenario => "previous_scenario",
            Self::ReviewScenarios => "review_scenarios",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("command `{command}` is not allowed during the {stage} stage")]
    InvalidTransition {
        stage: Stage,
        command: &'static str,
    },
}

/// Answers a scenario page as stored in saved files and JSON exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAnswer {
    pub cues: Vec<String>,
    pub actions: Vec<String>,
    pub confidence: Option<i64>,
}

impl From<&ScenarioResponse> for ScenarioAnswer {
    fn from(response: &ScenarioResponse) -> Self {
        Self {
            cues: response.selected_cues.clone(),
            actions: response.selected_actions.clone(),
            confidence: Some(i64::from(response.confidence)),
        }
    }
}

/// Previously exported answers, used to rebuild a finished session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavedAssessment {
    pub profile: BusinessProfile,
    pub initial_answers: InitialAnswers,
    pub scenario_answers: BTreeMap<ScenarioId, ScenarioAnswer>,
}

/// One user's walk through the assessment. Holds every answer given so far;
/// all scores are derived from it on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSession {
    stage: Stage,
    profile: BusinessProfile,
    answers: InitialAnswers,
    question_index: usize,
    scenario_index: usize,
    responses: BTreeMap<ScenarioId, ScenarioResponse>,
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session in the results stage from saved answers. Context
    /// answers, control answers and scenario selections are sanitised the
    /// same way live submissions are.
    pub fn restore(saved: SavedAssessment, catalog: &ScenarioCatalog) -> Self {
        let questions = context_questions();
        let context = saved
            .initial_answers
            .context
            .into_iter()
            .filter_map(|(id, answer)| {
                let question = questions.iter().find(|question| question.id == id)?;
                question.accept(answer).map(|accepted| (id, accepted))
            })
            .collect();
        let controls = saved
            .initial_answers
            .controls
            .into_iter()
            .filter(|(id, _)| is_control_question(id))
            .collect();

        let responses = saved
            .scenario_answers
            .iter()
            .filter_map(|(id, answer)| {
                let scenario = catalog.get(*id)?;
                let response = ScenarioResponse::sanitized(
                    scenario,
                    &answer.cues,
                    &answer.actions,
                    answer.confidence,
                );
                Some((*id, response))
            })
            .collect();

        Self {
            stage: Stage::Results,
            profile: saved.profile.normalized(),
            answers: InitialAnswers {
                context,
                practices: saved.initial_answers.practices,
                controls,
            },
            question_index: questions.len(),
            scenario_index: catalog.len(),
            responses,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> &BusinessProfile {
        &self.profile
    }

    pub fn answers(&self) -> &InitialAnswers {
        &self.answers
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn scenario_index(&self) -> usize {
        self.scenario_index
    }

    pub fn responses(&self) -> &BTreeMap<ScenarioId, ScenarioResponse> {
        &self.responses
    }

    pub fn scenario_answers(&self) -> BTreeMap<ScenarioId, ScenarioAnswer> {
        self.responses
            .iter()
            .map(|(id, response)| (*id, ScenarioAnswer::from(response)))
            .collect()
    }

    /// Applies a command and returns the resulting stage. A rejected command
    /// leaves the session untouched.
    pub fn apply(
        &mut self,
        command: SessionCommand,
        catalog: &ScenarioCatalog,
    ) -> Result<Stage, SessionError> {
        let name = command.name();
        match command {
            SessionCommand::SubmitProfile { profile } => {
                self.advance(Transition::ProfileSubmitted, name)?;
                self.profile = profile.normalized();
                self.question_index = 0;
            }
            SessionCommand::AnswerQuestion {
                question_id,
                answer,
            } => {
                self.require(&[Stage::Questionnaire], name)?;
                let questions = context_questions();
                if let Some(position) = questions
                    .iter()
                    .position(|question| question.id == question_id)
                {
                    match questions[position].accept(answer) {
                        Some(accepted) => {
                            self.answers.context.insert(question_id, accepted);
                        }
                        None => {
                            self.answers.context.remove(&question_id);
                        }
                    }
                    self.question_index = position + 1;
                }
                self.finish_questionnaire_if_done(questions.len());
            }
            SessionCommand::SkipQuestion => {
                self.require(&[Stage::Questionnaire], name)?;
                self.question_index += 1;
                self.finish_questionnaire_if_done(context_questions().len());
            }
            SessionCommand::PreviousQuestion => {
                self.require(&[Stage::Questionnaire], name)?;
                self.question_index = self.question_index.saturating_sub(1);
            }
            SessionCommand::RecordPractices { practices } => {
                self.require(&[Stage::Questionnaire, Stage::Summary], name)?;
                self.answers.practices = practices;
            }
            SessionCommand::RecordControls { answers } => {
                self.require(&[Stage::Summary, Stage::Simulation, Stage::Results], name)?;
                self.answers.controls.extend(
                    answers
                        .into_iter()
                        .filter(|(id, _)| is_control_question(id)),
                );
            }
            SessionCommand::StartSimulation => {
                self.advance(Transition::SimulationStarted, name)?;
                self.scenario_index = 0;
                self.finish_simulation_if_done(catalog);
            }
            SessionCommand::SubmitScenario {
                cues,
                actions,
                confidence,
            } => {
                self.require(&[Stage::Simulation], name)?;
                if let Some(scenario) = catalog.at(self.scenario_index) {
                    let response =
                        ScenarioResponse::sanitized(scenario, &cues, &actions, confidence);
                    self.responses.insert(scenario.id, response);
                }
                self.scenario_index += 1;
                self.finish_simulation_if_done(catalog);
            }
            SessionCommand::SkipScenario => {
                self.require(&[Stage::Simulation], name)?;
                if let Some(scenario) = catalog.at(self.scenario_index) {
                    self.responses.remove(&scenario.id);
                }
                self.scenario_index += 1;
                self.finish_simulation_if_done(catalog);
            }
            SessionCommand::PreviousScenario => {
                self.require(&[Stage::Simulation], name)?;
                self.scenario_index = self.scenario_index.saturating_sub(1);
            }
            SessionCommand::ReviewScenarios => {
                self.advance(Transition::Review, name)?;
                self.scenario_index = 0;
            }
            SessionCommand::Reset => {
                *self = Self::default();
            }
        }
        Ok(self.stage)
    }

    fn require(&self, allowed: &[Stage], command: &'static str) -> Result<(), SessionError> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                stage: self.stage,
                command,
            })
        }
    }

    fn advance(&mut self, transition: Transition, command: &'static str) -> Result<(), SessionError> {
        let next = self
            .stage
            .next(transition)
            .ok_or(SessionError::InvalidTransition {
                stage: self.stage,
                command,
            })?;
        self.stage = next;
        Ok(())
    }

    fn finish_questionnaire_if_done(&mut self, total: usize) {
        if self.question_index >= total {
            self.question_index = total;
            if let Some(next) = self.stage.next(Transition::QuestionnaireCompleted) {
                self.stage = next;
            }
        }
    }

    fn finish_simulation_if_done(&mut self, catalog: &ScenarioCatalog) {
        if self.scenario_index >= catalog.len() {
            self.scenario_index = catalog.len();
            if let Some(next) = self.stage.next(Transition::SimulationCompleted) {
                self.stage = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_only_allows_forward_moves_review_and_reset() {
        assert_eq!(Stage::Intake.next(Transition::ProfileSubmitted), Some(Stage::Questionnaire));
        assert_eq!(Stage::Results.next(Transition::Review), Some(Stage::Simulation));
        assert_eq!(Stage::Simulation.next(Transition::Reset), Some(Stage::Intake));
        assert_eq!(Stage::Intake.next(Transition::SimulationStarted), None);
        assert_eq!(Stage::Summary.next(Transition::Review), None);
        assert_eq!(Stage::Questionnaire.next(Transition::ProfileSubmitted), None);
    }

    #[test]
    fn rejected_command_leaves_session_unchanged() {
        let catalog = ScenarioCatalog::standard();
        let mut session = AssessmentSession::new();
        let before = session.clone();

        let error = session
            .apply(SessionCommand::StartSimulation, &catalog)
            .expect_err("cannot simulate before intake");

        assert_eq!(
            error,
            SessionError::InvalidTransition {
                stage: Stage::Intake,
                command: "start_simulation",
            }
        );
        assert_eq!(session, before);
    }

    #[test]
    fn answering_last_question_moves_to_summary() {
        let catalog = ScenarioCatalog::standard();
        let mut session = AssessmentSession::new();
        session
            .apply(
                SessionCommand::SubmitProfile {
                    profile: BusinessProfile::default(),
                },
                &catalog,
            )
            .expect("profile accepted");

        let stage = session
            .apply(
                SessionCommand::AnswerQuestion {
                    question_id: QuestionId::KnowWhoToCall,
                    answer: ContextAnswer::Choice("Yes".into()),
                },
                &catalog,
            )
            .expect("answer accepted");

        assert_eq!(stage, Stage::Summary);
        assert_eq!(session.question_index(), context_questions().len());
    }

    #[test]
    fn unrecognised_choice_leaves_question_unanswered() {
        let catalog = ScenarioCatalog::standard();
        let mut session = AssessmentSession::new();
        session
            .apply(
                SessionCommand::SubmitProfile {
                    profile: BusinessProfile::default(),
                },
                &catalog,
            )
            .expect("profile accepted");

        session
            .apply(
                SessionCommand::AnswerQuestion {
                    question_id: QuestionId::DataTypes,
                    answer: ContextAnswer::Choice("Perhaps".into()),
                },
                &catalog,
            )
            .expect("command accepted");

        assert!(session.answers().context.is_empty());
        assert_eq!(session.question_index(), 2);
    }

    #[test]
    fn empty_catalog_goes_straight_to_results() {
        let catalog = ScenarioCatalog::from_scenarios(Vec::new());
        let mut session = AssessmentSession {
            stage: Stage::Summary,
            ..AssessmentSession::default()
        };

        let stage = session
            .apply(SessionCommand::StartSimulation, &catalog)
            .expect("simulation starts");

        assert_eq!(stage, Stage::Results);
    }

    #[test]
    fn commands_deserialize_from_tagged_json() {
        let command: SessionCommand = serde_json::from_str(
            r#"{"command":"submit_scenario","cues":["a"],"confidence":250}"#,
        )
        .expect("valid command");
        assert_eq!(
            command,
            SessionCommand::SubmitScenario {
                cues: vec!["a".into()],
                actions: Vec::new(),
                confidence: Some(250),
            }
        );
    }
}
