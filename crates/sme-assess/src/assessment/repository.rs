use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::catalog::ScenarioCatalog;
use super::domain::ScenarioId;
use super::intake::{context_questions, ContextQuestion};
use super::session::{AssessmentSession, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored session plus bookkeeping timestamps. `version` counts stored
/// updates and guards against lost writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub session: AssessmentSession,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl SessionRecord {
    pub fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            session: AssessmentSession::new(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn view(&self, catalog: &ScenarioCatalog) -> SessionView {
        let stage = self.session.stage();
        let questions = context_questions();
        let question_total = questions.len();

        let current_question = match stage {
            Stage::Questionnaire => questions.into_iter().nth(self.session.question_index()),
            _ => None,
        };
        let current_scenario = match stage {
            Stage::Simulation => catalog
                .at(self.session.scenario_index())
                .map(|scenario| scenario.id),
            _ => None,
        };

        SessionView {
            session_id: self.id.clone(),
            stage,
            stage_label: stage.label(),
            question_index: self.session.question_index(),
            question_total,
            scenario_index: self.session.scenario_index(),
            scenario_total: catalog.len(),
            answered_scenarios: self.session.responses().keys().copied().collect(),
            current_question,
            current_scenario,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Storage abstraction so the service can be exercised with any backend.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError>;
    /// Replaces the stored record only while its version still equals
    /// `record.version`, and returns the stored copy with the version bumped.
    /// A mismatch means another command landed first: `StoreError::Stale`.
    fn update(&self, record: SessionRecord) -> Result<SessionRecord, StoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session was changed by another request; reload and retry")]
    Stale,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Progress snapshot returned to clients after every command.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub stage: Stage,
    pub stage_label: &'static str,
    pub question_index: usize,
    pub question_total: usize,
    pub scenario_index: usize,
    pub scenario_total: usize,
    pub answered_scenarios: Vec<ScenarioId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<ContextQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_scenario: Option<ScenarioId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
