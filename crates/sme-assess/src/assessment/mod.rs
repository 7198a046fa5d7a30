//! SME cybersecurity self-assessment: catalog data, scenario scoring, the
//! session state machine, recommendations and report exports.

pub mod catalog;
pub mod controls;
pub mod domain;
pub mod intake;
pub mod plan;
pub mod report;
pub mod repository;
pub mod results;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

pub use catalog::ScenarioCatalog;
pub use controls::{BaselinePractices, ControlAnswer, ControlLevel, ControlSection, SectionScore};
pub use domain::{
    ChoiceOption, ConfidenceScale, Domain, DomainWeight, OptionTag, Scenario, ScenarioId,
    ScenarioResponse, TaskGroup, Tier,
};
pub use intake::{
    BusinessProfile, BusinessSize, ContextAnswer, DataCategory, Headcount, InitialAnswers,
    ProfileTag, QuestionId, Region, WorkEnvironment,
};
pub use plan::{build_plan, ActionPlan, PlanInputs, ScenarioFeedback};
pub use report::{render_export, ExportError, ExportFormat, RenderedExport};
pub use repository::{SessionId, SessionRecord, SessionStore, SessionView, StoreError};
pub use results::AssessmentResults;
pub use router::assessment_router;
pub use scoring::{
    aggregate_domains, evaluate_scenario, score_selection, DomainScore, DomainScoreboard,
    OverallScore, ScenarioOutcome, ScoringConfig, UnmappedDomainPolicy,
};
pub use service::{AssessmentService, AssessmentServiceError};
pub use session::{
    AssessmentSession, SavedAssessment, ScenarioAnswer, SessionCommand, SessionError, Stage,
    Transition,
};
