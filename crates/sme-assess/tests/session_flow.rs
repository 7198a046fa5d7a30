use sme_assess::assessment::{
    AssessmentResults, AssessmentSession, BusinessProfile, ContextAnswer, QuestionId,
    SavedAssessment, ScenarioCatalog, ScenarioId, ScoringConfig, SessionCommand, SessionError,
    Stage,
};

fn advance_to_simulation(session: &mut AssessmentSession, catalog: &ScenarioCatalog) {
    session
        .apply(
            SessionCommand::SubmitProfile {
                profile: BusinessProfile::default(),
            },
            catalog,
        )
        .expect("profile accepted");
    session
        .apply(
            SessionCommand::AnswerQuestion {
                question_id: QuestionId::KnowWhoToCall,
                answer: ContextAnswer::Choice("Yes".into()),
            },
            catalog,
        )
        .expect("last question accepted");
    assert_eq!(session.stage(), Stage::Summary);
    session
        .apply(SessionCommand::StartSimulation, catalog)
        .expect("simulation starts");
}

#[test]
fn full_run_moves_through_every_stage_and_back_for_review() {
    let catalog = ScenarioCatalog::standard();
    let mut session = AssessmentSession::new();
    assert_eq!(session.stage(), Stage::Intake);

    advance_to_simulation(&mut session, &catalog);
    assert_eq!(session.stage(), Stage::Simulation);

    for _ in 0..catalog.len() {
        session
            .apply(
                SessionCommand::SubmitScenario {
                    cues: Vec::new(),
                    actions: Vec::new(),
                    confidence: None,
                },
                &catalog,
            )
            .expect("scenario submitted");
    }
    assert_eq!(session.stage(), Stage::Results);
    assert_eq!(session.scenario_answers().len(), catalog.len());

    let stage = session
        .apply(SessionCommand::ReviewScenarios, &catalog)
        .expect("review allowed from results");
    assert_eq!(stage, Stage::Simulation);

    let stage = session
        .apply(SessionCommand::Reset, &catalog)
        .expect("reset always allowed");
    assert_eq!(stage, Stage::Intake);
    assert!(session.scenario_answers().is_empty());
}

#[test]
fn commands_outside_their_stage_are_rejected_without_side_effects() {
    let catalog = ScenarioCatalog::standard();
    let mut session = AssessmentSession::new();

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
    assert_eq!(session.stage(), Stage::Intake);
}

#[test]
fn restored_answers_drop_unknown_options_and_clamp_confidence() {
    let catalog = ScenarioCatalog::standard();
    let saved: SavedAssessment = serde_json::from_value(serde_json::json!({
        "profile": { "business_name": "  Corner Shop  " },
        "scenario_answers": {
            "s1_invoice": {
                "cues": ["New bank details + urgency", "Made-up cue"],
                "actions": ["Call supplier via number in finance contacts"],
                "confidence": 250
            }
        }
    }))
    .expect("saved answers parse");

    let session = AssessmentSession::restore(saved, &catalog);
    assert_eq!(session.stage(), Stage::Results);
    assert_eq!(session.profile().business_name, "Corner Shop");

    let answers = session.scenario_answers();
    let invoice = answers
        .get(&ScenarioId::SupplierInvoice)
        .expect("invoice restored");
    assert_eq!(invoice.cues, vec!["New bank details + urgency".to_string()]);
    assert_eq!(invoice.confidence, Some(100));

    let results = AssessmentResults::compute(&session, &catalog, &ScoringConfig::default());
    assert_eq!(results.scoreboard.outcomes.len(), 1);
}
