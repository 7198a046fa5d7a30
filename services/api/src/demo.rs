use crate::infra::InMemorySessionStore;
use clap::Args;
use sme_assess::assessment::{
    render_export, AssessmentResults, AssessmentService, AssessmentServiceError,
    AssessmentSession, BaselinePractices, BusinessProfile, ChoiceOption, ContextAnswer,
    ControlAnswer, DataCategory, ExportError, ExportFormat, Headcount, QuestionId, Region,
    RenderedExport, SavedAssessment, ScenarioCatalog, SessionCommand, SessionId, SessionStore,
    WorkEnvironment,
};
use sme_assess::config::AppConfig;
use sme_assess::error::AppError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse::<ExportFormat>().map_err(|err| err.to_string())
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Export format printed at the end (markdown, json, csv or pdf)
    #[arg(long, default_value = "markdown", value_parser = parse_format)]
    pub(crate) format: ExportFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Saved answers (JSON with profile, initial_answers and scenario_answers)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Export format (markdown, json, csv or pdf)
    #[arg(long, default_value = "markdown", value_parser = parse_format)]
    pub(crate) format: ExportFormat,
    /// Write the export to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = Arc::new(InMemorySessionStore::default());
    let service = AssessmentService::new(store.clone(), config.scoring);

    println!("SME cybersecurity self-assessment demo");
    let record = service.create()?;
    let id = record.id.clone();
    println!("- Session {} created at stage {}", id, record.session.stage());

    replay(&service, &id, demo_script(service.catalog()))?;

    let (_, results) = service.results(&id)?;
    println!(
        "\nOverall posture: {} ({}%)",
        results.scoreboard.overall.tier.label(),
        results.scoreboard.overall.percent
    );
    for outcome in &results.scoreboard.outcomes {
        let debrief = outcome.debrief();
        println!(
            "- {}: cues {:.1} | actions {:.1} | combined {:.1}",
            debrief.scenario_id, debrief.cues_score, debrief.actions_score, debrief.combined
        );
    }
    if let Ok(Some(stored)) = store.fetch(&id) {
        println!(
            "- Stored session last updated {}",
            stored.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    let rendered = match service.export(&id, args.format) {
        Ok(rendered) => rendered,
        Err(AssessmentServiceError::Export(ExportError::EngineUnavailable(format))) => {
            println!("\n{format} engine not available; using Markdown export.");
            service.export(&id, ExportFormat::Markdown)?
        }
        Err(err) => return Err(err.into()),
    };
    println!("\n{}", rendered.body);
    Ok(())
}

fn replay<S>(
    service: &AssessmentService<S>,
    id: &SessionId,
    commands: Vec<SessionCommand>,
) -> Result<(), AppError>
where
    S: SessionStore + 'static,
{
    for command in commands {
        let name = command.name();
        match service.apply(id, command) {
            Ok(record) => println!("  {name:<18} -> {}", record.session.stage()),
            Err(err) => {
                println!("  {name:<18} rejected: {err}");
                return Err(err.into());
            }
        }
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let raw = std::fs::read_to_string(&args.input)?;
    let saved: SavedAssessment = serde_json::from_str(&raw)?;

    let catalog = ScenarioCatalog::standard();
    let session = AssessmentSession::restore(saved, &catalog);
    let results = AssessmentResults::compute(&session, &catalog, &config.scoring);

    let rendered = export_with_fallback(args.format, &session, &results)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered.body)?;
            println!("Wrote {} export to {}", rendered.format, path.display());
        }
        None => println!("{}", rendered.body),
    }
    Ok(())
}

fn export_with_fallback(
    format: ExportFormat,
    session: &AssessmentSession,
    results: &AssessmentResults,
) -> Result<RenderedExport, AppError> {
    match render_export(format, session, results) {
        Ok(rendered) => Ok(rendered),
        Err(ExportError::EngineUnavailable(format)) => {
            eprintln!("{format} engine not available; using Markdown export.");
            Ok(render_export(ExportFormat::Markdown, session, results)?)
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn run_scenarios() -> Result<(), AppError> {
    let catalog = ScenarioCatalog::standard();
    println!("Scenario catalog ({} scenarios)", catalog.len());
    for scenario in catalog.scenarios() {
        println!("\n[{}] {}", scenario.id, scenario.title);
        println!("  {}", scenario.narrative);
        let mapping: Vec<String> = scenario
            .domain_map
            .iter()
            .map(|weight| format!("{} x{:.1}", weight.domain, weight.proportion))
            .collect();
        println!("  Domains: {}", mapping.join(", "));
        for group in [&scenario.cues, &scenario.actions] {
            println!("  {}", group.prompt);
            for option in &group.options {
                println!("    {:+} {}", option.weight, option.text);
            }
        }
        println!(
            "  Confidence {}..{} (default {})",
            scenario.confidence.min, scenario.confidence.max, scenario.confidence.default
        );
    }
    Ok(())
}

fn demo_profile() -> BusinessProfile {
    BusinessProfile {
        contact_name: "Sam Rivera".to_string(),
        business_name: "Harbour Lane Bakery".to_string(),
        industry: "Retail & Hospitality".to_string(),
        region: Region::Uk,
        years_in_business: "3-5".to_string(),
        headcount: Some(Headcount::SixToTwenty),
        turnover: "Under 2m".to_string(),
        work_mode: "Mostly on-site".to_string(),
        work_environment: WorkEnvironment::CloudApps,
        data_categories: vec![DataCategory::CustomerPersonal, DataCategory::Financial],
        card_payments: true,
    }
}

fn demo_script(catalog: &ScenarioCatalog) -> Vec<SessionCommand> {
    let mut commands = vec![SessionCommand::SubmitProfile {
        profile: demo_profile(),
    }];

    let context = [
        (QuestionId::SellOnline, ContextAnswer::Choice("Yes - on my own website".into())),
        (QuestionId::DataTypes, ContextAnswer::Choice("Yes".into())),
        (
            QuestionId::ToolsRegular,
            ContextAnswer::Choices(vec![
                "Email".into(),
                "Online payment system".into(),
                "Website or webshop".into(),
            ]),
        ),
        (QuestionId::AssetList, ContextAnswer::Choice("Rough idea".into())),
    ];
    commands.push(SessionCommand::RecordPractices {
        practices: BaselinePractices {
            device_inventory: Some(ControlAnswer::Partially),
            sensitive_data: Some(ControlAnswer::Yes),
            public_website: Some(true),
            https: Some(ControlAnswer::Yes),
            business_email: Some(ControlAnswer::Yes),
            byod: Some(ControlAnswer::Partially),
        },
    });
    for (question_id, answer) in context {
        commands.push(SessionCommand::AnswerQuestion {
            question_id,
            answer,
        });
    }
    commands.push(SessionCommand::AnswerQuestion {
        question_id: QuestionId::KnowWhoToCall,
        answer: ContextAnswer::Choice("No".into()),
    });

    let controls: BTreeMap<String, ControlAnswer> = [
        ("gov_roles", ControlAnswer::No),
        ("gov_policy", ControlAnswer::No),
        ("gov_review", ControlAnswer::NotSure),
        ("ai_mfa", ControlAnswer::Partially),
        ("dd_backup", ControlAnswer::Yes),
    ]
    .into_iter()
    .map(|(id, answer)| (id.to_string(), answer))
    .collect();
    commands.push(SessionCommand::RecordControls { answers: controls });
    commands.push(SessionCommand::StartSimulation);

    // Picks the first listed cue and action of every scenario, which mixes
    // good and risky choices across the catalog.
    for (index, scenario) in catalog.scenarios().iter().enumerate() {
        if index == 2 {
            commands.push(SessionCommand::SkipScenario);
            continue;
        }
        let first_text = |options: &[ChoiceOption]| {
            options
                .first()
                .map(|option| vec![option.text.to_string()])
                .unwrap_or_default()
        };
        commands.push(SessionCommand::SubmitScenario {
            cues: first_text(&scenario.cues.options),
            actions: first_text(&scenario.actions.options),
            confidence: Some(75),
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use sme_assess::assessment::{ScoringConfig, Stage};

    #[test]
    fn demo_script_reaches_results_with_one_skipped_scenario() {
        let catalog = ScenarioCatalog::standard();
        let mut session = AssessmentSession::new();
        for command in demo_script(&catalog) {
            session.apply(command, &catalog).expect("scripted command accepted");
        }

        assert_eq!(session.stage(), Stage::Results);
        assert_eq!(session.scenario_answers().len(), catalog.len() - 1);

        let results = AssessmentResults::compute(&session, &catalog, &ScoringConfig::default());
        assert!(!results.sections.is_empty());
        assert!(!results.plan.quick_wins.is_empty());
    }

    #[test]
    fn rejected_script_command_fails_the_demo() {
        let store = Arc::new(InMemorySessionStore::default());
        let service = AssessmentService::new(store, ScoringConfig::default());
        let record = service.create().expect("session created");

        let outcome = replay(&service, &record.id, vec![SessionCommand::StartSimulation]);

        let error = outcome.expect_err("simulation before intake is rejected");
        assert!(error.to_string().contains("start_simulation"));
    }

    #[test]
    fn score_fallback_renders_markdown_for_pdf() {
        let catalog = ScenarioCatalog::standard();
        let session = AssessmentSession::restore(SavedAssessment::default(), &catalog);
        let results = AssessmentResults::compute(&session, &catalog, &ScoringConfig::default());

        let rendered =
            export_with_fallback(ExportFormat::Pdf, &session, &results).expect("fallback export");
        assert_eq!(rendered.format, ExportFormat::Markdown);
        assert!(rendered.body.starts_with("# "));
    }

    #[test]
    fn format_parser_reports_unknown_values() {
        assert_eq!(parse_format("md"), Ok(ExportFormat::Markdown));
        assert!(parse_format("xlsx").is_err());
    }
}
