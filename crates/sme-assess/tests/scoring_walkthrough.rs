use sme_assess::assessment::{
    aggregate_domains, evaluate_scenario, Domain, ScenarioCatalog, ScenarioId, ScenarioResponse,
    ScoringConfig, Tier, UnmappedDomainPolicy,
};
use std::collections::BTreeMap;

fn invoice_response(catalog: &ScenarioCatalog, confidence: i64) -> ScenarioResponse {
    let invoice = catalog
        .get(ScenarioId::SupplierInvoice)
        .expect("invoice scenario present");
    ScenarioResponse::sanitized(
        invoice,
        &["New bank details + urgency", "Reply-To differs from display name"],
        &["Call supplier via number in finance contacts"],
        Some(confidence),
    )
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[test]
fn invoice_walkthrough_scores_cues_actions_and_calibration() {
    let catalog = ScenarioCatalog::standard();
    let invoice = catalog
        .get(ScenarioId::SupplierInvoice)
        .expect("invoice scenario present");
    let outcome = evaluate_scenario(
        invoice,
        &invoice_response(&catalog, 80),
        &ScoringConfig::default(),
    );

    assert_eq!(round_tenth(outcome.cues_score), 66.7);
    assert_eq!(round_tenth(outcome.actions_score), 60.0);
    assert_eq!(round_tenth(outcome.base), 63.3);
    assert_eq!(outcome.calibration, 5.0);

    let awareness = outcome
        .contribution(Domain::EmailAndAwareness)
        .expect("awareness mapped");
    let response = outcome
        .contribution(Domain::ResponseAndContinuity)
        .expect("response mapped");
    assert_eq!(round_tenth(awareness), 36.7);
    assert_eq!(round_tenth(response), 31.7);
    assert_eq!(
        outcome.good_actions,
        vec!["Call supplier via number in finance contacts"]
    );
    assert_eq!(outcome.missed_cues, vec!["Link domain not the usual portal"]);
}

#[test]
fn low_confidence_leaves_awareness_uncalibrated() {
    let catalog = ScenarioCatalog::standard();
    let invoice = catalog
        .get(ScenarioId::SupplierInvoice)
        .expect("invoice scenario present");
    let outcome = evaluate_scenario(
        invoice,
        &invoice_response(&catalog, 50),
        &ScoringConfig::default(),
    );

    assert_eq!(outcome.calibration, 0.0);
    assert_eq!(
        outcome.contribution(Domain::EmailAndAwareness),
        outcome.contribution(Domain::ResponseAndContinuity)
    );
}

#[test]
fn partial_run_is_measured_against_the_whole_catalog() {
    let catalog = ScenarioCatalog::standard();
    let mut responses = BTreeMap::new();
    responses.insert(ScenarioId::SupplierInvoice, invoice_response(&catalog, 80));

    let board = aggregate_domains(&catalog, &responses, &ScoringConfig::default());

    let awareness = board
        .score(Domain::EmailAndAwareness)
        .expect("awareness scored");
    assert_eq!(awareness.possible, 100.0);
    assert_eq!(awareness.percent, 37);
    assert_eq!(awareness.tier, Tier::AtRisk);

    let response = board
        .score(Domain::ResponseAndContinuity)
        .expect("response scored");
    assert!((response.possible - 160.0).abs() < 1e-9);
    assert_eq!(response.percent, 20);

    let devices = board.score(Domain::Devices).expect("devices scored");
    assert_eq!(devices.percent, 0);
    assert_eq!(board.outcomes.len(), 1);
}

#[test]
fn empty_catalog_excluding_unmapped_domains_is_at_risk() {
    let catalog = ScenarioCatalog::from_scenarios(Vec::new());
    let config = ScoringConfig {
        unmapped_domains: UnmappedDomainPolicy::Exclude,
        ..ScoringConfig::default()
    };

    let board = aggregate_domains(&catalog, &BTreeMap::new(), &config);

    assert_eq!(board.scores.len(), 6);
    assert_eq!(board.overall.percent, 0);
    assert_eq!(board.overall.tier, Tier::AtRisk);
}
