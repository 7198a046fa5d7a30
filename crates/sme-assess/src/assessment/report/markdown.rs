use super::super::results::AssessmentResults;
use super::super::session::AssessmentSession;

pub const REPORT_TITLE: &str = "SME Cybersecurity Self-Assessment: Summary & Action Plan";

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

pub fn render_markdown(session: &AssessmentSession, results: &AssessmentResults) -> String {
    let profile = session.profile();
    let overall = &results.scoreboard.overall;
    let mut lines = vec![
        format!("# {REPORT_TITLE}"),
        String::new(),
        "## Snapshot".to_string(),
        format!("- Business: {}", or_dash(&profile.business_name)),
        format!("- Region: {}", profile.region.label()),
        format!("- Industry: {}", or_dash(&profile.industry)),
        format!("- Size (derived): {}", profile.derived_size().label()),
        format!("- Overall: {} (score {})", overall.tier.label(), overall.percent),
        String::new(),
        "## Domain status".to_string(),
    ];

    lines.extend(results.scoreboard.scores.iter().map(|score| {
        format!(
            "- {}: {} (score {})",
            score.domain.label(),
            score.tier.label(),
            score.percent
        )
    }));
    lines.push(String::new());

    if !results.sections.is_empty() {
        lines.push("## Control checks".to_string());
        lines.extend(results.sections.iter().map(|section| {
            format!(
                "- {} controls: {} risk (score {:.2})",
                section.section.label(),
                section.level.label(),
                section.score
            )
        }));
        lines.push(String::new());
    }

    lines.push("## Action plan".to_string());
    for (heading, items) in [
        ("Quick wins", &results.plan.quick_wins),
        ("Foundations", &results.plan.foundations),
        ("Next-level / compliance", &results.plan.next_level),
    ] {
        lines.push(format!("### {heading}"));
        lines.extend(items.iter().map(|item| format!("- {item}")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
