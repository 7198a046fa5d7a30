use super::super::domain::{OptionTag, ScenarioId};
use super::super::scoring::ScenarioOutcome;
use super::push_unique;
use serde::Serialize;

const STRENGTH_LIMIT: usize = 8;
const FIX_LIMIT: usize = 10;

struct StrengthRule {
    any_of: &'static [OptionTag],
    text: &'static str,
}

const STRENGTH_RULES: &[StrengthRule] = &[
    StrengthRule {
        any_of: &[OptionTag::OobVerify],
        text: "Uses out-of-band verification before money/account changes.",
    },
    StrengthRule {
        any_of: &[OptionTag::HoldAndTicket, OptionTag::LogAndNotify],
        text: "Logs incidents and involves the right team quickly.",
    },
    StrengthRule {
        any_of: &[OptionTag::NavDirect, OptionTag::ReportButton],
        text: "Avoids risky links and uses the report-phish route.",
    },
    StrengthRule {
        any_of: &[OptionTag::RemoteWipe, OptionTag::RevokeTokens],
        text: "Can contain device loss (remote wipe / token revocation).",
    },
    StrengthRule {
        any_of: &[OptionTag::RemovePublic, OptionTag::ReviewDefaults],
        text: "Manages cloud sharing (remove public access, sensible defaults).",
    },
];

fn risky_fix(tag: OptionTag) -> Option<&'static str> {
    match tag {
        OptionTag::ClickLink => Some("Don’t verify via links in alerts; navigate directly."),
        OptionTag::ReplyEmail => {
            Some("Don’t confirm via the same thread; attackers control replies.")
        }
        OptionTag::ComplyAuthority => Some("Don’t bypass approvals due to urgency/authority."),
        OptionTag::WaitAndSee => Some("Act immediately on lost devices (lock/wipe, revoke)."),
        OptionTag::DoNothing => Some("Remove public access; rotate links and review defaults."),
        _ => None,
    }
}

/// Good practice a scenario expects to see among the chosen actions.
struct GapRule {
    scenarios: &'static [ScenarioId],
    any_of: &'static [OptionTag],
    text: &'static str,
}

const GAP_RULES: &[GapRule] = &[
    GapRule {
        scenarios: &[ScenarioId::SupplierInvoice, ScenarioId::CeoPayment],
        any_of: &[OptionTag::OobVerify],
        text: "Introduce two-channel verification for payments and account changes.",
    },
    GapRule {
        scenarios: &[ScenarioId::LostLaptop],
        any_of: &[OptionTag::RemoteWipe, OptionTag::RevokeTokens],
        text: "Ensure MDM can remote-lock/wipe and revoke sessions quickly.",
    },
    GapRule {
        scenarios: &[ScenarioId::PasswordReset],
        any_of: &[OptionTag::NavDirect, OptionTag::ReportButton],
        text: "Enable an easy ‘report phishing’ button and teach ‘navigate, don’t click’.",
    },
    GapRule {
        scenarios: &[ScenarioId::CloudSharing],
        any_of: &[OptionTag::RemovePublic],
        text: "Require expiring, least-privilege cloud links; disable ‘Anyone with link’.",
    },
];

/// Behaviour observed across the answered scenarios.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScenarioFeedback {
    pub strengths: Vec<&'static str>,
    /// Fixes for risky actions that were chosen.
    pub risky_fixes: Vec<&'static str>,
    /// Fixes for good practice that was missing.
    pub gap_fixes: Vec<&'static str>,
}

impl ScenarioFeedback {
    pub fn from_outcomes(outcomes: &[ScenarioOutcome]) -> Self {
        let mut feedback = Self::default();

        for outcome in outcomes {
            for rule in STRENGTH_RULES {
                if rule.any_of.iter().any(|tag| outcome.has_tag(*tag)) {
                    push_unique(&mut feedback.strengths, rule.text);
                }
            }

            for tag in &outcome.selected_tags {
                if let Some(fix) = risky_fix(*tag) {
                    push_unique(&mut feedback.risky_fixes, fix);
                }
            }

            for rule in GAP_RULES {
                let applies = rule.scenarios.contains(&outcome.scenario_id);
                if applies && !rule.any_of.iter().any(|tag| outcome.has_tag(*tag)) {
                    push_unique(&mut feedback.gap_fixes, rule.text);
                }
            }
        }

        feedback.strengths.sort_unstable();
        feedback.strengths.truncate(STRENGTH_LIMIT);
        feedback
    }

    /// Risky-action and gap fixes merged in lexical order, capped for display.
    pub fn fixes(&self) -> Vec<&'static str> {
        let mut fixes: Vec<&'static str> = self
            .risky_fixes
            .iter()
            .chain(self.gap_fixes.iter())
            .copied()
            .collect();
        fixes.sort_unstable();
        fixes.dedup();
        fixes.truncate(FIX_LIMIT);
        fixes
    }
}
