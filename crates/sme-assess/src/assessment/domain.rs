use serde::{Deserialize, Serialize};
use std::fmt;

/// Cybersecurity topic areas that accumulate a scenario-driven percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    AccessAndAccounts,
    Devices,
    DataAndBackups,
    EmailAndAwareness,
    ResponseAndContinuity,
    Governance,
}

impl Domain {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::AccessAndAccounts,
            Self::Devices,
            Self::DataAndBackups,
            Self::EmailAndAwareness,
            Self::ResponseAndContinuity,
            Self::Governance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AccessAndAccounts => "Access & Accounts",
            Self::Devices => "Devices",
            Self::DataAndBackups => "Data & Backups",
            Self::EmailAndAwareness => "Email & Awareness",
            Self::ResponseAndContinuity => "Response & Continuity",
            Self::Governance => "Governance",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-step traffic light derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Good,
    NeedsWork,
    AtRisk,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::NeedsWork => "Needs work",
            Self::AtRisk => "At risk",
        }
    }

    pub const fn colour(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::NeedsWork => "amber",
            Self::AtRisk => "red",
        }
    }
}

/// Stable identifiers for the narrative scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScenarioId {
    #[serde(rename = "s1_invoice")]
    SupplierInvoice,
    #[serde(rename = "s2_ceo")]
    CeoPayment,
    #[serde(rename = "s3_reset")]
    PasswordReset,
    #[serde(rename = "s4_laptop")]
    LostLaptop,
    #[serde(rename = "s5_share")]
    CloudSharing,
}

impl ScenarioId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SupplierInvoice => "s1_invoice",
            Self::CeoPayment => "s2_ceo",
            Self::PasswordReset => "s3_reset",
            Self::LostLaptop => "s4_laptop",
            Self::CloudSharing => "s5_share",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable tag attached to every cue and action option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionTag {
    CueNewIban,
    #[serde(rename = "cue_replyto")]
    CueReplyTo,
    CueDomain,
    CueNone,
    CueSender,
    CueBypass,
    #[serde(rename = "cue_timesecrecy")]
    CueTimeSecrecy,
    CueUrl,
    CueGeneric,
    CuePressure,
    CueEncrypt,
    CueTokens,
    CueIgnore,
    CuePublic,
    CueSensitive,
    CueDefault,
    OobVerify,
    ReplyEmail,
    CrosscheckIban,
    ClickLink,
    HoldAndTicket,
    ComplyAuthority,
    LogAndNotify,
    NavDirect,
    ReportButton,
    RemoteWipe,
    RevokeTokens,
    WaitAndSee,
    RemovePublic,
    DoNothing,
    ReviewDefaults,
}

/// Selectable cue or action. Positive weights mark good picks, the rest are
/// risky choices or distractors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub text: &'static str,
    pub tag: OptionTag,
    pub weight: i16,
}

impl ChoiceOption {
    pub const fn is_positive(&self) -> bool {
        self.weight > 0
    }
}

/// A capped multi-select prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskGroup {
    pub prompt: &'static str,
    pub options: Vec<ChoiceOption>,
    pub max_select: usize,
}

impl TaskGroup {
    /// Looks up an option by text. Typographic and straight apostrophes
    /// are treated as the same character.
    pub fn find(&self, text: &str) -> Option<&ChoiceOption> {
        self.options
            .iter()
            .find(|option| option.text == text || same_text(option.text, text))
    }

    /// Options whose text appears in `selected`, in catalog order.
    pub fn selected<'a, S: AsRef<str>>(
        &'a self,
        selected: &'a [S],
    ) -> impl Iterator<Item = &'a ChoiceOption> + 'a {
        self.options
            .iter()
            .filter(move |option| selected.iter().any(|text| text.as_ref() == option.text))
    }

    /// Drops unknown texts and duplicates, then caps the list at `max_select`
    /// keeping the submission order. Kept entries use the catalog spelling.
    pub fn sanitize_selection<S: AsRef<str>>(&self, raw: &[S]) -> Vec<String> {
        let mut kept: Vec<String> = Vec::new();
        for text in raw {
            if kept.len() >= self.max_select {
                break;
            }
            let Some(option) = self.find(text.as_ref().trim()) else {
                continue;
            };
            if !kept.iter().any(|existing| existing == option.text) {
                kept.push(option.text.to_string());
            }
        }
        kept
    }
}

fn fold_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        other => other,
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.chars().map(fold_quote).eq(b.chars().map(fold_quote))
}

/// Slider bounds for the self-reported confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfidenceScale {
    pub prompt: &'static str,
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl ConfidenceScale {
    pub fn clamp(&self, value: i64) -> u8 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as u8
    }
}

/// Share of a scenario's base score credited to a domain. Proportions are
/// multipliers and need not sum to one across a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainWeight {
    pub domain: Domain,
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub title: &'static str,
    pub narrative: &'static str,
    pub evidence: Vec<&'static str>,
    pub cues: TaskGroup,
    pub actions: TaskGroup,
    pub confidence: ConfidenceScale,
    pub domain_map: Vec<DomainWeight>,
    pub hint_fix: &'static str,
}

impl Scenario {
    pub fn proportion_for(&self, domain: Domain) -> Option<f64> {
        self.domain_map
            .iter()
            .find(|weight| weight.domain == domain)
            .map(|weight| weight.proportion)
    }
}

/// A submitted scenario page. Selections hold option texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub scenario_id: ScenarioId,
    #[serde(default)]
    pub selected_cues: Vec<String>,
    #[serde(default)]
    pub selected_actions: Vec<String>,
    pub confidence: u8,
}

impl ScenarioResponse {
    /// Builds a response that satisfies the scenario's caps and ranges.
    pub fn sanitized<C, A>(
        scenario: &Scenario,
        cues: &[C],
        actions: &[A],
        confidence: Option<i64>,
    ) -> Self
    where
        C: AsRef<str>,
        A: AsRef<str>,
    {
        let confidence = confidence
            .map(|value| scenario.confidence.clamp(value))
            .unwrap_or(scenario.confidence.default);

        Self {
            scenario_id: scenario.id,
            selected_cues: scenario.cues.sanitize_selection(cues),
            selected_actions: scenario.actions.sanitize_selection(actions),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> TaskGroup {
        TaskGroup {
            prompt: "pick",
            options: vec![
                ChoiceOption {
                    text: "a",
                    tag: OptionTag::CueUrl,
                    weight: 2,
                },
                ChoiceOption {
                    text: "b",
                    tag: OptionTag::CueGeneric,
                    weight: 1,
                },
                ChoiceOption {
                    text: "c",
                    tag: OptionTag::CueNone,
                    weight: -2,
                },
            ],
            max_select: 2,
        }
    }

    #[test]
    fn sanitize_drops_unknown_and_duplicate_texts() {
        let kept = group().sanitize_selection(&["zzz", "a", "a", " c ", "b"]);
        assert_eq!(kept, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn straight_apostrophes_select_the_catalog_spelling() {
        let catalog = crate::assessment::catalog::ScenarioCatalog::standard();
        let share = catalog
            .get(ScenarioId::CloudSharing)
            .expect("sharing scenario present");

        let kept = share.cues.sanitize_selection(&[
            "Default 'Anyone' sharing",
            "Default \u{2018}Anyone\u{2019} sharing",
        ]);

        assert_eq!(kept, vec!["Default \u{2018}Anyone\u{2019} sharing".to_string()]);
    }

    #[test]
    fn tags_serialize_with_catalog_names() {
        let json = serde_json::to_string(&OptionTag::CueReplyTo).expect("tag serializes");
        assert_eq!(json, "\"cue_replyto\"");
        let json = serde_json::to_string(&OptionTag::OobVerify).expect("tag serializes");
        assert_eq!(json, "\"oob_verify\"");
    }

    #[test]
    fn scenario_ids_round_trip_wire_names() {
        let id: ScenarioId = serde_json::from_str("\"s4_laptop\"").expect("id parses");
        assert_eq!(id, ScenarioId::LostLaptop);
        assert_eq!(id.to_string(), "s4_laptop");
    }
}
