use super::controls::{area_statuses, AreaStatuses, BaselinePractices, ControlAnswer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Business snapshot captured on the intake page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub contact_name: String,
    pub business_name: String,
    pub industry: String,
    pub region: Region,
    pub years_in_business: String,
    pub headcount: Option<Headcount>,
    pub turnover: String,
    pub work_mode: String,
    pub work_environment: WorkEnvironment,
    pub data_categories: Vec<DataCategory>,
    pub card_payments: bool,
}

impl BusinessProfile {
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.contact_name,
            &mut self.business_name,
            &mut self.industry,
            &mut self.years_in_business,
            &mut self.turnover,
            &mut self.work_mode,
        ] {
            *field = field.trim().to_string();
        }
        self.data_categories.sort();
        self.data_categories.dedup();
        self
    }

    pub fn derived_size(&self) -> BusinessSize {
        match self.headcount {
            Some(Headcount::JustMe | Headcount::TwoToFive) => BusinessSize::Micro,
            Some(Headcount::SixToTwenty) | None => BusinessSize::Small,
            Some(Headcount::TwentyOneToHundred | Headcount::OverHundred) => BusinessSize::Medium,
        }
    }

    pub fn tags(&self) -> BTreeSet<ProfileTag> {
        let mut tags = BTreeSet::new();
        tags.insert(ProfileTag::Size(self.derived_size()));
        tags.insert(ProfileTag::Region(self.region));
        tags.insert(ProfileTag::Infrastructure(self.work_environment));
        for category in &self.data_categories {
            tags.insert(ProfileTag::Data(*category));
        }
        if self.card_payments {
            tags.insert(ProfileTag::CardPayments);
        }
        tags
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    EuEea,
    Uk,
    UnitedStates,
    OtherOrMulti,
}

impl Region {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EuEea => "EU / EEA",
            Self::Uk => "UK",
            Self::UnitedStates => "United States",
            Self::OtherOrMulti => "Other / Multi-region",
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::EuEea => "eu",
            Self::Uk => "uk",
            Self::UnitedStates => "us",
            Self::OtherOrMulti => "crossborder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Headcount {
    JustMe,
    TwoToFive,
    SixToTwenty,
    TwentyOneToHundred,
    OverHundred,
}

impl Headcount {
    pub const fn label(self) -> &'static str {
        match self {
            Self::JustMe => "Just me",
            Self::TwoToFive => "2-5",
            Self::SixToTwenty => "6-20",
            Self::TwentyOneToHundred => "21-100",
            Self::OverHundred => "100+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BusinessSize {
    Micro,
    Small,
    Medium,
}

impl BusinessSize {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Micro => "Micro",
            Self::Small => "Small",
            Self::Medium => "Medium",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkEnvironment {
    #[default]
    CloudApps,
    LocalServers,
    Hybrid,
}

impl WorkEnvironment {
    const fn tag(self) -> &'static str {
        match self {
            Self::CloudApps => "cloud",
            Self::LocalServers => "onprem",
            Self::Hybrid => "hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    CustomerPersonal,
    Employee,
    Health,
    Financial,
}

impl DataCategory {
    const fn tag(self) -> &'static str {
        match self {
            Self::CustomerPersonal => "pii",
            Self::Employee => "employee",
            Self::Health => "health",
            Self::Financial => "financial",
        }
    }
}

/// Facets of the profile used to tailor control sections and the action plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileTag {
    Size(BusinessSize),
    Region(Region),
    Infrastructure(WorkEnvironment),
    Data(DataCategory),
    CardPayments,
}

impl fmt::Display for ProfileTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileTag::Size(size) => write!(f, "size:{}", size.label()),
            ProfileTag::Region(region) => write!(f, "geo:{}", region.tag()),
            ProfileTag::Infrastructure(env) => write!(f, "infra:{}", env.tag()),
            ProfileTag::Data(category) => write!(f, "data:{}", category.tag()),
            ProfileTag::CardPayments => f.write_str("payments:card"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    SellOnline,
    DataTypes,
    ToolsRegular,
    WebsiteOwner,
    ItSupport,
    SetupBy,
    AssetList,
    ThirdParties,
    PartnerCount,
    BreachContact,
    Confidence,
    PastIncidents,
    KnowWhoToCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionPhase {
    DigitalFootprint,
    ItOwnership,
    Partners,
    Confidence,
}

impl QuestionPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DigitalFootprint => "Digital Footprint",
            Self::ItOwnership => "IT Ownership",
            Self::Partners => "Partners",
            Self::Confidence => "Confidence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextQuestion {
    pub id: QuestionId,
    pub phase: QuestionPhase,
    pub text: &'static str,
    pub kind: QuestionKind,
    pub choices: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<&'static str>,
}

impl ContextQuestion {
    /// Validates an answer against the question's choices. Anything that does
    /// not fit yields `None` and the question stays unanswered.
    pub fn accept(&self, answer: ContextAnswer) -> Option<ContextAnswer> {
        match (self.kind, answer) {
            (QuestionKind::SingleChoice, ContextAnswer::Choice(choice)) => {
                let choice = choice.trim();
                self.choices
                    .iter()
                    .find(|known| **known == choice)
                    .map(|known| ContextAnswer::Choice(known.to_string()))
            }
            (QuestionKind::MultiChoice, ContextAnswer::Choices(picked)) => {
                let kept = self
                    .choices
                    .iter()
                    .filter(|known| picked.iter().any(|pick| pick.trim() == **known))
                    .map(|known| known.to_string())
                    .collect();
                Some(ContextAnswer::Choices(kept))
            }
            (QuestionKind::MultiChoice, ContextAnswer::Choice(single)) => {
                self.accept(ContextAnswer::Choices(vec![single]))
            }
            (QuestionKind::SingleChoice, ContextAnswer::Choices(_)) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextAnswer {
    Choice(String),
    Choices(Vec<String>),
}

impl ContextAnswer {
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            ContextAnswer::Choice(choice) => Some(choice),
            ContextAnswer::Choices(_) => None,
        }
    }

    pub fn choices(&self) -> &[String] {
        match self {
            ContextAnswer::Choice(_) => &[],
            ContextAnswer::Choices(choices) => choices,
        }
    }
}

/// Everything answered before the simulations: context questions, baseline
/// practices and the optional control checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialAnswers {
    pub context: BTreeMap<QuestionId, ContextAnswer>,
    pub practices: BaselinePractices,
    pub controls: BTreeMap<String, ControlAnswer>,
}

impl InitialAnswers {
    fn choice(&self, id: QuestionId) -> Option<&str> {
        self.context.get(&id).and_then(ContextAnswer::as_choice)
    }

    fn choices(&self, id: QuestionId) -> &[String] {
        self.context
            .get(&id)
            .map(ContextAnswer::choices)
            .unwrap_or(&[])
    }
}

pub fn context_questions() -> Vec<ContextQuestion> {
    use QuestionKind::{MultiChoice, SingleChoice};
    use QuestionPhase::{Confidence, DigitalFootprint, ItOwnership, Partners};

    vec![
        ContextQuestion {
            id: QuestionId::SellOnline,
            phase: DigitalFootprint,
            text: "Do you sell products or deliver services online?",
            kind: SingleChoice,
            choices: vec![
                "Yes - on my own website",
                "Yes - via marketplaces (Amazon/Etsy)",
                "No - mostly offline",
            ],
            tip: Some("Helps estimate online exposure and dependencies."),
        },
        ContextQuestion {
            id: QuestionId::DataTypes,
            phase: DigitalFootprint,
            text: "Do you store customer or employee information (e.g., emails, invoices, payment info)?",
            kind: SingleChoice,
            choices: vec!["Yes", "No"],
            tip: Some("Personal data handling increases duty of care and regulatory exposure."),
        },
        ContextQuestion {
            id: QuestionId::ToolsRegular,
            phase: DigitalFootprint,
            text: "Which of these do you rely on daily?",
            kind: MultiChoice,
            choices: vec![
                "Email",
                "Accounting/finance software",
                "CRM or client database",
                CLOUD_STORAGE,
                "Online payment system",
                "Website or webshop",
            ],
            tip: Some("Locates critical processes and information."),
        },
        ContextQuestion {
            id: QuestionId::WebsiteOwner,
            phase: ItOwnership,
            text: "Who looks after your website and online systems?",
            kind: SingleChoice,
            choices: vec![
                "I do it myself",
                "Someone on my team",
                "An external company or freelancer",
            ],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::ItSupport,
            phase: ItOwnership,
            text: "Who takes care of computers, email and systems when something needs setup/fixing?",
            kind: SingleChoice,
            choices: vec!["I do", "A friend/freelancer", "An IT company", "In-house IT team"],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::SetupBy,
            phase: ItOwnership,
            text: "Did you personally set up your main systems (email, website, backups)?",
            kind: SingleChoice,
            choices: vec!["Yes, mostly me", "Shared effort", "Someone else handled it"],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::AssetList,
            phase: ItOwnership,
            text: "Do you have a clear list of systems, accounts and devices you use?",
            kind: SingleChoice,
            choices: vec!["Yes, documented", "Rough idea", "Not really"],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::ThirdParties,
            phase: Partners,
            text: "Do external partners handle your data/systems (host, accountant, logistics, marketing tools)?",
            kind: SingleChoice,
            choices: vec!["Yes", "No"],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::PartnerCount,
            phase: Partners,
            text: "How many key partners do you rely on?",
            kind: SingleChoice,
            choices: vec!["0-2", "3-5", "6+"],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::BreachContact,
            phase: Partners,
            text: "If a main partner had a breach, would you know who to contact and what to do?",
            kind: SingleChoice,
            choices: vec!["Yes - I know who to reach", "Not really sure"],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::Confidence,
            phase: Confidence,
            text: "How prepared would you feel if a cyberattack or data loss hit tomorrow?",
            kind: SingleChoice,
            choices: vec!["Not at all", "Somewhat", "Fairly confident", "Very confident"],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::PastIncidents,
            phase: Confidence,
            text: "Have you experienced a cybersecurity issue before (e.g., phishing, data loss, locked computer)?",
            kind: SingleChoice,
            choices: vec!["Yes", "No", "Not sure"],
            tip: None,
        },
        ContextQuestion {
            id: QuestionId::KnowWhoToCall,
            phase: Confidence,
            text: "Do you know who to call or where to get help if something happened?",
            kind: SingleChoice,
            choices: vec!["Yes", "No"],
            tip: None,
        },
    ]
}

const CLOUD_STORAGE: &str = "Cloud storage (Google Drive/OneDrive etc.)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyLevel {
    Low,
    Medium,
    High,
}

impl DependencyLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigitalDependency {
    pub score: u8,
    pub level: DependencyLevel,
}

pub fn digital_dependency(answers: &InitialAnswers) -> DigitalDependency {
    let mut score = 0u8;
    if answers
        .choice(QuestionId::SellOnline)
        .is_some_and(|choice| choice.starts_with("Yes"))
    {
        score += 2;
    }
    if answers.choice(QuestionId::DataTypes) == Some("Yes") {
        score += 1;
    }
    score += answers.choices(QuestionId::ToolsRegular).len().min(4) as u8;

    let level = match score {
        0..=2 => DependencyLevel::Low,
        3..=5 => DependencyLevel::Medium,
        _ => DependencyLevel::High,
    };
    DigitalDependency { score, level }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeSummary {
    pub digital_dependency: DigitalDependency,
    pub highlights: Vec<&'static str>,
    pub blind_spots: Vec<&'static str>,
    pub areas: AreaStatuses,
}

pub fn intake_summary(answers: &InitialAnswers) -> IntakeSummary {
    let mut highlights = Vec::new();
    if answers
        .choice(QuestionId::SellOnline)
        .is_some_and(|choice| choice.starts_with("Yes"))
    {
        highlights.push("Online sales increase reliance on website uptime and payment security.");
    }
    if answers
        .choices(QuestionId::ToolsRegular)
        .iter()
        .any(|tool| tool == CLOUD_STORAGE)
    {
        highlights.push("Cloud storage is central; access controls and backups matter.");
    }
    if answers.choice(QuestionId::DataTypes) == Some("Yes") {
        highlights.push("You handle personal data; consider privacy and retention basics.");
    }
    if highlights.is_empty() {
        highlights.push(
            "Operational footprint looks light; next step focuses on essential hygiene.",
        );
    }

    let mut blind_spots = Vec::new();
    if matches!(
        answers.choice(QuestionId::AssetList),
        Some("Rough idea" | "Not really")
    ) {
        blind_spots
            .push("No clear list of systems/accounts; hard to secure what you can't see.");
    }
    if answers.choice(QuestionId::BreachContact) == Some("Not really sure") {
        blind_spots.push("No partner-breach playbook; clarify contacts and escalation.");
    }
    if matches!(
        answers.choice(QuestionId::Confidence),
        Some("Not at all" | "Somewhat")
    ) {
        blind_spots
            .push("Low confidence; training and basic controls will lift resilience quickly.");
    }
    if blind_spots.is_empty() {
        blind_spots.push("Solid baseline. Next, validate backups, MFA, and incident basics.");
    }

    IntakeSummary {
        digital_dependency: digital_dependency(answers),
        highlights,
        blind_spots,
        areas: area_statuses(&answers.practices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(answers: &mut InitialAnswers, id: QuestionId, value: ContextAnswer) {
        let question = context_questions()
            .into_iter()
            .find(|question| question.id == id)
            .expect("question exists");
        let accepted = question.accept(value).expect("answer accepted");
        answers.context.insert(id, accepted);
    }

    #[test]
    fn dependency_caps_daily_tools_at_four() {
        let mut answers = InitialAnswers::default();
        answer(
            &mut answers,
            QuestionId::SellOnline,
            ContextAnswer::Choice("Yes - on my own website".into()),
        );
        answer(&mut answers, QuestionId::DataTypes, ContextAnswer::Choice("Yes".into()));
        answer(
            &mut answers,
            QuestionId::ToolsRegular,
            ContextAnswer::Choices(vec![
                "Email".into(),
                "Accounting/finance software".into(),
                "CRM or client database".into(),
                CLOUD_STORAGE.into(),
                "Website or webshop".into(),
            ]),
        );

        let dependency = digital_dependency(&answers);
        assert_eq!(dependency.score, 7);
        assert_eq!(dependency.level, DependencyLevel::High);
    }

    #[test]
    fn empty_answers_are_low_dependency_with_default_notes() {
        let summary = intake_summary(&InitialAnswers::default());
        assert_eq!(summary.digital_dependency.level, DependencyLevel::Low);
        assert_eq!(summary.highlights.len(), 1);
        assert!(summary.blind_spots[0].starts_with("Solid baseline"));
    }

    #[test]
    fn unknown_choices_are_rejected() {
        let question = &context_questions()[1];
        assert!(question
            .accept(ContextAnswer::Choice("Maybe".into()))
            .is_none());
        assert!(question
            .accept(ContextAnswer::Choices(vec!["Yes".into()]))
            .is_none());
    }

    #[test]
    fn profile_tags_reflect_size_region_and_payments() {
        let profile = BusinessProfile {
            headcount: Some(Headcount::TwoToFive),
            region: Region::Uk,
            card_payments: true,
            data_categories: vec![DataCategory::Health],
            ..BusinessProfile::default()
        };

        let tags: Vec<String> = profile.tags().iter().map(ToString::to_string).collect();
        assert!(tags.contains(&"size:Micro".to_string()));
        assert!(tags.contains(&"geo:uk".to_string()));
        assert!(tags.contains(&"infra:cloud".to_string()));
        assert!(tags.contains(&"data:health".to_string()));
        assert!(tags.contains(&"payments:card".to_string()));
    }
}
