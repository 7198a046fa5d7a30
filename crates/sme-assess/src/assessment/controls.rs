use super::intake::{BusinessSize, ProfileTag, Region, WorkEnvironment};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Answer to a yes/no style control question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlAnswer {
    Yes,
    Partially,
    No,
    #[serde(rename = "Not sure", alias = "not_sure")]
    NotSure,
}

impl ControlAnswer {
    pub const fn risk(self) -> f64 {
        match self {
            Self::Yes => 0.0,
            Self::Partially | Self::NotSure => 1.0,
            Self::No => 2.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::Partially => "Partially",
            Self::No => "No",
            Self::NotSure => "Not sure",
        }
    }
}

/// Quick checks captured before the summary page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselinePractices {
    pub device_inventory: Option<ControlAnswer>,
    pub sensitive_data: Option<ControlAnswer>,
    pub public_website: Option<bool>,
    pub https: Option<ControlAnswer>,
    pub business_email: Option<ControlAnswer>,
    pub byod: Option<ControlAnswer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Light {
    Green,
    Amber,
    Red,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AreaStatus {
    pub status: &'static str,
    pub light: Light,
}

impl AreaStatus {
    const fn new(status: &'static str, light: Light) -> Self {
        Self { status, light }
    }

    const UNKNOWN: Self = Self::new("Unknown", Light::Unknown);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AreaStatuses {
    pub systems: AreaStatus,
    pub people: AreaStatus,
    pub exposure: AreaStatus,
}

pub fn area_statuses(practices: &BaselinePractices) -> AreaStatuses {
    use ControlAnswer::{No, NotSure, Partially, Yes};

    let systems = match practices.device_inventory {
        Some(Yes) => AreaStatus::new("Good", Light::Green),
        Some(Partially) => AreaStatus::new("Partial", Light::Amber),
        Some(No | NotSure) => AreaStatus::new("At risk", Light::Red),
        None => AreaStatus::UNKNOWN,
    };

    let people = match (practices.byod, practices.business_email) {
        (Some(No), Some(Yes)) => AreaStatus::new("Safe", Light::Green),
        (_, Some(No)) => AreaStatus::new("At risk", Light::Red),
        (Some(Yes | Partially), _) | (_, Some(Partially)) => {
            AreaStatus::new("Mixed", Light::Amber)
        }
        _ => AreaStatus::UNKNOWN,
    };

    let exposure = match (practices.public_website, practices.https) {
        (Some(true), Some(Yes)) => AreaStatus::new("Protected", Light::Green),
        (Some(true), Some(No)) => AreaStatus::new("Exposed", Light::Red),
        (Some(true), Some(NotSure)) => AreaStatus::new("Check", Light::Amber),
        (Some(false), _) => AreaStatus::new("Low", Light::Green),
        _ => AreaStatus::UNKNOWN,
    };

    AreaStatuses {
        systems,
        people,
        exposure,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControlSection {
    #[serde(rename = "Access & Identity")]
    AccessAndIdentity,
    #[serde(rename = "Device & Data")]
    DeviceAndData,
    #[serde(rename = "System & Software Updates")]
    SoftwareUpdates,
    #[serde(rename = "Incident Preparedness")]
    IncidentPreparedness,
    #[serde(rename = "Vendor & Cloud")]
    VendorAndCloud,
    #[serde(rename = "Awareness & Training")]
    AwarenessAndTraining,
    #[serde(rename = "Governance")]
    Governance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub hint: &'static str,
    pub weight: f64,
}

const fn question(id: &'static str, text: &'static str, hint: &'static str) -> ControlQuestion {
    ControlQuestion {
        id,
        text,
        hint,
        weight: 1.0,
    }
}

const ACCESS_AND_IDENTITY: &[ControlQuestion] = &[
    question("ai_pw", "Are strong passwords required for all accounts?", "Use at least 10-12 characters, avoid reuse. A password manager helps."),
    question("ai_mfa", "Is Multi-Factor Authentication (MFA) enabled for key accounts?", "Start with email, admin and finance; use an authenticator app or security key."),
    question("ai_admin", "Are admin rights limited to only those who need them?", "Grant temporarily, review quarterly, monitor admin sign-ins."),
    question("ai_shared", "Are shared accounts avoided or controlled?", "Prefer named accounts; if shared, rotate passwords and log usage."),
    question("ai_leavers", "Are old or unused accounts removed promptly?", "Disable the same day a person leaves; reclaim devices and keys."),
];

const DEVICE_AND_DATA: &[ControlQuestion] = &[
    question("dd_lock", "Are all laptops/phones protected with a password or PIN?", "Also enable auto-lock (10 minutes or less) and find-my-device."),
    question("dd_fde", "Is full-disk encryption enabled on laptops and mobiles?", "Windows BitLocker, macOS FileVault, Android/iOS device encryption."),
    question("dd_edr", "Is reputable antivirus/EDR installed and active on all devices?", "Examples: Microsoft Defender, CrowdStrike, SentinelOne."),
    question("dd_backup", "Are important business files backed up regularly?", "3-2-1 rule: 3 copies, 2 media, 1 offsite (cloud counts)."),
    question("dd_restore", "Are backups tested so you know restore works?", "Try restoring one file/VM quarterly; script it if possible."),
    question("dd_usb", "Are staff trained to handle suspicious files/USBs?", "Block unknown USBs; preview links before clicking."),
    question("dd_wifi", "Are company devices separated from personal ones on Wi-Fi?", "Use separate SSIDs (Corp vs Guest); VLANs where possible."),
];

const SOFTWARE_UPDATES: &[ControlQuestion] = &[
    question("su_os_auto", "Are operating systems kept up to date automatically?", "Turn on auto-update in Windows/macOS; MDM helps enforce."),
    question("su_apps", "Are business apps updated regularly?", "Browsers, accounting, CRM, PoS; prefer auto-update channels."),
    question("su_unsupported", "Any devices running unsupported/outdated systems?", "Replace/upgrade old OS versions; isolate until replaced."),
    question("su_review", "Do you have a monthly reminder to review updates?", "Calendar task, RMM/MSP report, or patch-tuesday checklist."),
];

const INCIDENT_PREPAREDNESS: &[ControlQuestion] = &[
    question("ip_report", "Do employees know how to report incidents or suspicious activity?", "Phishing mailbox (phish@), a #security channel, service desk."),
    question("ip_plan", "Do you have a simple incident response plan?", "1-page checklist: who to call, what to collect, who to notify."),
    question("ip_log", "Are incident details recorded when they occur?", "What/when/who/impact; template in your ticketing system helps."),
    question("ip_contacts", "Are key contacts known for emergencies?", "Internal IT, MSP, cyber insurer, legal, data-protection contact."),
    question("ip_test", "Have you tested or simulated a cyber incident?", "30-minute tabletop twice a year; refine the plan afterwards."),
];

const VENDOR_AND_CLOUD: &[ControlQuestion] = &[
    question("vc_cloud", "Do you use cloud tools to store company data?", "M365, Google Workspace, Dropbox, sector SaaS (ERP, EHR, PoS)."),
    question("vc_mfa", "Are cloud accounts protected with MFA and strong passwords?", "Enforce tenant-wide MFA; require it for all admins."),
    question("vc_review", "Do you review how vendors protect your data?", "Check DPA, data location, certifications (ISO 27001, SOC 2)."),
    question("vc_access", "Do you track which suppliers have access to systems/data?", "Maintain a shared list; remove unused integrations."),
    question("vc_notify", "Will vendors notify you promptly if they have a breach?", "Breach-notification clause + contact path tested once a year."),
];

const AWARENESS_AND_TRAINING: &[ControlQuestion] = &[
    question("at_training", "Have employees received any cybersecurity training?", "Short e-learning or live session; track completion."),
    question("at_phish", "Do staff know how to spot phishing or scam emails?", "Check sender, link URL, urgency, attachments; report quickly."),
    question("at_onboard", "Are new employees briefed during onboarding?", "Add a 15-minute security starter; include password manager."),
    question("at_reminders", "Do you share posters, reminders, or tips?", "Monthly internal post: MFA, updates, phishing examples."),
    question("at_lead", "Does management actively promote cybersecurity?", "Leaders mention it in all-hands; ask for MFA completion."),
];

const GOVERNANCE: &[ControlQuestion] = &[
    question("gov_roles", "Are cybersecurity roles and responsibilities clearly assigned?", "One person (or partner) accountable for security oversight."),
    question("gov_policy", "Do you have a basic information-security policy?", "A 1-2 page policy covering access, acceptable use, and data protection."),
    question("gov_review", "Is cybersecurity reviewed at least once a year by management?", "Add it to your annual planning calendar."),
    question("gov_risk", "Do you assess and log key security risks or incidents?", "Even a short spreadsheet or helpdesk category helps track issues."),
    question("gov_comms", "Do you communicate cyber updates or lessons learned to staff?", "Mention it in all-hands; build a culture of improvement."),
];

impl ControlSection {
    pub const fn ordered() -> [ControlSection; 7] {
        [
            Self::AccessAndIdentity,
            Self::DeviceAndData,
            Self::SoftwareUpdates,
            Self::IncidentPreparedness,
            Self::VendorAndCloud,
            Self::AwarenessAndTraining,
            Self::Governance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AccessAndIdentity => "Access & Identity",
            Self::DeviceAndData => "Device & Data",
            Self::SoftwareUpdates => "System & Software Updates",
            Self::IncidentPreparedness => "Incident Preparedness",
            Self::VendorAndCloud => "Vendor & Cloud",
            Self::AwarenessAndTraining => "Awareness & Training",
            Self::Governance => "Governance",
        }
    }

    pub const fn questions(self) -> &'static [ControlQuestion] {
        match self {
            Self::AccessAndIdentity => ACCESS_AND_IDENTITY,
            Self::DeviceAndData => DEVICE_AND_DATA,
            Self::SoftwareUpdates => SOFTWARE_UPDATES,
            Self::IncidentPreparedness => INCIDENT_PREPAREDNESS,
            Self::VendorAndCloud => VENDOR_AND_CLOUD,
            Self::AwarenessAndTraining => AWARENESS_AND_TRAINING,
            Self::Governance => GOVERNANCE,
        }
    }

    const fn is_baseline(self) -> bool {
        matches!(
            self,
            Self::AccessAndIdentity
                | Self::DeviceAndData
                | Self::SoftwareUpdates
                | Self::AwarenessAndTraining
        )
    }
}

pub fn is_control_question(id: &str) -> bool {
    ControlSection::ordered()
        .iter()
        .any(|section| section.questions().iter().any(|question| question.id == id))
}

/// Sections that apply to a profile, in display order.
pub fn active_sections(tags: &BTreeSet<ProfileTag>) -> Vec<ControlSection> {
    let sized_up = tags.contains(&ProfileTag::Size(BusinessSize::Small))
        || tags.contains(&ProfileTag::Size(BusinessSize::Medium));
    let vendor_exposed = tags.contains(&ProfileTag::Infrastructure(WorkEnvironment::CloudApps))
        || tags.contains(&ProfileTag::Region(Region::OtherOrMulti));

    ControlSection::ordered()
        .into_iter()
        .filter(|section| match section {
            ControlSection::IncidentPreparedness | ControlSection::Governance => sized_up,
            ControlSection::VendorAndCloud => vendor_exposed,
            other => other.is_baseline(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlLevel {
    Low,
    Medium,
    High,
}

impl ControlLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 0.5 {
            Self::Low
        } else if score < 1.2 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionScore {
    pub section: ControlSection,
    pub score: f64,
    pub level: ControlLevel,
}

/// Weighted mean risk of a section on the 0..=2 scale, rounded to two
/// decimals. Unanswered questions count as `Partially`.
pub fn section_score(section: ControlSection, answers: &BTreeMap<String, ControlAnswer>) -> f64 {
    let questions = section.questions();
    let weight_total: f64 = questions.iter().map(|question| question.weight).sum();
    if weight_total <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = questions
        .iter()
        .map(|question| {
            let answer = answers
                .get(question.id)
                .copied()
                .unwrap_or(ControlAnswer::Partially);
            answer.risk() * question.weight
        })
        .sum();
    (weighted / weight_total * 100.0).round() / 100.0
}

/// Scores the control sections the user engaged with: the profile's active
/// sections plus any other section with at least one answer. Nothing is
/// scored when no control question was answered.
pub fn score_sections(
    tags: &BTreeSet<ProfileTag>,
    answers: &BTreeMap<String, ControlAnswer>,
) -> Vec<SectionScore> {
    if answers.is_empty() {
        return Vec::new();
    }
    let active = active_sections(tags);
    ControlSection::ordered()
        .into_iter()
        .filter(|section| {
            active.contains(section)
                || section
                    .questions()
                    .iter()
                    .any(|question| answers.contains_key(question.id))
        })
        .map(|section| {
            let score = section_score(section, answers);
            SectionScore {
                section,
                score,
                level: ControlLevel::from_score(score),
            }
        })
        .collect()
}
