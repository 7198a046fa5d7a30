use super::super::controls::{BaselinePractices, ControlAnswer};
use super::super::intake::{BusinessSize, ProfileTag, Region, WorkEnvironment};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub(crate) struct RuleOutput {
    pub quick_wins: Vec<&'static str>,
    pub foundations: Vec<&'static str>,
    pub next_level: Vec<&'static str>,
}

const HIGH_GOVERNANCE_RISK: f64 = 1.2;
const MEDIUM_GOVERNANCE_RISK: f64 = 0.6;

pub(crate) fn governance_rules(score: f64, tags: &BTreeSet<ProfileTag>) -> RuleOutput {
    let mut output = RuleOutput::default();

    if score >= HIGH_GOVERNANCE_RISK {
        output.quick_wins.extend([
            "Assign a clear cybersecurity lead (internal or MSP).",
            "Publish a 1-page information-security policy approved by management.",
        ]);
        if tags.contains(&ProfileTag::Size(BusinessSize::Micro)) {
            output
                .quick_wins
                .push("For micro orgs, the owner can be the named security contact.");
        }
    } else if score >= MEDIUM_GOVERNANCE_RISK {
        output.foundations.extend([
            "Add cybersecurity to your annual planning/board agenda.",
            "Maintain a simple risk/incident log reviewed quarterly.",
        ]);
    } else {
        output.next_level.push(
            "Integrate cyber metrics (incidents, MFA adoption) into leadership dashboards.",
        );
    }

    output
}

pub(crate) fn baseline_hooks(practices: &BaselinePractices) -> Vec<&'static str> {
    let mut quick = Vec::new();

    if practices.public_website == Some(true) && practices.https != Some(ControlAnswer::Yes) {
        quick.push("Enable HTTPS and force redirect (HTTP to HTTPS).");
    }
    if matches!(
        practices.business_email,
        Some(ControlAnswer::No | ControlAnswer::Partially)
    ) {
        quick.push("Move to business email (M365/Google) and enforce MFA for all users.");
    }
    if !matches!(
        practices.device_inventory,
        Some(ControlAnswer::Yes | ControlAnswer::Partially)
    ) {
        quick.push("Start a simple device inventory (sheet or MDM export).");
    }
    if matches!(
        practices.byod,
        Some(ControlAnswer::Yes | ControlAnswer::Partially)
    ) {
        quick.push(
            "Publish a BYOD rule of 5: screen lock, updates, disk encryption, MFA for email, approved apps.",
        );
    }

    quick
}

pub(crate) fn tag_hooks(tags: &BTreeSet<ProfileTag>) -> RuleOutput {
    let mut output = RuleOutput {
        foundations: vec![
            "Turn on automatic OS & app updates; remove unsupported systems.",
            "Automate backups and test a restore quarterly.",
        ],
        ..RuleOutput::default()
    };

    if tags.contains(&ProfileTag::Infrastructure(WorkEnvironment::CloudApps))
        || tags.contains(&ProfileTag::Region(Region::OtherOrMulti))
    {
        output.next_level.push(
            "Review key vendor contracts: breach notification, data location/transfer, and admin MFA.",
        );
    }
    if tags.contains(&ProfileTag::CardPayments) {
        output.next_level.push(
            "Confirm PCI DSS responsibilities with your PoS/PSP (often most of the burden is on the provider).",
        );
    }
    if tags.contains(&ProfileTag::Region(Region::EuEea)) || tags.contains(&ProfileTag::Region(Region::Uk)) {
        output.next_level.push(
            "Document GDPR basics: Records of Processing, DPAs, and a contact for data requests.",
        );
    }

    output
}
