use super::domain::{
    ChoiceOption, ConfidenceScale, Domain, DomainWeight, OptionTag, Scenario, ScenarioId,
    TaskGroup,
};

/// Ordered set of micro-simulations presented during the simulation stage.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    pub fn standard() -> Self {
        Self {
            scenarios: standard_scenarios(),
        }
    }

    pub fn from_scenarios(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&Scenario> {
        self.scenarios.get(index)
    }
}

fn option(text: &'static str, tag: OptionTag, weight: i16) -> ChoiceOption {
    ChoiceOption { text, tag, weight }
}

fn confidence(default: u8) -> ConfidenceScale {
    ConfidenceScale {
        prompt: "How confident are you?",
        min: 0,
        max: 100,
        default,
    }
}

fn weights(pairs: &[(Domain, f64)]) -> Vec<DomainWeight> {
    pairs
        .iter()
        .map(|&(domain, proportion)| DomainWeight { domain, proportion })
        .collect()
}

fn standard_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: ScenarioId::SupplierInvoice,
            title: "Supplier invoice change",
            narrative: "A supplier emails to 'update their bank details' for an unpaid invoice. There's a 'View invoice' button.",
            evidence: vec![
                "Reply-To: acme-billing@acme-supplies.co (display name: Acme Supplies)",
                "Link preview: acme-support-billing.com/invoices/...",
                "Tone: polite, a little urgent; mentions late fees",
            ],
            cues: TaskGroup {
                prompt: "Which details make you pause? (pick up to 3)",
                options: vec![
                    option("New bank details + urgency", OptionTag::CueNewIban, 2),
                    option("Reply-To differs from display name", OptionTag::CueReplyTo, 2),
                    option("Link domain not the usual portal", OptionTag::CueDomain, 2),
                    option("Looks fine to me", OptionTag::CueNone, -2),
                ],
                max_select: 3,
            },
            actions: TaskGroup {
                prompt: "What would you do first? (pick up to 2)",
                options: vec![
                    option("Call supplier via number in finance contacts", OptionTag::OobVerify, 3),
                    option("Reply to the email to confirm", OptionTag::ReplyEmail, -2),
                    option("Ask finance to cross-check IBAN in ERP", OptionTag::CrosscheckIban, 2),
                    option("Click the button and log in to verify", OptionTag::ClickLink, -3),
                    option("Hold the payment and open a ticket", OptionTag::HoldAndTicket, 2),
                ],
                max_select: 2,
            },
            confidence: confidence(60),
            domain_map: weights(&[
                (Domain::EmailAndAwareness, 0.5),
                (Domain::ResponseAndContinuity, 0.5),
            ]),
            hint_fix: "Maintain a verified supplier contact list and require two-channel verification for bank detail changes.",
        },
        Scenario {
            id: ScenarioId::CeoPayment,
            title: "CEO urgent payment request",
            narrative: "A late-evening message from a senior exec asks you to make a confidential, urgent transfer and to bypass the usual approvals.",
            evidence: vec![
                "Sent from: gmail.com address; signature looks copied",
                "‘Handle personally’ and ‘urgent’ language",
                "Mentions a supplier you recognise",
            ],
            cues: TaskGroup {
                prompt: "What looks off? (pick up to 3)",
                options: vec![
                    option("Non-corporate sender address", OptionTag::CueSender, 2),
                    option("Bypass normal approvals", OptionTag::CueBypass, 2),
                    option("Unusual time and secrecy", OptionTag::CueTimeSecrecy, 2),
                    option("Nothing stands out", OptionTag::CueNone, -2),
                ],
                max_select: 3,
            },
            actions: TaskGroup {
                prompt: "What do you do? (pick up to 2)",
                options: vec![
                    option("Verify via known company channel", OptionTag::OobVerify, 3),
                    option("Proceed due to authority", OptionTag::ComplyAuthority, -3),
                    option("Log the event and notify finance lead", OptionTag::LogAndNotify, 2),
                    option("Ask for details by replying to the same email", OptionTag::ReplyEmail, -2),
                ],
                max_select: 2,
            },
            confidence: confidence(65),
            domain_map: weights(&[
                (Domain::Governance, 0.3),
                (Domain::ResponseAndContinuity, 0.7),
            ]),
            hint_fix: "Document payment approvals; never bypass without two approvers and an out-of-band check.",
        },
        Scenario {
            id: ScenarioId::PasswordReset,
            title: "Password-reset alert",
            narrative: "You receive a ‘reset your password’ alert after ‘unusual sign-in activity’.",
            evidence: vec![
                "Shortened URL; padlock icon; generic greeting",
                "Domain looks close to your vendor but isn’t exact",
            ],
            cues: TaskGroup {
                prompt: "Spot the cues (pick up to 3)",
                options: vec![
                    option("Shortened or mismatched URL", OptionTag::CueUrl, 2),
                    option("Generic greeting / odd branding", OptionTag::CueGeneric, 2),
                    option("Time pressure to click", OptionTag::CuePressure, 2),
                    option("Looks legit", OptionTag::CueNone, -2),
                ],
                max_select: 3,
            },
            actions: TaskGroup {
                prompt: "What’s your move? (pick up to 2)",
                options: vec![
                    option("Navigate to the site yourself (no link)", OptionTag::NavDirect, 3),
                    option("Use the report-phish button", OptionTag::ReportButton, 2),
                    option("Click the link and log in to check", OptionTag::ClickLink, -3),
                    option("Reply asking if this is real", OptionTag::ReplyEmail, -2),
                ],
                max_select: 2,
            },
            confidence: confidence(70),
            domain_map: weights(&[
                (Domain::AccessAndAccounts, 0.5),
                (Domain::EmailAndAwareness, 0.5),
            ]),
            hint_fix: "Teach ‘navigate, don’t click’; enable an easy report button.",
        },
        Scenario {
            id: ScenarioId::LostLaptop,
            title: "Laptop lost on the train",
            narrative: "A staff laptop is left on a train during a business trip.",
            evidence: vec![
                "The device holds email and synced files",
                "Unsure whether disk encryption is on",
            ],
            cues: TaskGroup {
                prompt: "What matters most here? (pick up to 2)",
                options: vec![
                    option("Data may be accessible if not encrypted", OptionTag::CueEncrypt, 2),
                    option("Tokens/sessions may still be valid", OptionTag::CueTokens, 2),
                    option("We can probably ignore if it’s passworded", OptionTag::CueIgnore, -2),
                ],
                max_select: 2,
            },
            actions: TaskGroup {
                prompt: "What do you do first? (pick up to 2)",
                options: vec![
                    option("Trigger remote wipe / lock", OptionTag::RemoteWipe, 3),
                    option("Revoke tokens & reset credentials", OptionTag::RevokeTokens, 2),
                    option("Wait a week to see if it turns up", OptionTag::WaitAndSee, -3),
                    option("Log the incident and notify insurer", OptionTag::LogAndNotify, 2),
                ],
                max_select: 2,
            },
            confidence: confidence(60),
            domain_map: weights(&[
                (Domain::Devices, 0.6),
                (Domain::ResponseAndContinuity, 0.4),
            ]),
            hint_fix: "Enforce full-disk encryption and keep MDM ready for remote lock/wipe.",
        },
        Scenario {
            id: ScenarioId::CloudSharing,
            title: "Cloud sharing mishap",
            narrative: "A public link to a cloud folder with recent invoices was shared with a client by mistake.",
            evidence: vec![
                "Link has no expiry; folder contains customer details",
                "Default sharing allows ‘Anyone with the link’",
            ],
            cues: TaskGroup {
                prompt: "What’s risky here? (pick up to 3)",
                options: vec![
                    option("Public link and no expiry", OptionTag::CuePublic, 2),
                    option("Sensitive data present", OptionTag::CueSensitive, 2),
                    option("Default ‘Anyone’ sharing", OptionTag::CueDefault, 2),
                    option("No obvious risk", OptionTag::CueNone, -2),
                ],
                max_select: 3,
            },
            actions: TaskGroup {
                prompt: "What would you do now? (pick up to 2)",
                options: vec![
                    option("Remove public access / rotate link", OptionTag::RemovePublic, 3),
                    option("Notify affected team and document", OptionTag::LogAndNotify, 2),
                    option("Leave as is but monitor", OptionTag::DoNothing, -3),
                    option("Review sharing defaults for the workspace", OptionTag::ReviewDefaults, 2),
                ],
                max_select: 2,
            },
            confidence: confidence(65),
            domain_map: weights(&[(Domain::DataAndBackups, 0.6), (Domain::Governance, 0.4)]),
            hint_fix: "Set workspace sharing defaults; require expiry and least-privilege links.",
        },
    ]
}
