use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::config::ScoringConfig;
use crate::lead::NormalizedLead;

/// Data-integrity issue detected on a lead.
///
/// Flags are informational: they never change the score and any subset can
/// fire at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Neither email nor LinkedIn present
    MissingContact,
    MissingEmail,
    /// Owner name column exists but is blank
    MissingOwnerName,
    MissingTitle,
    /// Zero employees alongside revenue above the suspicious threshold
    SuspiciousSizeRevenue,
    /// Neither a positive employee count nor a positive revenue
    MissingSizeRevenue,
    InvalidEmployeeCount,
    InvalidRevenue,
    BlankLinkedin,
    VagueDescription,
    UnknownIndustry,
}

impl Flag {
    pub const ALL: [Flag; 11] = [
        Flag::MissingContact,
        Flag::MissingEmail,
        Flag::MissingOwnerName,
        Flag::MissingTitle,
        Flag::SuspiciousSizeRevenue,
        Flag::MissingSizeRevenue,
        Flag::InvalidEmployeeCount,
        Flag::InvalidRevenue,
        Flag::BlankLinkedin,
        Flag::VagueDescription,
        Flag::UnknownIndustry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::MissingContact => "missing_contact",
            Flag::MissingEmail => "missing_email",
            Flag::MissingOwnerName => "missing_owner_name",
            Flag::MissingTitle => "missing_title",
            Flag::SuspiciousSizeRevenue => "suspicious_size_revenue",
            Flag::MissingSizeRevenue => "missing_size_revenue",
            Flag::InvalidEmployeeCount => "invalid_employee_count",
            Flag::InvalidRevenue => "invalid_revenue",
            Flag::BlankLinkedin => "blank_linkedin",
            Flag::VagueDescription => "vague_description",
            Flag::UnknownIndustry => "unknown_industry",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when a zero-employee company reports revenue above the threshold.
pub fn is_suspicious_size_revenue(lead: &NormalizedLead, config: &ScoringConfig) -> bool {
    matches!(
        (lead.employee_count, lead.revenue_value),
        (Some(0), Some(revenue)) if revenue > config.suspicious_revenue_threshold()
    )
}

/// Evaluate every integrity rule against a normalized lead.
pub fn detect_flags(lead: &NormalizedLead, config: &ScoringConfig) -> BTreeSet<Flag> {
    let mut flags = BTreeSet::new();

    if !lead.has_email && !lead.has_linkedin {
        flags.insert(Flag::MissingContact);
    }
    if !lead.has_email {
        flags.insert(Flag::MissingEmail);
    }
    if lead.has_owner_name == Some(false) {
        flags.insert(Flag::MissingOwnerName);
    }
    if lead.title_key.is_empty() {
        flags.insert(Flag::MissingTitle);
    }
    if is_suspicious_size_revenue(lead, config) {
        flags.insert(Flag::SuspiciousSizeRevenue);
    }

    let has_size = lead.employee_count.is_some_and(|n| n > 0);
    let has_revenue = lead.revenue_value.is_some_and(|v| v > 0.0);
    if !has_size && !has_revenue {
        flags.insert(Flag::MissingSizeRevenue);
    }

    if lead.employee_count_invalid {
        flags.insert(Flag::InvalidEmployeeCount);
    }
    if lead.revenue_invalid {
        flags.insert(Flag::InvalidRevenue);
    }
    if !lead.has_linkedin {
        flags.insert(Flag::BlankLinkedin);
    }
    if lead.description_is_placeholder {
        flags.insert(Flag::VagueDescription);
    }
    if lead.industry_key.is_empty() {
        flags.insert(Flag::UnknownIndustry);
    }

    flags
}

/// Join flag names for display: "missing_email, blank_linkedin".
pub fn join_flags(flags: &BTreeSet<Flag>) -> String {
    flags
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
