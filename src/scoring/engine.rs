use serde::Serialize;
use std::collections::BTreeSet;

use super::config::{Bucket, ScoringConfig};
use super::factors::{contains_any, RangeOp};
use super::flags::{detect_flags, is_suspicious_size_revenue, Flag};
use crate::lead::NormalizedLead;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Industry", "Size", "Contact"
    pub description: String, // e.g. "matched 'saas'", "120 employees, matched '50-200'"
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Sum of all contributions before clamping
    pub total: u32,
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    pub flags: BTreeSet<Flag>,
    pub breakdown: ScoreBreakdown,
}

impl ScoreResult {
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Score a normalized lead and collect its integrity flags.
///
/// Pure and deterministic. Unknown signals contribute nothing; the summed
/// contributions are clamped (not rescaled) to `[0, score_scale]`.
pub fn score(lead: &NormalizedLead, config: &ScoringConfig) -> ScoreResult {
    let mut factors = Vec::new();

    // Industry fit
    if let Some(ref industry) = config.industry {
        if !lead.industry_key.is_empty() {
            if let Some(matched) = contains_any(&lead.industry_key, &industry.preferred) {
                factors.push(FactorContribution {
                    label: "Industry".to_string(),
                    description: format!("preferred industry '{}'", matched),
                    points: industry.bonus,
                });
            } else if let Some(other) = industry.other_bonus {
                factors.push(FactorContribution {
                    label: "Industry".to_string(),
                    description: format!("other industry '{}'", lead.industry_key),
                    points: other,
                });
            }
        }
    }

    // Company size
    if let (Some(size), Some(employees)) = (&config.size, lead.employee_count) {
        if let Some(bucket) = match_bucket(employees, &size.buckets) {
            factors.push(FactorContribution {
                label: "Size".to_string(),
                description: format!("{} employees, matched '{}'", employees, bucket.range),
                points: bucket.bonus,
            });
        }
    }

    // Revenue
    if let (Some(revenue), Some(dollars)) = (&config.revenue, lead.revenue_value) {
        if config.distrust_suspicious_revenue() && is_suspicious_size_revenue(lead, config) {
            factors.push(FactorContribution {
                label: "Revenue".to_string(),
                description: format!("${:.0} ignored: zero employees", dollars),
                points: 0,
            });
        } else if let Some(bucket) = match_revenue_bucket(dollars, &revenue.buckets) {
            factors.push(FactorContribution {
                label: "Revenue".to_string(),
                description: format!("${:.0}, matched '{}'", dollars, bucket.range),
                points: bucket.bonus,
            });
        }
    }

    // Title seniority
    if let Some(ref tiers) = config.seniority {
        if !lead.title_key.is_empty() {
            let matched = tiers.iter().find_map(|tier| {
                contains_any(&lead.title_key, &tier.keywords).map(|keyword| (tier, keyword))
            });
            if let Some((tier, keyword)) = matched {
                factors.push(FactorContribution {
                    label: "Seniority".to_string(),
                    description: format!("title matched '{}'", keyword),
                    points: tier.bonus,
                });
            }
        }
    }

    // Contactability
    if let Some(ref contact) = config.contact {
        if lead.has_email {
            factors.push(FactorContribution {
                label: "Email".to_string(),
                description: "email present".to_string(),
                points: contact.email,
            });
        }
        if lead.has_linkedin {
            factors.push(FactorContribution {
                label: "LinkedIn".to_string(),
                description: "LinkedIn present".to_string(),
                points: contact.linkedin,
            });
        }
    }

    let total = factors
        .iter()
        .fold(0u32, |acc, f| acc.saturating_add(f.points));

    ScoreResult {
        score: total.min(config.score_scale()),
        flags: detect_flags(lead, config),
        breakdown: ScoreBreakdown { total, factors },
    }
}

/// First bucket whose range matches `value`. Buckets with unparseable ranges
/// are skipped; `validate_scoring` reports them at startup.
fn match_bucket(value: u64, buckets: &[Bucket]) -> Option<&Bucket> {
    buckets.iter().find(|bucket| {
        RangeOp::parse(&bucket.range)
            .map(|range| range.matches(value))
            .unwrap_or(false)
    })
}

/// Like `match_bucket`, compared in dollars without rounding.
fn match_revenue_bucket(dollars: f64, buckets: &[Bucket]) -> Option<&Bucket> {
    buckets.iter().find(|bucket| {
        RangeOp::parse(&bucket.range)
            .map(|range| range.matches_f64(dollars))
            .unwrap_or(false)
    })
}
