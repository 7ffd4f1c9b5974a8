use serde::{Deserialize, Serialize};

use crate::lead::config::to_strings;

/// Default upper bound of the score range.
pub const DEFAULT_SCORE_SCALE: u32 = 100;

/// Default revenue (dollars) above which a zero-employee company is suspicious.
pub const DEFAULT_SUSPICIOUS_REVENUE: f64 = 1_000_000.0;

/// Main scoring configuration.
///
/// Defines how lead scores are calculated. Every factor is optional; an
/// absent factor contributes nothing. Contributions are summed and the total
/// is clamped to `[0, score_scale]`.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   score_scale: 100
///   suspicious_revenue_threshold: 1000000
///   distrust_suspicious_revenue: true
///   industry:
///     preferred: ["saas", "fintech"]
///     bonus: 30
///     other_bonus: 5
///   size:
///     buckets:
///       - { range: ">200", bonus: 25 }
///       - { range: "50-200", bonus: 15 }
///   revenue:
///     buckets:
///       - { range: ">20M", bonus: 25 }
///   seniority:
///     - { keywords: ["ceo", "founder"], bonus: 20 }
///   contact:
///     email: 10
///     linkedin: 10
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Upper bound of the output range (default: 100)
    #[serde(default)]
    pub score_scale: Option<u32>,

    /// Revenue in dollars above which a company with zero employees is
    /// flagged as inconsistent (default: 1,000,000)
    #[serde(default)]
    pub suspicious_revenue_threshold: Option<f64>,

    /// Award no revenue points when the lead is flagged
    /// `suspicious_size_revenue` (default: true)
    #[serde(default)]
    pub distrust_suspicious_revenue: Option<bool>,

    /// Industry fit factor
    #[serde(default)]
    pub industry: Option<IndustryConfig>,

    /// Company size factor, bucketed by employee count
    #[serde(default)]
    pub size: Option<BucketConfig>,

    /// Revenue factor, bucketed by dollars
    #[serde(default)]
    pub revenue: Option<BucketConfig>,

    /// Title seniority tiers; the first tier with a matching keyword wins
    #[serde(default)]
    pub seniority: Option<Vec<SeniorityTier>>,

    /// Contactability bonuses
    #[serde(default)]
    pub contact: Option<ContactConfig>,
}

impl ScoringConfig {
    pub fn score_scale(&self) -> u32 {
        self.score_scale.unwrap_or(DEFAULT_SCORE_SCALE)
    }

    pub fn suspicious_revenue_threshold(&self) -> f64 {
        self.suspicious_revenue_threshold
            .unwrap_or(DEFAULT_SUSPICIOUS_REVENUE)
    }

    pub fn distrust_suspicious_revenue(&self) -> bool {
        self.distrust_suspicious_revenue.unwrap_or(true)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score_scale: Some(DEFAULT_SCORE_SCALE),
            suspicious_revenue_threshold: Some(DEFAULT_SUSPICIOUS_REVENUE),
            distrust_suspicious_revenue: Some(true),
            industry: Some(IndustryConfig {
                preferred: to_strings(&[
                    "saas",
                    "fintech",
                    "healthtech",
                    "cloud computing",
                    "cybersecurity",
                    "artificial intelligence",
                    "data analytics",
                ]),
                bonus: 30,
                other_bonus: Some(5),
            }),
            size: Some(BucketConfig {
                buckets: vec![
                    Bucket::new(">200", 25),
                    Bucket::new("50-200", 15),
                    Bucket::new("1-49", 5),
                ],
            }),
            revenue: Some(BucketConfig {
                buckets: vec![
                    Bucket::new(">20M", 25),
                    Bucket::new("5M-20M", 15),
                    Bucket::new("1M-5M", 5),
                ],
            }),
            seniority: Some(vec![
                SeniorityTier {
                    keywords: to_strings(&["ceo", "founder", "cto", "ciso", "chief", "president"]),
                    bonus: 20,
                },
                SeniorityTier {
                    keywords: to_strings(&["owner", "head", "director", "vp", "vice president"]),
                    bonus: 10,
                },
            ]),
            contact: Some(ContactConfig {
                email: 10,
                linkedin: 10,
            }),
        }
    }
}

/// Industry fit factor.
///
/// An industry matches when it equals or contains a preferred entry
/// ("fintech platform" matches "fintech").
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IndustryConfig {
    /// Preferred industries (case-insensitive)
    pub preferred: Vec<String>,

    /// Bonus for a preferred industry
    pub bonus: u32,

    /// Bonus for any other known industry
    #[serde(default)]
    pub other_bonus: Option<u32>,
}

/// Bucket table. The first bucket whose range matches wins.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BucketConfig {
    pub buckets: Vec<Bucket>,
}

/// Maps a value range to a bonus.
/// Range format: "<N", "<=N", ">N", ">=N", "N-M" (inclusive range), "N";
/// bounds may carry a K/M/B suffix.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Bucket {
    /// Range expression (e.g., ">200", "5M-20M")
    pub range: String,

    /// Points added when the range matches
    pub bonus: u32,
}

impl Bucket {
    pub fn new(range: &str, bonus: u32) -> Self {
        Self {
            range: range.to_string(),
            bonus,
        }
    }
}

/// Title seniority tier, matched by keyword substring.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeniorityTier {
    pub keywords: Vec<String>,
    pub bonus: u32,
}

/// Bonus per contact channel present.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContactConfig {
    #[serde(default)]
    pub email: u32,
    #[serde(default)]
    pub linkedin: u32,
}
