use anyhow::{anyhow, bail, Result};

use crate::lead::parse_amount;

/// Range expression used by bucket tables.
///
/// Bounds accept a `K`/`M`/`B` suffix, so revenue buckets can be written as
/// `">20M"` or `"5M-20M"`.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(u64),
    LessEqual(u64),
    GreaterThan(u64),
    GreaterEqual(u64),
    Equal(u64),
    Between(u64, u64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(parse_bound(val)?))
        } else if s.contains('-') && !s.starts_with('-') {
            // Range format: "50-200"
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low = parse_bound(parts[0])?;
                let high = parse_bound(parts[1])?;
                if low > high {
                    bail!("Range lower bound exceeds upper bound: {}", s)
                }
                Ok(RangeOp::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(RangeOp::Equal(parse_bound(s)?))
        }
    }

    pub fn matches(&self, value: u64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }

    /// Match a fractional value (revenue in dollars) against the bounds.
    pub fn matches_f64(&self, value: f64) -> bool {
        match *self {
            RangeOp::LessThan(n) => value < n as f64,
            RangeOp::LessEqual(n) => value <= n as f64,
            RangeOp::GreaterThan(n) => value > n as f64,
            RangeOp::GreaterEqual(n) => value >= n as f64,
            RangeOp::Equal(n) => value == n as f64,
            RangeOp::Between(low, high) => value >= low as f64 && value <= high as f64,
        }
    }
}

fn parse_bound(s: &str) -> Result<u64> {
    let s = s.trim();
    let value = parse_amount(s).ok_or_else(|| anyhow!("Invalid bound '{}'", s))?;
    if value.fract() != 0.0 || value > u64::MAX as f64 {
        bail!("Bound must be a whole number: {}", s)
    }
    Ok(value as u64)
}

/// First keyword (lowercased) that `haystack` contains.
pub fn contains_any<S: AsRef<str>>(haystack: &str, keywords: &[S]) -> Option<String> {
    keywords.iter().find_map(|keyword| {
        let keyword = keyword.as_ref().trim().to_lowercase();
        if !keyword.is_empty() && haystack.contains(&keyword) {
            Some(keyword)
        } else {
            None
        }
    })
}
