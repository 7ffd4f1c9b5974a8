use super::config::NormalizerConfig;
use super::types::{NormalizedLead, RawLead, RawValue};

/// Normalize a raw lead into its canonical form.
///
/// Total: every input produces a `NormalizedLead`. Unparseable values become
/// unknown and are marked invalid so validation can flag them.
pub fn normalize(raw: &RawLead, config: &NormalizerConfig) -> NormalizedLead {
    let markers = config.missing_markers.as_deref().unwrap_or(&[]);

    let (employee_count, employee_count_invalid) = if is_missing(&raw.employee_count, markers) {
        (None, false)
    } else {
        match parse_employee_count(&raw.employee_count) {
            Some(n) => (Some(n), false),
            None => (None, true),
        }
    };

    let (revenue_value, revenue_invalid) = if is_missing(&raw.revenue, markers) {
        (None, false)
    } else {
        match parse_revenue(&raw.revenue) {
            Some(v) => (Some(v), false),
            None => (None, true),
        }
    };

    NormalizedLead {
        industry_key: text_key(&raw.industry, markers),
        employee_count,
        revenue_value,
        title_key: text_key(&raw.owner_title, markers),
        has_email: !text_key(&raw.owner_email, markers).is_empty(),
        has_linkedin: !text_key(&raw.linkedin_url, markers).is_empty(),
        has_owner_name: raw
            .owner_name
            .as_ref()
            .map(|name| !text_key(name, markers).is_empty()),
        description_is_placeholder: is_placeholder(&raw.description, markers, config),
        employee_count_invalid,
        revenue_invalid,
    }
}

/// Trimmed, lowercased text; empty for null, blank, or a missing marker.
pub fn text_key(value: &RawValue, markers: &[String]) -> String {
    let Some(text) = value.as_text() else {
        return String::new();
    };
    let key = text.trim().to_lowercase();
    if markers.iter().any(|m| m.trim().eq_ignore_ascii_case(&key)) {
        String::new()
    } else {
        key
    }
}

fn is_missing(value: &RawValue, markers: &[String]) -> bool {
    value.is_blank() || text_key(value, markers).is_empty()
}

fn is_placeholder(value: &RawValue, markers: &[String], config: &NormalizerConfig) -> bool {
    let key = text_key(value, markers);
    if key.is_empty() {
        return true;
    }
    config
        .placeholder_phrases
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .any(|phrase| key.contains(&phrase.trim().to_lowercase()))
}

/// Parse a revenue cell into dollars.
///
/// Accepts an optional leading currency symbol, thousands separators, and a
/// `K`/`M`/`B` magnitude suffix: `"$4.7M"` is `4_700_000.0`. Returns `None`
/// for anything else, including negative amounts.
pub fn parse_revenue(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(n) => non_negative(*n),
        RawValue::Text(s) => parse_amount(s),
        RawValue::Null | RawValue::Bool(_) => None,
    }
}

/// Parse an amount such as `"$4.7M"`, `"500k"`, or `"1,000,000"`.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches(['$', '€', '£'])
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .collect();

    let (number, multiplier) = match cleaned.chars().last()? {
        'k' | 'K' => (&cleaned[..cleaned.len() - 1], 1e3),
        'm' | 'M' => (&cleaned[..cleaned.len() - 1], 1e6),
        'b' | 'B' => (&cleaned[..cleaned.len() - 1], 1e9),
        _ => (cleaned.as_str(), 1.0),
    };

    // Reject what f64::from_str would otherwise accept ("inf", "NaN", "1e5").
    if number.is_empty()
        || !number
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '+' || c == '-')
    {
        return None;
    }

    let value: f64 = number.parse().ok()?;
    non_negative(value * multiplier)
}

/// Parse an employee count.
///
/// Accepts integers, numeric strings, thousands separators (`"1,200"`), a
/// trailing plus (`"100+"`), ranges (`"50-100"` yields the lower bound) and
/// integral decimals. Negative or non-numeric input is `None`.
pub fn parse_employee_count(value: &RawValue) -> Option<u64> {
    match value {
        RawValue::Number(n) => non_negative(*n).map(|n| n.trunc() as u64),
        RawValue::Text(s) => {
            let cleaned: String = s
                .trim()
                .trim_end_matches('+')
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
                .collect();
            if cleaned.is_empty() || cleaned.starts_with('-') {
                return None;
            }
            let lower = cleaned.split('-').next().unwrap_or_default();
            if !lower.chars().all(|c| c.is_ascii_digit() || c == '.') {
                return None;
            }
            match lower.parse::<u64>() {
                Ok(n) => Some(n),
                Err(_) => lower
                    .parse::<f64>()
                    .ok()
                    .and_then(non_negative)
                    .map(|n| n.trunc() as u64),
            }
        }
        RawValue::Null | RawValue::Bool(_) => None,
    }
}

fn non_negative(n: f64) -> Option<f64> {
    if n.is_finite() && n >= 0.0 {
        Some(n)
    } else {
        None
    }
}
