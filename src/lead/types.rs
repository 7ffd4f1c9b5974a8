use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A single loosely-typed cell from an input row.
///
/// CSV cells always arrive as `Text`; JSON input keeps its native type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Textual form of the value, `None` for null.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawValue::Null => None,
            RawValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            RawValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            RawValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }

    /// True for null and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// Render integral floats without a trailing ".0" so "50" stays "50".
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One input row: column name to cell.
pub type RawRecord = BTreeMap<String, RawValue>;

/// Strongly-typed view of one input row.
///
/// Required fields are always present (possibly null or empty); a row that
/// lacks one of their columns never becomes a `RawLead`. Optional fields are
/// `None` when the column does not exist at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLead {
    pub industry: RawValue,
    pub employee_count: RawValue,
    pub revenue: RawValue,
    pub owner_title: RawValue,
    pub owner_email: RawValue,
    pub linkedin_url: RawValue,
    pub description: RawValue,
    pub owner_name: Option<RawValue>,
    pub company: Option<RawValue>,
}

impl RawLead {
    /// Display name for the lead's company, empty when unknown.
    pub fn company_name(&self) -> String {
        self.company
            .as_ref()
            .and_then(|v| v.as_text())
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

/// Canonical, immutable view of a lead used by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedLead {
    /// Trimmed lowercase industry; empty when unknown
    pub industry_key: String,
    pub employee_count: Option<u64>,
    /// Revenue in dollars
    pub revenue_value: Option<f64>,
    /// Trimmed lowercase job title; empty when unknown
    pub title_key: String,
    pub has_email: bool,
    pub has_linkedin: bool,
    /// `None` when the record carries no owner name column
    pub has_owner_name: Option<bool>,
    pub description_is_placeholder: bool,
    /// Employee count was present but could not be parsed
    pub employee_count_invalid: bool,
    /// Revenue was present but could not be parsed
    pub revenue_invalid: bool,
}
