use super::types::{RawLead, RawRecord, RawValue};
use crate::error::LeadError;

/// Logical lead fields and the column headers accepted for each.
///
/// Headers are matched after `column_key` folding, so "Employees Count",
/// "employees-count" and "employees_count" are the same column. Aliases are
/// tried in order; the first one present wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Industry,
    EmployeeCount,
    Revenue,
    OwnerTitle,
    OwnerEmail,
    LinkedinUrl,
    Description,
    OwnerName,
    Company,
}

impl Field {
    /// Fields whose column must exist in every record.
    pub const REQUIRED: [Field; 7] = [
        Field::Industry,
        Field::EmployeeCount,
        Field::Revenue,
        Field::OwnerTitle,
        Field::OwnerEmail,
        Field::LinkedinUrl,
        Field::Description,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Industry => "industry",
            Field::EmployeeCount => "employee_count",
            Field::Revenue => "revenue",
            Field::OwnerTitle => "owner_title",
            Field::OwnerEmail => "owner_email",
            Field::LinkedinUrl => "linkedin_url",
            Field::Description => "description",
            Field::OwnerName => "owner_name",
            Field::Company => "company",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Industry => &["industry"],
            Field::EmployeeCount => &["employee_count", "employees_count", "employees"],
            Field::Revenue => &["revenue", "annual_revenue"],
            Field::OwnerTitle => &["owner_title", "job_title", "title"],
            Field::OwnerEmail => &["owner_email", "email"],
            Field::LinkedinUrl => &[
                "linkedin_url",
                "owner_linkedin",
                "company_linkedin",
                "linkedin",
            ],
            Field::Description => &["description", "company_description"],
            Field::OwnerName => &["owner_name", "contact_name"],
            Field::Company => &["company", "company_name"],
        }
    }

    /// Find the header in `record` that holds this field, if any.
    pub fn find_column<'a>(self, record: &'a RawRecord) -> Option<&'a str> {
        self.aliases().iter().find_map(|alias| {
            record
                .keys()
                .find(|key| column_key(key) == *alias)
                .map(String::as_str)
        })
    }

    fn lookup(self, record: &RawRecord) -> Option<RawValue> {
        self.find_column(record)
            .and_then(|column| record.get(column))
            .cloned()
    }
}

/// Fold a header into its lookup key: trimmed, lowercase, spaces and dashes
/// as underscores.
pub fn column_key(header: &str) -> String {
    header
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl RawLead {
    /// Build a typed lead from a raw row.
    ///
    /// A required column that is absent (as opposed to present but empty) is a
    /// schema mismatch and yields `LeadError::MalformedRecord` naming every
    /// missing field.
    pub fn from_record(record: &RawRecord) -> Result<Self, LeadError> {
        let missing: Vec<String> = Field::REQUIRED
            .iter()
            .filter(|field| field.find_column(record).is_none())
            .map(|field| field.name().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(LeadError::MalformedRecord { missing });
        }

        let required = |field: Field| field.lookup(record).unwrap_or_default();

        Ok(RawLead {
            industry: required(Field::Industry),
            employee_count: required(Field::EmployeeCount),
            revenue: required(Field::Revenue),
            owner_title: required(Field::OwnerTitle),
            owner_email: required(Field::OwnerEmail),
            linkedin_url: required(Field::LinkedinUrl),
            description: required(Field::Description),
            owner_name: Field::OwnerName.lookup(record),
            company: Field::Company.lookup(record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), RawValue::from(*v)))
            .collect()
    }

    fn full_record() -> RawRecord {
        record(&[
            ("industry", "SaaS"),
            ("employee_count", "50"),
            ("revenue", "$2M"),
            ("owner_title", "CEO"),
            ("owner_email", "a@b.com"),
            ("linkedin_url", ""),
            ("description", ""),
        ])
    }

    #[test]
    fn test_column_key_folding() {
        assert_eq!(column_key(" Employees Count "), "employees_count");
        assert_eq!(column_key("Owner-LinkedIn"), "owner_linkedin");
    }

    #[test]
    fn test_from_record_canonical_columns() {
        let lead = RawLead::from_record(&full_record()).unwrap();
        assert_eq!(lead.industry, RawValue::from("SaaS"));
        assert_eq!(lead.revenue, RawValue::from("$2M"));
        assert_eq!(lead.linkedin_url, RawValue::from(""));
        assert!(lead.owner_name.is_none());
        assert!(lead.company.is_none());
    }

    #[test]
    fn test_from_record_original_headers() {
        let rec = record(&[
            ("Company", "Acme"),
            ("Industry", "FinTech"),
            ("Employees Count", "120"),
            ("Revenue", "$8M"),
            ("Owner Name", "Jane Doe"),
            ("Owner Title", "Founder"),
            ("Owner Email", "jane@acme.io"),
            ("Owner LinkedIn", "https://linkedin.com/in/jane"),
            ("Description", "Payments"),
        ]);
        let lead = RawLead::from_record(&rec).unwrap();
        assert_eq!(lead.employee_count, RawValue::from("120"));
        assert_eq!(lead.owner_name, Some(RawValue::from("Jane Doe")));
        assert_eq!(lead.company_name(), "Acme");
        assert_eq!(
            lead.linkedin_url,
            RawValue::from("https://linkedin.com/in/jane")
        );
    }

    #[test]
    fn test_alias_order_prefers_owner_linkedin() {
        let mut rec = full_record();
        rec.remove("linkedin_url");
        rec.insert("Company LinkedIn".to_string(), RawValue::from("company"));
        rec.insert("Owner LinkedIn".to_string(), RawValue::from("owner"));
        let lead = RawLead::from_record(&rec).unwrap();
        assert_eq!(lead.linkedin_url, RawValue::from("owner"));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let mut rec = full_record();
        rec.remove("industry");
        let err = RawLead::from_record(&rec).unwrap_err();
        assert_eq!(
            err,
            LeadError::MalformedRecord {
                missing: vec!["industry".to_string()]
            }
        );
    }

    #[test]
    fn test_reports_every_missing_column() {
        let rec = record(&[("industry", "SaaS")]);
        let LeadError::MalformedRecord { missing } = RawLead::from_record(&rec).unwrap_err();
        assert_eq!(missing.len(), 6);
        assert!(missing.contains(&"description".to_string()));
    }

    #[test]
    fn test_empty_value_is_not_malformed() {
        let mut rec = full_record();
        rec.insert("industry".to_string(), RawValue::Null);
        let lead = RawLead::from_record(&rec).unwrap();
        assert_eq!(lead.industry, RawValue::Null);
    }
}
