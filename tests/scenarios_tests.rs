use lead_bro::lead::{RawRecord, RawValue};
use lead_bro::pipeline::{evaluate, evaluate_batch, score_records, Rules};
use lead_bro::scoring::Flag;
use lead_bro::{LeadError, RawLead};

fn lead(fields: &[(&str, &str)]) -> RawLead {
    let mut raw = RawLead::default();
    for (name, value) in fields {
        let value = RawValue::from(*value);
        match *name {
            "industry" => raw.industry = value,
            "employee_count" => raw.employee_count = value,
            "revenue" => raw.revenue = value,
            "owner_title" => raw.owner_title = value,
            "owner_email" => raw.owner_email = value,
            "linkedin_url" => raw.linkedin_url = value,
            "description" => raw.description = value,
            other => panic!("unknown field {}", other),
        }
    }
    raw
}

fn record(fields: &[(&str, &str)]) -> RawRecord {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), RawValue::from(*v)))
        .collect()
}

#[test]
fn test_strong_lead_with_blank_linkedin() {
    let raw = RawLead {
        industry: "SaaS".into(),
        employee_count: RawValue::Number(50.0),
        revenue: "$2M".into(),
        owner_title: "CEO".into(),
        owner_email: "a@b.com".into(),
        linkedin_url: "".into(),
        description: "".into(),
        ..RawLead::default()
    };

    let result = evaluate(&raw, &Rules::default());

    assert!(result.has_flag(Flag::BlankLinkedin));
    assert!(result.has_flag(Flag::VagueDescription));
    assert!(!result.has_flag(Flag::MissingContact));
    assert!(result.score > 70);
    // industry 30 + size 15 + revenue 5 + title 20 + email 10
    assert_eq!(result.score, 80);
    let labels: Vec<&str> = result
        .breakdown
        .factors
        .iter()
        .filter(|f| f.points > 0)
        .map(|f| f.label.as_str())
        .collect();
    for label in ["Industry", "Size", "Revenue", "Seniority", "Email"] {
        assert!(labels.contains(&label), "missing {} in {:?}", label, labels);
    }
}

#[test]
fn test_shell_company_scores_near_zero() {
    let raw = lead(&[
        ("industry", ""),
        ("employee_count", "0"),
        ("revenue", "$4.7B"),
        ("owner_title", ""),
        ("owner_email", ""),
        ("linkedin_url", ""),
    ]);

    let result = evaluate(&raw, &Rules::default());

    for flag in [
        Flag::MissingContact,
        Flag::SuspiciousSizeRevenue,
        Flag::UnknownIndustry,
        Flag::VagueDescription,
    ] {
        assert!(result.has_flag(flag), "expected {}", flag);
    }
    assert_eq!(result.score, 0);
}

#[test]
fn test_unknown_size_and_revenue_score_title_and_contact_only() {
    let raw = lead(&[
        ("employee_count", "N/A"),
        ("revenue", "not available"),
        ("owner_title", "Manager"),
        ("owner_email", "x@y.com"),
        ("linkedin_url", "http://linkedin.com/in/someone"),
    ]);
    let rules = Rules::default();

    let normalized = lead_bro::normalize(&raw, &rules.normalize);
    assert_eq!(normalized.employee_count, None);
    assert_eq!(normalized.revenue_value, None);

    let result = evaluate(&raw, &rules);
    assert!(!result.has_flag(Flag::MissingContact));
    // "manager" is not a seniority keyword: email 10 + LinkedIn 10
    assert_eq!(result.score, 20);
    assert!(result
        .breakdown
        .factors
        .iter()
        .filter(|f| f.points > 0)
        .all(|f| f.label == "Email" || f.label == "LinkedIn"));
}

#[test]
fn test_same_record_twice_gives_same_result() {
    let raw = lead(&[
        ("industry", "Fintech"),
        ("employee_count", "1,200"),
        ("revenue", "$30M"),
        ("owner_title", "VP Sales"),
        ("owner_email", "vp@fin.io"),
        ("description", "Payments infrastructure"),
    ]);
    let rules = Rules::default();

    assert_eq!(evaluate(&raw, &rules), evaluate(&raw, &rules));
}

#[test]
fn test_missing_industry_column_is_rejected_without_stopping_batch() {
    let good = record(&[
        ("industry", "saas"),
        ("employee_count", "75"),
        ("revenue", "$3M"),
        ("owner_title", "Founder"),
        ("owner_email", "f@saas.io"),
        ("linkedin_url", ""),
        ("description", "CRM"),
    ]);
    let mut broken = good.clone();
    broken.remove("industry");
    let records = vec![good.clone(), broken, good];

    let results = evaluate_batch(&records, &Rules::default());
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(LeadError::MalformedRecord { missing }) => {
            assert_eq!(missing, &vec!["industry".to_string()]);
        }
        other => panic!("expected MalformedRecord, got {:?}", other),
    }
    assert_eq!(results[0].as_ref().unwrap(), results[2].as_ref().unwrap());

    let report = score_records(records, &Rules::default());
    assert_eq!(report.scored.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].index, 1);
}
