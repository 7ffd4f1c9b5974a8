use serde::{Deserialize, Serialize};

use crate::error::LeadError;
use crate::lead::{normalize, NormalizedLead, NormalizerConfig, RawLead, RawRecord};
use crate::scoring::{score, ScoreResult, ScoringConfig};

/// Everything the engine needs to evaluate a lead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub normalize: NormalizerConfig,
    pub scoring: ScoringConfig,
}

/// Normalize then score a single lead.
pub fn evaluate(raw: &RawLead, rules: &Rules) -> ScoreResult {
    score(&normalize(raw, &rules.normalize), &rules.scoring)
}

/// Evaluate a batch of records, one result per record in input order.
///
/// Records are independent: a malformed row yields its own error and the rest
/// of the batch is still scored.
pub fn evaluate_batch(records: &[RawRecord], rules: &Rules) -> Vec<Result<ScoreResult, LeadError>> {
    records
        .iter()
        .map(|record| RawLead::from_record(record).map(|raw| evaluate(&raw, rules)))
        .collect()
}

/// A scored row, kept together with its source record.
#[derive(Debug, Clone)]
pub struct ScoredLead {
    /// Zero-based position in the input
    pub index: usize,
    pub record: RawRecord,
    pub raw: RawLead,
    pub lead: NormalizedLead,
    pub result: ScoreResult,
}

/// A row that could not be evaluated.
#[derive(Debug, Clone)]
pub struct RejectedRecord {
    pub index: usize,
    pub error: LeadError,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub scored: Vec<ScoredLead>,
    pub rejected: Vec<RejectedRecord>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.scored.len() + self.rejected.len()
    }
}

/// Score every record, keeping each row alongside its result.
pub fn score_records(records: Vec<RawRecord>, rules: &Rules) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, record) in records.into_iter().enumerate() {
        match RawLead::from_record(&record) {
            Ok(raw) => {
                let lead = normalize(&raw, &rules.normalize);
                let result = score(&lead, &rules.scoring);
                tracing::trace!(row = index + 1, score = result.score, "scored lead");
                report.scored.push(ScoredLead {
                    index,
                    record,
                    raw,
                    lead,
                    result,
                });
            }
            Err(error) => {
                tracing::warn!(row = index + 1, %error, "skipping record");
                report.rejected.push(RejectedRecord { index, error });
            }
        }
    }

    tracing::debug!(
        scored = report.scored.len(),
        rejected = report.rejected.len(),
        "batch complete"
    );
    report
}

/// Order leads by score, highest first. Ties keep input order.
pub fn rank(leads: &mut [ScoredLead]) {
    leads.sort_by(|a, b| {
        b.result
            .score
            .cmp(&a.result.score)
            .then_with(|| a.index.cmp(&b.index))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::RawValue;

    fn record(industry: &str, employees: &str, email: &str) -> RawRecord {
        [
            ("industry", industry),
            ("employee_count", employees),
            ("revenue", ""),
            ("owner_title", ""),
            ("owner_email", email),
            ("linkedin_url", ""),
            ("description", ""),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), RawValue::from(*v)))
        .collect()
    }

    #[test]
    fn test_evaluate_batch_preserves_order() {
        let records = vec![
            record("saas", "10", ""),
            record("retail", "500", "a@b.com"),
        ];
        let results = evaluate_batch(&records, &Rules::default());
        assert_eq!(results.len(), 2);
        // saas 30 + small 5
        assert_eq!(results[0].as_ref().unwrap().score, 35);
        // other industry 5 + enterprise 25 + email 10
        assert_eq!(results[1].as_ref().unwrap().score, 40);
    }

    #[test]
    fn test_malformed_record_does_not_stop_batch() {
        let mut broken = record("saas", "10", "");
        broken.remove("industry");
        let records = vec![record("saas", "10", ""), broken, record("fintech", "60", "")];
        let results = evaluate_batch(&records, &Rules::default());
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(LeadError::MalformedRecord { .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_score_records_collects_rejections() {
        let mut broken = record("saas", "10", "");
        broken.remove("revenue");
        let report = score_records(vec![broken, record("saas", "10", "")], &Rules::default());
        assert_eq!(report.total(), 2);
        assert_eq!(report.scored.len(), 1);
        assert_eq!(report.scored[0].index, 1);
        assert_eq!(report.rejected[0].index, 0);
    }

    #[test]
    fn test_rank_by_score_then_input_order() {
        let records = vec![
            record("", "", ""),
            record("saas", "500", "x@y.com"),
            record("", "", ""),
            record("saas", "10", ""),
        ];
        let mut report = score_records(records, &Rules::default());
        rank(&mut report.scored);
        let order: Vec<usize> = report.scored.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_evaluate_matches_manual_composition() {
        let raw = RawLead::from_record(&record("saas", "75", "a@b.com")).unwrap();
        let rules = Rules::default();
        let manual = score(&normalize(&raw, &rules.normalize), &rules.scoring);
        assert_eq!(evaluate(&raw, &rules), manual);
    }
}
