use super::config::{Bucket, ScoringConfig};
use super::factors::RangeOp;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.score_scale == Some(0) {
        errors.push("scoring.score_scale: must be greater than zero".to_string());
    }

    if let Some(threshold) = config.suspicious_revenue_threshold {
        if !threshold.is_finite() || threshold < 0.0 {
            errors.push(
                "scoring.suspicious_revenue_threshold: must be a non-negative number".to_string(),
            );
        }
    }

    if let Some(ref industry) = config.industry {
        if industry.preferred.is_empty() {
            errors.push("scoring.industry.preferred: must list at least one industry".to_string());
        }
        check_keywords("scoring.industry.preferred", &industry.preferred, &mut errors);
    }

    if let Some(ref size) = config.size {
        check_buckets("scoring.size.buckets", &size.buckets, &mut errors);
    }

    if let Some(ref revenue) = config.revenue {
        check_buckets("scoring.revenue.buckets", &revenue.buckets, &mut errors);
    }

    if let Some(ref tiers) = config.seniority {
        for (i, tier) in tiers.iter().enumerate() {
            let path = format!("scoring.seniority[{}].keywords", i);
            if tier.keywords.is_empty() {
                errors.push(format!("{}: must list at least one keyword", path));
            }
            check_keywords(&path, &tier.keywords, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_buckets(path: &str, buckets: &[Bucket], errors: &mut Vec<String>) {
    for (i, bucket) in buckets.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&bucket.range) {
            errors.push(format!(
                "{}[{}].range: invalid '{}' - {}",
                path, i, bucket.range, e
            ));
        }
    }
}

fn check_keywords(path: &str, keywords: &[String], errors: &mut Vec<String>) {
    for (i, keyword) in keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            errors.push(format!("{}[{}]: must not be blank", path, i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{BucketConfig, IndustryConfig, SeniorityTier};

    fn empty_config() -> ScoringConfig {
        ScoringConfig {
            score_scale: None,
            suspicious_revenue_threshold: None,
            distrust_suspicious_revenue: None,
            industry: None,
            size: None,
            revenue: None,
            seniority: None,
            contact: None,
        }
    }

    #[test]
    fn test_default_config_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&empty_config()).is_ok());
    }

    #[test]
    fn test_zero_score_scale() {
        let config = ScoringConfig {
            score_scale: Some(0),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("score_scale"));
    }

    #[test]
    fn test_negative_threshold() {
        let config = ScoringConfig {
            suspicious_revenue_threshold: Some(-1.0),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("suspicious_revenue_threshold"));
    }

    #[test]
    fn test_invalid_size_bucket() {
        let config = ScoringConfig {
            size: Some(BucketConfig {
                buckets: vec![Bucket::new(">200", 25), Bucket::new("big", 10)],
            }),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.size.buckets[1].range"));
    }

    #[test]
    fn test_invalid_revenue_bucket() {
        let config = ScoringConfig {
            revenue: Some(BucketConfig {
                buckets: vec![Bucket::new("20M-5M", 25)],
            }),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.revenue.buckets[0].range"));
    }

    #[test]
    fn test_blank_keywords() {
        let config = ScoringConfig {
            industry: Some(IndustryConfig {
                preferred: vec![],
                bonus: 30,
                other_bonus: None,
            }),
            seniority: Some(vec![SeniorityTier {
                keywords: vec!["ceo".to_string(), " ".to_string()],
                bonus: 20,
            }]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("scoring.industry.preferred"));
        assert!(errors[1].contains("scoring.seniority[0].keywords[1]"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            score_scale: Some(0),                     // Error 1
            suspicious_revenue_threshold: Some(f64::NAN), // Error 2
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
