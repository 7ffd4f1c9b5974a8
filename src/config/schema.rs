use serde::{Deserialize, Serialize};

use crate::lead::NormalizerConfig;
use crate::pipeline::Rules;
use crate::scoring::ScoringConfig;

/// On-disk configuration. Absent sections fall back to the built-in rules.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub normalize: Option<NormalizerConfig>,
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl Config {
    /// Effective rules: each missing section replaced by its default.
    pub fn rules(&self) -> Rules {
        Rules {
            normalize: self.normalize.clone().unwrap_or_default(),
            scoring: self.scoring.clone().unwrap_or_default(),
        }
    }

    /// A config with every section spelled out.
    pub fn from_rules(rules: &Rules) -> Self {
        Self {
            normalize: Some(rules.normalize.clone()),
            scoring: Some(rules.scoring.clone()),
        }
    }

    /// Validate every section, collecting all errors.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let rules = self.rules();
        let mut errors = Vec::new();
        if let Err(e) = rules.normalize.validate() {
            errors.extend(e);
        }
        if let Err(e) = crate::scoring::validate_scoring(&rules.scoring) {
            errors.extend(e);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
