use serde::{Deserialize, Serialize};

/// Normalizer configuration.
///
/// Example YAML:
/// ```yaml
/// normalize:
///   missing_markers: ["n/a", "na", "none"]
///   placeholder_phrases: ["not mentioned", "no description"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Values treated the same as an empty cell (case-insensitive, whole value)
    #[serde(default)]
    pub missing_markers: Option<Vec<String>>,

    /// Filler phrases that mark a description as a placeholder
    /// (case-insensitive substring match)
    #[serde(default)]
    pub placeholder_phrases: Option<Vec<String>>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            missing_markers: Some(to_strings(&["n/a", "na", "none"])),
            placeholder_phrases: Some(to_strings(&[
                "not mentioned",
                "no description",
                "n/a",
                "not available",
                "not provided",
                "tbd",
            ])),
        }
    }
}

impl NormalizerConfig {
    /// Validate at startup. Returns all errors at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (name, list) in [
            ("missing_markers", &self.missing_markers),
            ("placeholder_phrases", &self.placeholder_phrases),
        ] {
            if let Some(entries) = list {
                for (i, entry) in entries.iter().enumerate() {
                    if entry.trim().is_empty() {
                        errors.push(format!("normalize.{}[{}]: must not be blank", name, i));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
