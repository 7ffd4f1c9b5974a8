use crate::pipeline::ScoredLead;

/// Operator-facing filters over scored leads. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub min_score: Option<u32>,
    pub max_score: Option<u32>,
    /// Industries to keep (case-insensitive, compared to the normalized key)
    pub industries: Vec<String>,
    /// Substring searched in flag names, e.g. "linkedin"
    pub flag_query: Option<String>,
}

impl LeadFilter {
    pub fn matches(&self, scored: &ScoredLead) -> bool {
        let score = scored.result.score;
        if self.min_score.is_some_and(|min| score < min) {
            return false;
        }
        if self.max_score.is_some_and(|max| score > max) {
            return false;
        }

        if !self.industries.is_empty()
            && !self
                .industries
                .iter()
                .any(|industry| industry.trim().eq_ignore_ascii_case(&scored.lead.industry_key))
        {
            return false;
        }

        if let Some(ref query) = self.flag_query {
            let query = query.trim().to_lowercase().replace(' ', "_");
            if !query.is_empty()
                && !scored
                    .result
                    .flags
                    .iter()
                    .any(|flag| flag.as_str().contains(&query))
            {
                return false;
            }
        }

        true
    }
}

/// Keep only the leads matching `filter`, preserving order.
pub fn filter_leads(leads: Vec<ScoredLead>, filter: &LeadFilter) -> Vec<ScoredLead> {
    leads.into_iter().filter(|lead| filter.matches(lead)).collect()
}
