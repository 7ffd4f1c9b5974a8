use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::pipeline::ScoredLead;
use crate::scoring::{join_flags, ScoreResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Display label for a lead: company name, else industry, else row number.
pub fn lead_label(scored: &ScoredLead) -> String {
    let company = scored.raw.company_name();
    if !company.is_empty() {
        company
    } else if !scored.lead.industry_key.is_empty() {
        format!("({})", scored.lead.industry_key)
    } else {
        format!("row {}", scored.index + 1)
    }
}

/// Format leads as a ranked table with columns: Index, Score, Lead, Flags.
/// Index column is 1-based and right-aligned; score is right-aligned in 3
/// chars (fits "100").
pub fn format_scored_table(leads: &[ScoredLead], use_colors: bool) -> String {
    if leads.is_empty() {
        return "No leads found.".to_string();
    }

    let term_width = get_terminal_width();
    let label_width = 32;
    let separator = "  ";

    leads
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format!("{:>3}", scored.result.score);
            let label = format!(
                "{:<width$}",
                truncate(&lead_label(scored), label_width),
                width = label_width
            );
            let flags = join_flags(&scored.result.flags);

            // Whatever is left of the terminal goes to the flags column
            let fixed_width = index_str.len() + 1 + score_str.len() + separator.len() * 2 + label_width;
            let flags = match term_width {
                Some(width) if width > fixed_width + 10 => truncate(&flags, width - fixed_width),
                Some(_) => truncate(&flags, 20),
                None => flags,
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    color_score(&score_str, scored.result.score),
                    separator,
                    label,
                    separator,
                    flags.yellow()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_str, separator, label, separator, flags
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn color_score(text: &str, score: u32) -> String {
    if score >= 70 {
        text.green().bold().to_string()
    } else if score >= 40 {
        text.bold().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format a score breakdown for verbose mode.
pub fn format_breakdown(result: &ScoreResult) -> String {
    let mut lines: Vec<String> = result
        .breakdown
        .factors
        .iter()
        .map(|f| format!("    {:<10} {:>+4}  {}", f.label, f.points, f.description))
        .collect();
    if result.breakdown.total != result.score {
        lines.push(format!(
            "    clamped {} -> {}",
            result.breakdown.total, result.score
        ));
    }
    lines.join("\n")
}

/// Format leads as tab-separated values for scripting
/// Columns: score, lead, industry, flags (no headers, no colors)
pub fn format_tsv(leads: &[ScoredLead]) -> String {
    leads
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}",
                scored.result.score,
                lead_label(scored),
                scored.lead.industry_key,
                join_flags(&scored.result.flags)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(serde::Serialize)]
struct JsonLead<'a> {
    row: usize,
    lead: String,
    #[serde(flatten)]
    result: &'a ScoreResult,
}

/// Format leads as a pretty JSON array.
pub fn format_json(leads: &[ScoredLead]) -> serde_json::Result<String> {
    let rows: Vec<JsonLead> = leads
        .iter()
        .map(|scored| JsonLead {
            row: scored.index + 1,
            lead: lead_label(scored),
            result: &scored.result,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}
