use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::lead::{Field, RawRecord};
use crate::pipeline::ScoredLead;
use crate::scoring::join_flags;

/// Columns placed right after Score and Flags when present in the input.
const PRIORITY_FIELDS: [Field; 6] = [
    Field::Company,
    Field::Industry,
    Field::EmployeeCount,
    Field::Revenue,
    Field::OwnerName,
    Field::OwnerTitle,
];

/// Default export file name: `scored_leads_YYYYMMDD_HHMM.csv`
pub fn default_export_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("scored_leads_{}.csv", now.format("%Y%m%d_%H%M")))
}

/// Order input headers for export: priority fields first, then the rest in
/// their original order.
pub fn export_columns(headers: &[String]) -> Vec<String> {
    let probe: RawRecord = headers
        .iter()
        .map(|h| (h.clone(), Default::default()))
        .collect();

    let mut columns: Vec<String> = PRIORITY_FIELDS
        .iter()
        .filter_map(|field| field.find_column(&probe).map(str::to_string))
        .collect();

    for header in headers {
        if !columns.contains(header) {
            columns.push(header.clone());
        }
    }
    columns
}

/// Write scored leads as CSV: `Score`, `Flags`, then the input columns.
pub fn write_csv<W: Write>(writer: W, headers: &[String], leads: &[ScoredLead]) -> Result<()> {
    let columns = export_columns(headers);
    let mut csv = csv::Writer::from_writer(writer);

    let mut header_row = vec!["Score".to_string(), "Flags".to_string()];
    header_row.extend(columns.iter().cloned());
    csv.write_record(&header_row)?;

    for scored in leads {
        let mut row = vec![
            scored.result.score.to_string(),
            join_flags(&scored.result.flags),
        ];
        row.extend(columns.iter().map(|column| {
            scored
                .record
                .get(column)
                .and_then(|value| value.as_text())
                .map(|text| text.into_owned())
                .unwrap_or_default()
        }));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// Export scored leads to `path` atomically.
///
/// The file is never left half-written.
pub fn export_csv(path: &Path, headers: &[String], leads: &[ScoredLead]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    write_csv(&mut file, headers, leads)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save export at {}", path.display()))?;

    Ok(())
}
