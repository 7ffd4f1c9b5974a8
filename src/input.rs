use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::lead::{RawRecord, RawValue};

/// Rows read from an input file, with the header order of the source.
#[derive(Debug, Clone, Default)]
pub struct LeadTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

/// Read leads from a `.csv` or `.json` file.
///
/// JSON input is an array of objects. Any other extension is treated as CSV.
pub fn read_leads(path: &Path) -> Result<LeadTable> {
    let file =
        File::open(path).with_context(|| format!("Failed to open input file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        read_json(file).with_context(|| format!("Failed to parse JSON in {}", path.display()))
    } else {
        read_csv(file).with_context(|| format!("Failed to parse CSV in {}", path.display()))
    }
}

/// Parse CSV with a header row. Short rows are accepted; their missing
/// columns are absent from the record rather than empty.
///
/// Cells are decoded as UTF-8 with invalid bytes replaced, so a row exported
/// in another encoding is still read.
pub fn read_csv<R: Read>(reader: R) -> Result<LeadTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (index, result) in reader.byte_records().enumerate() {
        let row = result?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| {
                let text = String::from_utf8_lossy(cell);
                if matches!(text, Cow::Owned(_)) {
                    tracing::debug!(row = index + 1, column = %header, "replaced invalid UTF-8");
                }
                (header.clone(), RawValue::Text(text.into_owned()))
            })
            .collect();
        records.push(record);
    }

    Ok(LeadTable { headers, records })
}

/// Parse a JSON array of objects.
///
/// Nested arrays and objects are kept as their JSON text. An element that is
/// not an object becomes an empty record, which is later rejected as
/// malformed.
pub fn read_json<R: Read>(reader: R) -> Result<LeadTable> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let Value::Array(items) = value else {
        bail!("expected a JSON array of lead objects");
    };

    let records: Vec<RawRecord> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => fields
                .into_iter()
                .map(|(key, value)| (key, json_cell(value)))
                .collect(),
            other => {
                tracing::warn!(row = index + 1, kind = json_kind(&other), "lead is not a JSON object");
                RawRecord::new()
            }
        })
        .collect();

    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    Ok(LeadTable { headers, records })
}

fn json_cell(value: Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Bool(b),
        Value::Number(n) => n.as_f64().map_or(RawValue::Null, RawValue::Number),
        Value::String(s) => RawValue::Text(s),
        nested @ (Value::Array(_) | Value::Object(_)) => RawValue::Text(nested.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_csv_keeps_header_order() {
        let data = "Company,Industry,Revenue\nAcme,SaaS,$2M\nGlobex,,\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Company", "Industry", "Revenue"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0]["Revenue"], RawValue::from("$2M"));
        assert_eq!(table.records[1]["Industry"], RawValue::from(""));
    }

    #[test]
    fn test_read_csv_short_row_omits_columns() {
        let data = "industry,revenue\nSaaS\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert!(table.records[0].contains_key("industry"));
        assert!(!table.records[0].contains_key("revenue"));
    }

    #[test]
    fn test_read_json_records() {
        let data = r#"[{"industry": "SaaS", "employee_count": 50}, {"revenue": null}]"#;
        let table = read_json(data.as_bytes()).unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0]["employee_count"], RawValue::Number(50.0));
        assert_eq!(table.records[1]["revenue"], RawValue::Null);
        assert_eq!(table.headers.len(), 3);
    }

    #[test]
    fn test_read_csv_invalid_utf8_keeps_other_rows() {
        let mut data = b"industry,company\nSaaS,Acme\n".to_vec();
        data.extend_from_slice(b"Food,Caf\xe9 Bleu\n");
        data.extend_from_slice(b"Fintech,Globex\n");

        let table = read_csv(data.as_slice()).unwrap();
        assert_eq!(table.records.len(), 3);
        assert_eq!(table.records[1]["company"], RawValue::from("Caf\u{FFFD} Bleu"));
        assert_eq!(table.records[2]["industry"], RawValue::from("Fintech"));
    }

    #[test]
    fn test_read_json_nested_cells_become_text() {
        let data = r#"[
            {"industry": "SaaS"},
            {"industry": ["SaaS"], "company": {"name": "Acme"}},
            {"industry": "Fintech"}
        ]"#;
        let table = read_json(data.as_bytes()).unwrap();
        assert_eq!(table.records.len(), 3);
        assert_eq!(table.records[1]["industry"], RawValue::from(r#"["SaaS"]"#));
        assert_eq!(table.records[1]["company"], RawValue::from(r#"{"name":"Acme"}"#));
        assert_eq!(table.records[2]["industry"], RawValue::from("Fintech"));
    }

    #[test]
    fn test_read_json_non_object_element_is_empty_record() {
        let table = read_json(r#"[{"industry": "SaaS"}, 42]"#.as_bytes()).unwrap();
        assert_eq!(table.records.len(), 2);
        assert!(table.records[1].is_empty());
    }

    #[test]
    fn test_read_json_rejects_object() {
        assert!(read_json(r#"{"industry": "SaaS"}"#.as_bytes()).is_err());
    }

    #[test]
    fn test_read_leads_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.JSON");
        let mut file = File::create(&path).unwrap();
        write!(file, r#"[{{"industry": "FinTech"}}]"#).unwrap();

        let table = read_leads(&path).unwrap();
        assert_eq!(table.records[0]["industry"], RawValue::from("FinTech"));
    }

    #[test]
    fn test_read_leads_missing_file() {
        let err = read_leads(Path::new("/nonexistent/leads.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }
}
