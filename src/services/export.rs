//! CSV export of search results
//!
//! Exports the full (unpaginated) result set. Optional fields vary per
//! record, so the header is the union of field names across all records,
//! not the first record's shape. Every field is quote-wrapped and embedded
//! quotes are doubled.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use serde_json::{Map, Value};

use crate::model::InfluencerProfile;

/// File name for an export dated `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("influencer_data_{}.csv", date.format("%Y-%m-%d"))
}

/// Write `profiles` to `<dir>/influencer_data_<date>.csv`.
///
/// The file is written under a temporary name and renamed into place on
/// success, so a failed export never leaves a partial artifact behind.
///
/// # Errors
///
/// Serialization and I/O failures; the caller reports them and moves on.
pub fn export_profiles(
    profiles: &[InfluencerProfile],
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    let records = profiles
        .iter()
        .map(|profile| {
            match serde_json::to_value(profile).context("failed to serialize profile")? {
                Value::Object(map) => Ok(map),
                other => anyhow::bail!("profile serialized to non-object value: {other}"),
            }
        })
        .collect::<Result<Vec<Map<String, Value>>>>()?;

    // Union of field names in first-seen order across all records
    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }

    let final_path = dir.join(export_file_name(date));
    let tmp_path = dir.join(format!("{}.tmp", export_file_name(date)));

    let result = write_rows(&tmp_path, &headers, &records);
    if let Err(err) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, &final_path).context("failed to move export into place")?;
    Ok(final_path)
}

fn write_rows(path: &Path, headers: &[String], records: &[Map<String, Value>]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .context("failed to create export file")?;

    writer.write_record(headers)?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|header| field_text(record.get(header)))
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Text form of one field: absent/null empty, structured values as compact
/// JSON, scalars as their string form.
fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Array(_) | Value::Object(_))) => v.to_string(),
        Some(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(json: &str) -> InfluencerProfile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_header_is_union_of_keys() {
        let profiles = vec![
            profile(r#"{"username": "a", "interests": ["tech"]}"#),
            profile(r#"{"username": "b", "recent_brands": ["acme"]}"#),
        ];
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let path = export_profiles(&profiles, dir.path(), date).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "influencer_data_2025-06-01.csv"
        );

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert!(headers.contains(&"interests".to_string()));
        assert!(headers.contains(&"recent_brands".to_string()));

        // every data row has the same arity as the header
        for row in reader.records() {
            assert_eq!(row.unwrap().len(), headers.len());
        }
    }

    #[test]
    fn test_all_fields_quoted_and_quotes_doubled() {
        let profiles = vec![profile(r#"{"username": "a", "full_name": "Jane \"JJ\" Doe"}"#)];
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let path = export_profiles(&profiles, dir.path(), date).unwrap();
        let raw = fs::read_to_string(&path).unwrap();

        assert!(raw.contains(r#""Jane ""JJ"" Doe""#));
        for line in raw.lines() {
            assert!(line.starts_with('"'), "unquoted line: {line}");
        }
    }

    #[test]
    fn test_structured_fields_become_json_text() {
        let profiles = vec![profile(
            r#"{"username": "a", "location": [{"city": "Lisbon", "country": "PT"}]}"#,
        )];
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let path = export_profiles(&profiles, dir.path(), date).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        let record = reader.records().next().unwrap().unwrap();

        let idx = headers.iter().position(|h| h == "location").unwrap();
        let cell = &record[idx];
        let parsed: Value = serde_json::from_str(cell).unwrap();
        assert_eq!(parsed[0]["city"], "Lisbon");
    }

    #[test]
    fn test_absent_optional_is_empty_cell() {
        let profiles = vec![
            profile(r#"{"username": "a", "interests": ["tech"]}"#),
            profile(r#"{"username": "b"}"#),
        ];
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let path = export_profiles(&profiles, dir.path(), date).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        let idx = headers.iter().position(|h| h == "interests").unwrap();

        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert!(!rows[0][idx].is_empty());
        assert!(rows[1][idx].is_empty());
    }
}
