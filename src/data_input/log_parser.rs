// src/data_input/log_parser.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::channels::Channel;
use crate::constants::TIMESTAMP_COLUMN;
use crate::data_input::log_data::{LogRowData, LogTable};
use crate::data_input::timezone::to_display;
use crate::error::PlotError;

// Formats tried after RFC 3339, for logs written with a space separator.
const OFFSET_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a timestamp cell. The value must carry an explicit UTC designator
/// (`Z`, ` UTC` or a numeric offset); wall-clock strings without one are rejected.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }
    let naive = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix(" UTC"))?
        .trim_end();
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|ts| ts.and_utc())
}

/// Parses one channel cell. Empty and NaN cells are missing samples.
fn parse_reading(raw: Option<&str>) -> Result<Option<f64>, String> {
    let raw = raw.unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Ok(None),
        Err(_) => Err(format!("'{raw}' is not a number")),
    }
}

fn line_of(record: &StringRecord, fallback: usize) -> u64 {
    record
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback as u64)
}

/// Reads the power log at `input_file_path` and converts every timestamp to `display_tz`.
///
/// Rows keep file order. Columns that are not known channels are ignored; known
/// channels missing from the header simply read as `None`.
pub fn parse_log_file(input_file_path: &Path, display_tz: Tz) -> Result<LogTable, PlotError> {
    let file = File::open(input_file_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PlotError::FileNotFound {
            path: input_file_path.to_path_buf(),
        },
        _ => PlotError::load(input_file_path, e.to_string()),
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let header_record = reader
        .headers()
        .map_err(|e| PlotError::load(input_file_path, e.to_string()))?
        .clone();
    let columns: Vec<String> = header_record.iter().map(|h| h.to_string()).collect();
    debug!("Headers found in CSV: {:?}", columns);

    let timestamp_index = columns
        .iter()
        .position(|h| h == TIMESTAMP_COLUMN)
        .ok_or_else(|| {
            PlotError::load(
                input_file_path,
                format!("missing required '{TIMESTAMP_COLUMN}' column"),
            )
        })?;

    let mut channel_indices: Vec<(Channel, usize)> = Vec::new();
    for (i, header) in columns.iter().enumerate() {
        if i == timestamp_index {
            continue;
        }
        match Channel::from_column_name(header) {
            Some(channel) => channel_indices.push((channel, i)),
            None => debug!("Ignoring unrecognized column '{header}'"),
        }
    }
    for channel in Channel::all() {
        let found = channel_indices.iter().any(|(c, _)| *c == channel);
        debug!(
            "  '{}': {}",
            channel.column_name(),
            if found { "Found" } else { "Not Found" }
        );
    }

    let mut rows: Vec<LogRowData> = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| PlotError::load(input_file_path, e.to_string()))?;
        let line = line_of(&record, row_index + 2);

        let raw_ts = record.get(timestamp_index).unwrap_or("");
        let instant = parse_timestamp(raw_ts).ok_or_else(|| {
            PlotError::load(
                input_file_path,
                format!("line {line}: cannot parse timestamp '{raw_ts}'"),
            )
        })?;

        let mut row = LogRowData::new(to_display(instant, display_tz));
        for &(channel, csv_idx) in &channel_indices {
            row.readings[channel.index()] = parse_reading(record.get(csv_idx)).map_err(|reason| {
                PlotError::load(
                    input_file_path,
                    format!("line {line}, column '{}': {reason}", channel.column_name()),
                )
            })?;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(PlotError::load(input_file_path, "no data rows"));
    }

    info!(
        "Successfully loaded {} records from '{}' (display timezone: {})",
        rows.len(),
        input_file_path.display(),
        display_tz.name()
    );

    Ok(LogTable::new(rows, columns, display_tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 20, 12, 34, 56).unwrap();
        for raw in [
            "2025-06-20T12:34:56Z",
            "2025-06-20T12:34:56+00:00",
            "2025-06-20 12:34:56+00:00",
            "2025-06-20 12:34:56Z",
            "2025-06-20 12:34:56 UTC",
            "2025-06-20T21:34:56+09:00",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "failed on {raw}");
        }
    }

    #[test]
    fn test_parse_timestamp_keeps_fraction() {
        let ts = parse_timestamp("2025-06-20T12:34:56.250Z").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_timestamp_requires_utc_marker() {
        assert_eq!(parse_timestamp("2025-06-20 12:34:56"), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_parse_reading() {
        assert_eq!(parse_reading(Some("4.8")), Ok(Some(4.8)));
        assert_eq!(parse_reading(Some(" 12 ")), Ok(Some(12.0)));
        assert_eq!(parse_reading(Some("")), Ok(None));
        assert_eq!(parse_reading(None), Ok(None));
        assert_eq!(parse_reading(Some("NaN")), Ok(None));
        assert!(parse_reading(Some("abc")).is_err());
    }
}

// src/data_input/log_parser.rs
