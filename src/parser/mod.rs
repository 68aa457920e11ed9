//! Report parsing and the normalized table schema.
//!
//! This module handles:
//! - Converting profiler units (durations, percentages)
//! - Detecting fixed-width layouts and parsing text reports
//! - Reading CSV table containers
//! - Reading JSON trace events (aggregated by `crate::aggregator`)
//! - Defining the normalized table

pub mod layout;
pub mod schema;
pub mod table;
pub mod text_table;
pub mod trace_events;
pub mod units;

// Re-export main types
pub use layout::{is_separator_line, Layout};
pub use schema::{CellValue, ColumnKind, ProfileTable, Row};
pub use table::parse_csv_table;
pub use text_table::{parse_text_table, ParseState, TextTableParser};
pub use trace_events::{read_trace_events, TraceEvent};
pub use units::{duration_to_ms, percent_to_number, try_percent_to_number, TimeUnit};

use crate::aggregator::{aggregate_events, build_profile_table};
use crate::utils::error::ParseError;
use log::info;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// Supported input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Chrome trace JSON (`traceEvents`)
    Json,
    /// Fixed-width text report
    Text,
    /// CSV table container
    Table,
}

impl FromStr for InputFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "text" => Ok(InputFormat::Text),
            "table" => Ok(InputFormat::Table),
            other => Err(ParseError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::Json => "json",
            InputFormat::Text => "text",
            InputFormat::Table => "table",
        };
        f.write_str(name)
    }
}

/// Parse a JSON trace into the normalized table
///
/// **Public** - events → per-op stats → table
pub fn parse_trace_json<R: std::io::Read>(reader: R) -> Result<ProfileTable, ParseError> {
    let events = read_trace_events(reader)?;
    let stats = aggregate_events(&events);
    Ok(build_profile_table(&stats))
}

/// Parse a report of the given format
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `reader` - Decompressed report contents
/// * `format` - Encoding of the report
///
/// # Errors
/// Any `ParseError` raised by the format-specific parser
pub fn parse_profile<R: BufRead>(reader: R, format: InputFormat) -> Result<ProfileTable, ParseError> {
    let table = match format {
        InputFormat::Json => parse_trace_json(reader)?,
        InputFormat::Text => parse_text_table(reader)?,
        InputFormat::Table => parse_csv_table(reader)?,
    };

    info!("Parsed {} report: {} rows", format, table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_from_str() {
        assert_eq!("json".parse::<InputFormat>().unwrap(), InputFormat::Json);
        assert_eq!("TEXT".parse::<InputFormat>().unwrap(), InputFormat::Text);
        assert_eq!("table".parse::<InputFormat>().unwrap(), InputFormat::Table);
        assert!(matches!(
            "xlsx".parse::<InputFormat>(),
            Err(ParseError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_profile_dispatch() {
        let json = r#"{"traceEvents":[{"ph":"X","name":"op","cat":"cpu_op","dur":2000}]}"#;
        let table = parse_profile(json.as_bytes(), InputFormat::Json).unwrap();
        assert_eq!(table.cell(0, "Self CPU"), Some(&CellValue::Float(2.0)));

        let csv = "Name,Val\nop,1\n";
        let table = parse_profile(csv.as_bytes(), InputFormat::Table).unwrap();
        assert_eq!(table.cell(0, "Val"), Some(&CellValue::Int(1)));
    }
}
