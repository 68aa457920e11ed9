//! Reader for the tabular container format (CSV with a header row).
//!
//! This is the format the CSV writer emits, so a converted or compared
//! report can be loaded again. Values are already normalized (milliseconds,
//! plain percentages), so cells are typed by content rather than by unit.

use super::schema::{CellValue, ColumnKind, ProfileTable};
use crate::utils::config::NAME_COLUMN;
use crate::utils::error::ParseError;
use log::debug;
use std::io::Read;

/// Parse a CSV table into a profile table
///
/// **Public** - entry point for the `table` input format
///
/// # Errors
/// * `ParseError::CsvError` - malformed CSV (e.g. ragged records)
/// * `ParseError::InvalidValue` - a call count that is not an integer
pub fn parse_csv_table<R: Read>(reader: R) -> Result<ProfileTable, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut table = ProfileTable::new(headers.iter().cloned());

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Line 1 is the header
        let line = index + 2;

        let row = record
            .iter()
            .zip(&headers)
            .map(|(field, column)| {
                infer_cell(field, column).map_err(|reason| {
                    ParseError::InvalidValue {
                        column: column.clone(),
                        line,
                        reason,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        table.push_row(row);
    }

    debug!("Parsed CSV table: {} columns, {} rows", table.columns.len(), table.len());
    Ok(table)
}

/// Type a CSV field: integers, then floats, then text; empty is missing
///
/// **Private** - names stay text, integer columns must hold integers
fn infer_cell(field: &str, column: &str) -> Result<Option<CellValue>, String> {
    if field.is_empty() {
        return Ok(None);
    }
    if column == NAME_COLUMN {
        return Ok(Some(CellValue::Text(field.to_string())));
    }

    match ColumnKind::for_column(column) {
        ColumnKind::Integer => field
            .parse::<i64>()
            .map(|v| Some(CellValue::Int(v)))
            .map_err(|_| format!("'{}' is not an integer", field)),
        ColumnKind::Percent | ColumnKind::Duration => field
            .parse::<f64>()
            .map(|v| Some(CellValue::Float(v)))
            .map_err(|_| format!("'{}' is not a number", field)),
        ColumnKind::Text => {
            if let Ok(v) = field.parse::<i64>() {
                Ok(Some(CellValue::Int(v)))
            } else if let Ok(v) = field.parse::<f64>() {
                Ok(Some(CellValue::Float(v)))
            } else {
                Ok(Some(CellValue::Text(field.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_table() {
        let csv = "Name,Self CPU %,Self CPU,# of Calls\naten::mm,75.0,3.0,2\naten::relu,25.0,1.0,4\n";
        let table = parse_csv_table(csv.as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["Name", "Self CPU %", "Self CPU", "# of Calls"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "Self CPU"), Some(&CellValue::Float(3.0)));
        assert_eq!(table.cell(1, "# of Calls"), Some(&CellValue::Int(4)));
    }

    #[test]
    fn test_empty_fields_are_missing() {
        let csv = "Name,Self CPU_old,Self CPU_new\nx,1.5,\n";
        let table = parse_csv_table(csv.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "Self CPU_old"), Some(&CellValue::Float(1.5)));
        assert_eq!(table.cell(0, "Self CPU_new"), None);
    }

    #[test]
    fn test_numeric_names_stay_text() {
        let csv = "Name,Val\n42,7\n";
        let table = parse_csv_table(csv.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "Name"), Some(&CellValue::Text("42".into())));
        assert_eq!(table.cell(0, "Val"), Some(&CellValue::Int(7)));
    }

    #[test]
    fn test_bad_call_count() {
        let csv = "Name,# of Calls\nx,many\n";
        let err = parse_csv_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn test_ragged_record_is_error() {
        let csv = "Name,# of Calls\nx,1,extra\n";
        assert!(matches!(
            parse_csv_table(csv.as_bytes()),
            Err(ParseError::CsvError(_))
        ));
    }
}
