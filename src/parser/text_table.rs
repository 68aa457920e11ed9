//! Parser for the profiler's fixed-width text report.
//!
//! The report looks like
//!
//! ```text
//! <preamble>
//! -----------  ------------  ------------
//!        Name    Self CPU %      Self CPU
//! -----------  ------------  ------------
//!   aten::mm        45.00%      12.000ms
//!   ...
//! -----------  ------------  ------------
//! Self CPU time total: 26.667ms
//! ```
//!
//! Lines are fed through a small state machine; the layout detected on the
//! first separator slices the header and every data row.

use super::layout::{is_separator_line, Layout};
use super::schema::{CellValue, ColumnKind, ProfileTable};
use super::units::{duration_to_ms, try_percent_to_number};
use crate::utils::config::NAME_COLUMN;
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::io::BufRead;

/// Where the parser is within the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Before the first separator: banner lines are ignored
    Preamble,
    /// Between the first and second separator: column names
    HeaderCapture,
    /// Between the second and third separator: data rows
    DataCapture,
    /// After the third separator: footer and totals are ignored
    Done,
}

/// Raw data row plus the line it came from (for error messages)
#[derive(Debug, Clone)]
struct RawRow {
    line: usize,
    fields: Vec<String>,
}

/// Incremental parser for one text report
///
/// **Public** - drive it with [`feed_line`](Self::feed_line) and
/// [`finish`](Self::finish), or use [`parse_text_table`]
#[derive(Debug)]
pub struct TextTableParser {
    state: ParseState,
    layout: Option<Layout>,
    headers: Option<Vec<String>>,
    rows: Vec<RawRow>,
    line_no: usize,
}

impl Default for TextTableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TextTableParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Preamble,
            layout: None,
            headers: None,
            rows: Vec::new(),
            line_no: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Process the next line of the report
    pub fn feed_line(&mut self, line: &str) {
        self.line_no += 1;

        if is_separator_line(line) {
            self.on_separator(line);
            return;
        }

        match self.state {
            ParseState::Preamble | ParseState::Done => {}
            ParseState::HeaderCapture => {
                if let Some(layout) = &self.layout {
                    if self.headers.is_some() {
                        debug!("Multi-line header, line {} replaces the previous one", self.line_no);
                    }
                    self.headers = Some(layout.split(line));
                }
            }
            ParseState::DataCapture => {
                if line.trim().is_empty() {
                    return;
                }
                if let Some(layout) = &self.layout {
                    self.rows.push(RawRow {
                        line: self.line_no,
                        fields: layout.split(line),
                    });
                }
            }
        }
    }

    fn on_separator(&mut self, line: &str) {
        if self.layout.is_none() {
            let layout = Layout::from_separator(line);
            if !layout.is_empty() {
                debug!("Detected {} columns at line {}", layout.column_count(), self.line_no);
                self.layout = Some(layout);
            }
        }

        self.state = match self.state {
            ParseState::Preamble => ParseState::HeaderCapture,
            ParseState::HeaderCapture => ParseState::DataCapture,
            ParseState::DataCapture | ParseState::Done => ParseState::Done,
        };
    }

    /// Convert the captured header and rows into a typed table
    ///
    /// # Errors
    /// * `ParseError::InvalidFormat` - data rows without a header line
    /// * `ParseError::InvalidValue` - a typed column holds unparsable text
    pub fn finish(self) -> Result<ProfileTable, ParseError> {
        let headers = match self.headers {
            Some(headers) => headers,
            None if self.rows.is_empty() => {
                warn!("No table found in text report");
                return Ok(ProfileTable::default());
            }
            None => {
                return Err(ParseError::InvalidFormat(
                    "data rows found before any header line".to_string(),
                ))
            }
        };

        let kinds: Vec<ColumnKind> = headers.iter().map(|h| ColumnKind::for_column(h)).collect();
        let name_col = headers.iter().position(|h| h == NAME_COLUMN);
        let mut table = ProfileTable::new(headers.iter().cloned());

        for raw in self.rows {
            if let Some(col) = name_col {
                if raw.fields[col].is_empty() {
                    warn!("Skipping row without a name at line {}", raw.line);
                    continue;
                }
            }
            let mut row = Vec::with_capacity(headers.len());
            for ((field, kind), column) in raw.fields.iter().zip(&kinds).zip(&headers) {
                let cell = convert_field(field, *kind).map_err(|e| ParseError::InvalidValue {
                    column: column.clone(),
                    line: raw.line,
                    reason: e.to_string(),
                })?;
                row.push(cell);
            }
            table.push_row(row);
        }

        debug!("Parsed text table: {} columns, {} rows", table.columns.len(), table.len());
        Ok(table)
    }
}

/// Interpret one raw field according to its column kind
///
/// **Private** - empty counts and durations become missing cells; an empty
/// percentage carries no `%` and reads as zero
fn convert_field(field: &str, kind: ColumnKind) -> Result<Option<CellValue>, ParseError> {
    if field.is_empty() && matches!(kind, ColumnKind::Integer | ColumnKind::Duration) {
        return Ok(None);
    }

    let value = match kind {
        ColumnKind::Integer => CellValue::Int(
            field
                .parse::<i64>()
                .map_err(|_| ParseError::InvalidNumber(field.to_string()))?,
        ),
        ColumnKind::Percent => CellValue::Float(try_percent_to_number(field)?),
        ColumnKind::Duration => CellValue::Float(duration_to_ms(field)?),
        ColumnKind::Text => CellValue::Text(field.to_string()),
    };
    Ok(Some(value))
}

/// Parse a complete text report
///
/// **Public** - main entry point for the text input format
///
/// # Errors
/// * `ParseError::Io` - the reader failed
/// * see [`TextTableParser::finish`]
pub fn parse_text_table<R: BufRead>(reader: R) -> Result<ProfileTable, ParseError> {
    let mut parser = TextTableParser::new();
    for line in reader.lines() {
        parser.feed_line(&line?);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
STAGE:2024-01-01 profiler banner
-----------  ----------  ----------  ----------
       Name  Self CPU %    Self CPU  # of Calls
-----------  ----------  ----------  ----------
   aten::mm      75.00%     3.000ms           2
 aten::relu      25.00%    1000.0us           4
-----------  ----------  ----------  ----------
Self CPU time total: 4.000ms
";

    #[test]
    fn test_state_transitions() {
        let mut parser = TextTableParser::new();
        assert_eq!(parser.state(), ParseState::Preamble);
        parser.feed_line("banner");
        assert_eq!(parser.state(), ParseState::Preamble);
        parser.feed_line("----  ----");
        assert_eq!(parser.state(), ParseState::HeaderCapture);
        parser.feed_line("  a     b");
        parser.feed_line("----  ----");
        assert_eq!(parser.state(), ParseState::DataCapture);
        parser.feed_line("----  ----");
        assert_eq!(parser.state(), ParseState::Done);
        parser.feed_line("----  ----");
        assert_eq!(parser.state(), ParseState::Done);
    }

    #[test]
    fn test_parse_report() {
        let table = parse_text_table(REPORT.as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["Name", "Self CPU %", "Self CPU", "# of Calls"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "Name"), Some(&CellValue::Text("aten::mm".into())));
        assert_eq!(table.cell(0, "Self CPU %"), Some(&CellValue::Float(75.0)));
        assert_eq!(table.cell(0, "Self CPU"), Some(&CellValue::Float(3.0)));
        assert_eq!(table.cell(1, "Self CPU"), Some(&CellValue::Float(1.0)));
        assert_eq!(table.cell(1, "# of Calls"), Some(&CellValue::Int(4)));
        assert!(!table.totals_are_self_time);
    }

    #[test]
    fn test_footer_is_ignored() {
        let mut report = REPORT.to_string();
        report.push_str("-----------  ----------  ----------  ----------\nnot a row\n");
        let table = parse_text_table(report.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_short_row_leaves_missing_cells() {
        let report = "\
-----  ----------  ----------
 Name    Self CPU  # of Calls
-----  ----------  ----------
  opA
-----  ----------  ----------
";
        let table = parse_text_table(report.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "Name"), Some(&CellValue::Text("opA".into())));
        assert_eq!(table.cell(0, "Self CPU"), None);
        assert_eq!(table.cell(0, "# of Calls"), None);
    }

    #[test]
    fn test_blank_percent_reads_as_zero() {
        let report = "\
-----  ----------  ----------
 Name  Self CPU %    Self CPU
-----  ----------  ----------
  opA                 1.0ms
-----  ----------  ----------
";
        let table = parse_text_table(report.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "Self CPU %"), Some(&CellValue::Float(0.0)));
        assert_eq!(table.cell(0, "Self CPU"), Some(&CellValue::Float(1.0)));
    }

    #[test]
    fn test_bad_duration_reports_column_and_line() {
        let report = "\
-----  ----------
 Name    Self CPU
-----  ----------
  opA      5.0ns
-----  ----------
";
        let err = parse_text_table(report.as_bytes()).unwrap_err();
        match err {
            ParseError::InvalidValue { column, line, .. } => {
                assert_eq!(column, "Self CPU");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unnamed_row_is_skipped() {
        let report = "\
-----  ----------
 Name    Self CPU
-----  ----------
           5.0ms
  opB      1.0ms
-----  ----------
";
        let table = parse_text_table(report.as_bytes()).unwrap();
        assert_eq!(table.names(), vec![Some("opB")]);
    }

    #[test]
    fn test_no_table_is_empty() {
        let table = parse_text_table("just some text\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn test_rows_without_header_is_error() {
        let report = "----  ----\n----  ----\n  a     b\n";
        assert!(matches!(
            parse_text_table(report.as_bytes()),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
