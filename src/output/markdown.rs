//! Markdown (GitHub pipe table) rendering.

use crate::parser::schema::{CellValue, ProfileTable};
use crate::utils::error::OutputError;
use std::io::Write;

/// Write the table as a pipe table; numeric columns are right-aligned
pub fn write_markdown<W: Write>(table: &ProfileTable, mut writer: W) -> Result<(), OutputError> {
    let header: Vec<String> = table.columns.iter().map(|c| escape(c)).collect();
    writeln!(writer, "| {} |", header.join(" | "))?;

    let rules: Vec<&str> = (0..table.columns.len())
        .map(|col| if is_numeric_column(table, col) { "---:" } else { ":---" })
        .collect();
    writeln!(writer, "|{}|", rules.join("|"))?;

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.as_ref().map(|v| escape(&v.to_string())).unwrap_or_default())
            .collect();
        writeln!(writer, "| {} |", cells.join(" | "))?;
    }

    Ok(())
}

/// A column is numeric when every present cell is a number
fn is_numeric_column(table: &ProfileTable, col: usize) -> bool {
    let mut present = table.rows.iter().filter_map(|row| row[col].as_ref()).peekable();
    present.peek().is_some() && present.all(|v| !matches!(v, CellValue::Text(_)))
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
