//! Fixed-width text rendering.
//!
//! Every column is as wide as its longest cell (or header) and values are
//! right-aligned, separated by two spaces.

use crate::parser::schema::ProfileTable;
use crate::utils::error::OutputError;
use std::io::Write;

/// Render the table as aligned plain text
pub fn write_text<W: Write>(table: &ProfileTable, mut writer: W) -> Result<(), OutputError> {
    writer.write_all(table_to_text(table).as_bytes())?;
    Ok(())
}

/// Render the table as aligned plain text into a string
pub fn table_to_text(table: &ProfileTable) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, table.columns.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = fields
        .zip(widths)
        .map(|(field, &width)| format!("{:>width$}", field, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CellValue;

    #[test]
    fn test_table_to_text() {
        let mut table = ProfileTable::new(["Name", "Self CPU", "# of Calls"]);
        table.push_row(vec![
            Some("aten::mm".into()),
            Some(CellValue::Float(3.0)),
            Some(CellValue::Int(2)),
        ]);
        table.push_row(vec![Some("relu".into()), Some(CellValue::Float(0.25)), None]);

        let text = table_to_text(&table);
        let expected = "\
    Name  Self CPU  # of Calls
aten::mm       3.0           2
    relu      0.25
";
        assert_eq!(text, expected);
    }
}
