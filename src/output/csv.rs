//! CSV rendering.
//!
//! Missing cells are written as empty fields, which the `table` input
//! format reads back as missing.

use crate::parser::schema::ProfileTable;
use crate::utils::error::OutputError;
use std::io::Write;

/// Write the table as CSV with a header row
pub fn write_csv<W: Write>(table: &ProfileTable, writer: W) -> Result<(), OutputError> {
    let mut wtr = ::csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(&table.columns)?;

    for row in &table.rows {
        let record: Vec<String> = row
            .iter()
            .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
