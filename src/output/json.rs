//! JSON table document writer and reader.
//!
//! Wraps a ProfileTable with a schema version and a timestamp so written
//! files can be validated and loaded again.

use crate::parser::schema::ProfileTable;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Top-level document structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the document was generated
    pub generated_at: String,

    /// Input file(s) the table was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(flatten)]
    pub table: ProfileTable,
}

impl TableDocument {
    pub fn new(table: ProfileTable, source: Option<String>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            source,
            table,
        }
    }

    /// Check that every row is aligned with the column list
    pub fn validate(&self) -> Result<(), OutputError> {
        let width = self.table.columns.len();
        if let Some((i, row)) = self
            .table
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(OutputError::InvalidDocument(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            )));
        }
        Ok(())
    }
}

/// Serialize a document with pretty printing
pub fn write_document<W: Write>(document: &TableDocument, mut writer: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write a table document to a JSON file
///
/// **Public** - convenience wrapper used by tests and library callers
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_table_document(
    document: &TableDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing table document to: {}", output_path.display());

    let file = super::create_output_file(output_path)?;
    let mut writer = BufWriter::new(file);
    write_document(document, &mut writer)?;
    writer.flush()?;

    info!(
        "Table document written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a table document from a JSON file
///
/// **Public** - used by the validate command
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
/// * `OutputError::InvalidDocument` - Rows not aligned with the columns
pub fn read_table_document(input_path: impl AsRef<Path>) -> Result<TableDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading table document from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let document: TableDocument = serde_json::from_reader(BufReader::new(file))?;
    document.validate()?;

    debug!(
        "Table document loaded: version {}, {} rows",
        document.version,
        document.table.len()
    );

    Ok(document)
}
