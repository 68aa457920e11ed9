//! Output writers for normalized profile tables.
//!
//! This module handles rendering tables in various formats:
//! - Fixed-width text
//! - CSV (loadable again as the `table` input format)
//! - Markdown pipe tables
//! - Versioned JSON documents

pub mod csv;
pub mod json;
pub mod markdown;
pub mod text;

// Re-export main functions
pub use json::{read_table_document, write_table_document, TableDocument};

use crate::parser::schema::{is_cpu_column, CellValue, ProfileTable};
use crate::utils::config::NAME_COLUMN;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Supported renderings of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Default file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "log",
            OutputFormat::Csv => "csv",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }

    /// Table formats shorten long names; plain text keeps them whole
    pub fn is_table(&self) -> bool {
        !matches!(self, OutputFormat::Text)
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" | "github" | "pipe" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(OutputError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Narrowing and formatting applied before rendering
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Keep CPU-related columns
    pub include_cpu: bool,

    /// Replace missing numeric cells with zero
    pub fill_missing: bool,

    /// Keep only the first N rows
    pub max_rows: Option<usize>,

    /// Shorten names longer than N characters (table formats only)
    pub max_name_length: Option<usize>,

    /// Where the table came from (recorded in JSON documents)
    pub source: Option<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            include_cpu: true,
            fill_missing: true,
            max_rows: None,
            max_name_length: None,
            source: None,
        }
    }
}

/// Apply the write options to a copy of the table
///
/// **Public** - the writers never mutate the caller's table
pub fn prepare_table(table: &ProfileTable, options: &WriteOptions, format: OutputFormat) -> ProfileTable {
    let mut table = table.clone();

    if !options.include_cpu {
        table.retain_columns(|c| !is_cpu_column(c));
    }

    if options.fill_missing {
        fill_missing_cells(&mut table);
    }

    if let Some(max_rows) = options.max_rows {
        table.rows.truncate(max_rows);
    }

    if let (Some(max_len), true) = (options.max_name_length, format.is_table()) {
        shorten_names(&mut table, max_len);
    }

    table
}

/// Fill gaps with the zero of each column's numeric type
fn fill_missing_cells(table: &mut ProfileTable) {
    for col in 0..table.columns.len() {
        let zero = table
            .rows
            .iter()
            .find_map(|row| row[col].as_ref())
            .map(CellValue::zero_like)
            .unwrap_or(CellValue::Int(0));

        for row in &mut table.rows {
            if row[col].is_none() {
                row[col] = Some(zero.clone());
            }
        }
    }
}

/// Cut names to `max_len` characters plus an ellipsis
fn shorten_names(table: &mut ProfileTable, max_len: usize) {
    let Some(col) = table.column_index(NAME_COLUMN) else {
        return;
    };

    for row in &mut table.rows {
        if let Some(CellValue::Text(name)) = &mut row[col] {
            if name.chars().count() > max_len {
                let short: String = name.chars().take(max_len).collect();
                *name = format!("{}...", short);
            }
        }
    }
}

/// Render a table to any writer
///
/// **Public** - main entry point for output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::CsvFailed` / `SerializationFailed` - encoder errors
pub fn render_table<W: Write>(
    table: &ProfileTable,
    format: OutputFormat,
    options: &WriteOptions,
    writer: W,
) -> Result<(), OutputError> {
    let prepared = prepare_table(table, options, format);
    debug!(
        "Rendering {} columns x {} rows as {}",
        prepared.columns.len(),
        prepared.len(),
        format
    );

    match format {
        OutputFormat::Text => text::write_text(&prepared, writer),
        OutputFormat::Csv => csv::write_csv(&prepared, writer),
        OutputFormat::Markdown => markdown::write_markdown(&prepared, writer),
        OutputFormat::Json => {
            let document = TableDocument::new(prepared, options.source.clone());
            json::write_document(&document, writer)
        }
    }
}

/// Render a table into a file, creating parent directories as needed
pub fn write_table(
    table: &ProfileTable,
    format: OutputFormat,
    options: &WriteOptions,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} table to: {}", format, output_path.display());

    let file = create_output_file(output_path)?;
    let mut writer = BufWriter::new(file);
    render_table(table, format, options, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Validate the path, create missing parents, open the file
pub fn create_output_file(output_path: &Path) -> Result<File, OutputError> {
    validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    File::create(output_path).map_err(OutputError::WriteFailed)
}

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
