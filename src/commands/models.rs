use crate::output::{OutputFormat, WriteOptions};
use crate::parser::InputFormat;
use crate::utils::config::{DEFAULT_LABEL_1, DEFAULT_LABEL_2};
use clap::ValueEnum;
use std::path::PathBuf;

/// Plain text or one of the table renderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    Text,
    Table,
}

/// Output options shared by convert and compare
#[derive(Debug, Clone)]
pub struct OutputArgs {
    /// Output path (`-` for stdout, None for a derived default name)
    pub output_file: Option<PathBuf>,

    pub output_type: OutputType,

    /// Rendering used when `output_type` is `Table`
    pub table_format: OutputFormat,

    /// Keep CPU-related columns
    pub include_cpu: bool,

    /// Shorten names to this many characters (table formats only)
    pub name_length: Option<usize>,

    /// Keep only this many rows
    pub num_rows: Option<usize>,
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self {
            output_file: None,
            output_type: OutputType::Table,
            table_format: OutputFormat::Csv,
            include_cpu: true,
            name_length: None,
            num_rows: None,
        }
    }
}

impl OutputArgs {
    /// The effective rendering
    pub fn format(&self) -> OutputFormat {
        match self.output_type {
            OutputType::Text => OutputFormat::Text,
            OutputType::Table => self.table_format,
        }
    }

    /// Suffix of a derived output file name
    pub fn default_suffix(&self, converted: bool) -> &'static str {
        match self.format() {
            OutputFormat::Text if converted => "converted.log",
            format => format.extension(),
        }
    }

    pub fn write_options(&self, source: Option<String>) -> WriteOptions {
        WriteOptions {
            include_cpu: self.include_cpu,
            fill_missing: true,
            max_rows: self.num_rows,
            max_name_length: self.name_length,
            source,
        }
    }
}

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Report to convert
    pub input: PathBuf,

    /// Encoding of the report
    pub input_format: InputFormat,

    pub output: OutputArgs,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            input_format: InputFormat::Text,
            output: OutputArgs::default(),
        }
    }
}

/// Arguments for the compare command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CompareArgs {
    pub file1: PathBuf,
    pub file2: PathBuf,

    /// Encoding of both reports
    pub input_format: InputFormat,

    /// Column suffix for the first report
    pub label1: String,

    /// Column suffix for the second report
    pub label2: String,

    pub output: OutputArgs,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            file1: PathBuf::new(),
            file2: PathBuf::new(),
            input_format: InputFormat::Text,
            label1: DEFAULT_LABEL_1.to_string(),
            label2: DEFAULT_LABEL_2.to_string(),
            output: OutputArgs::default(),
        }
    }
}
