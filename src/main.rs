//! Proflog Studio CLI
//!
//! Converts profiler reports into normalized tables and compares two
//! reports side by side.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use proflog_studio::commands::{
    display_schema, display_version, execute_compare, execute_convert, validate_compare_args,
    validate_convert_args, validate_table_file, CompareArgs, ConvertArgs, OutputArgs, OutputType,
};
use proflog_studio::output::OutputFormat;
use proflog_studio::parser::InputFormat;
use proflog_studio::utils::config::{DEFAULT_LABEL_1, DEFAULT_LABEL_2};

/// Proflog Studio - profiler report normalization and comparison
#[derive(Parser, Debug)]
#[command(name = "proflog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Output options shared by convert and compare
#[derive(Args, Debug)]
struct OutputOpts {
    /// Output path (`-` for stdout; derived from the inputs when omitted)
    #[arg(short, long = "output-file")]
    output: Option<PathBuf>,

    /// Drop CPU-related columns
    #[arg(long)]
    no_output_cpu: bool,

    /// Shorten operation names to this many characters (table output only)
    #[arg(long)]
    output_name_length: Option<usize>,

    /// Keep only the first N rows
    #[arg(long)]
    output_num_of_rows: Option<usize>,

    /// Plain text or a table rendering
    #[arg(long, value_enum, default_value = "table")]
    output_type: OutputType,

    /// Table rendering: csv, markdown or json
    #[arg(short = 't', long, default_value = "csv", env = "PROFLOG_TABLE_TYPE")]
    output_table_type: OutputFormat,
}

impl From<OutputOpts> for OutputArgs {
    fn from(opts: OutputOpts) -> Self {
        Self {
            output_file: opts.output,
            output_type: opts.output_type,
            table_format: opts.output_table_type,
            include_cpu: !opts.no_output_cpu,
            name_length: opts.output_name_length,
            num_rows: opts.output_num_of_rows,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one report into a normalized table
    Convert {
        /// Report to convert (may be gzip-compressed)
        file: PathBuf,

        /// Input encoding: text, table or json
        #[arg(short = 'i', long, default_value = "text")]
        input_type: InputFormat,

        #[command(flatten)]
        output: OutputOpts,
    },

    /// Compare two reports of the same encoding
    Compare {
        /// First report
        file1: PathBuf,

        /// Second report
        file2: PathBuf,

        /// Input encoding: text, table or json
        #[arg(short = 'i', long, default_value = "text")]
        input_type: InputFormat,

        /// Column suffix for the first report
        #[arg(short = '1', long, default_value = DEFAULT_LABEL_1)]
        label1: String,

        /// Column suffix for the second report
        #[arg(short = '2', long, default_value = DEFAULT_LABEL_2)]
        label2: String,

        #[command(flatten)]
        output: OutputOpts,
    },

    /// Validate a JSON table document
    Validate {
        /// Path to the table JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Convert {
            file,
            input_type,
            output,
        } => {
            let args = ConvertArgs {
                input: file,
                input_format: input_type,
                output: output.into(),
            };

            validate_convert_args(&args)?;
            execute_convert(args)?;
        }

        Commands::Compare {
            file1,
            file2,
            input_type,
            label1,
            label2,
            output,
        } => {
            let args = CompareArgs {
                file1,
                file2,
                input_format: input_type,
                label1,
                label2,
                output: output.into(),
            };

            validate_compare_args(&args)?;
            execute_compare(args)?;
        }

        Commands::Validate { file } => {
            validate_table_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
