//! Convert command implementation.
//!
//! The convert command:
//! 1. Opens the report (gzip is detected automatically)
//! 2. Parses it into a normalized table
//! 3. Applies the output options
//! 4. Writes the rendering

use super::models::ConvertArgs;
use super::utils::{read_profile_file, write_output};
use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Convert command arguments
///
/// # Errors
/// * Unreadable or malformed input report
/// * File write errors
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Converting {} ({})", args.input.display(), args.input_format);

    info!("Step 1/2: Parsing report...");
    let table = read_profile_file(&args.input, args.input_format)?;

    debug!(
        "Parsed table: {} columns, {} rows",
        table.columns.len(),
        table.len()
    );

    info!("Step 2/2: Writing {} output...", args.output.format());
    let options = args
        .output
        .write_options(Some(args.input.display().to_string()));
    let default_path = default_convert_path(&args.input, args.output.default_suffix(true));
    write_output(&table, &args.output, &options, default_path)?;

    let elapsed = start_time.elapsed();
    info!("Convert completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// `<stem>.<suffix>` next to the input
///
/// **Private** - internal helper for execute_convert
fn default_convert_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "profile".to_string());
    input.with_file_name(format!("{}.{}", stem, suffix))
}
