//! Compare command implementation.
//!
//! Parses two reports of the same encoding and writes their outer join.

use super::models::CompareArgs;
use super::utils::{read_profile_file, write_output};
use crate::diff::compare_tables;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Execute the compare command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Either report fails to parse
/// * Label collision or duplicate operation names
/// * File write errors
pub fn execute_compare(args: CompareArgs) -> Result<()> {
    let start_time = Instant::now();

    info!(
        "Comparing {} ({}) with {} ({})",
        args.file1.display(),
        args.label1,
        args.file2.display(),
        args.label2
    );

    info!("Step 1/3: Parsing first report...");
    let left = read_profile_file(&args.file1, args.input_format)?;

    info!("Step 2/3: Parsing second report...");
    let right = read_profile_file(&args.file2, args.input_format)?;

    let joined = compare_tables(&left, &right, &args.label1, &args.label2)
        .context("Failed to compare reports")?;

    debug!(
        "Joined table: {} columns, {} rows ({} + {} input rows)",
        joined.columns.len(),
        joined.len(),
        left.len(),
        right.len()
    );

    info!("Step 3/3: Writing {} output...", args.output.format());
    let source = format!("{} vs {}", args.file1.display(), args.file2.display());
    let options = args.output.write_options(Some(source));
    let default_path = default_compare_path(
        &args.label1,
        &args.label2,
        args.output.default_suffix(false),
    );
    write_output(&joined, &args.output, &options, default_path)?;

    let elapsed = start_time.elapsed();
    info!("Compare completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// `profiling-compare-<label1>-<label2>.<suffix>` in the working directory
fn default_compare_path(label1: &str, label2: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("profiling-compare-{}-{}.{}", label1, label2, suffix))
}
