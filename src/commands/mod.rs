//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod compare;
pub mod convert;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use compare::execute_compare;
pub use convert::execute_convert;
pub use models::{CompareArgs, ConvertArgs, OutputArgs, OutputType};
pub use utils::{display_schema, display_version, validate_table_file};

use anyhow::{bail, Result};

/// Reject output options that cannot produce a table
///
/// **Private** - shared by both validators
fn validate_output_args(output: &OutputArgs) -> Result<()> {
    if output.name_length == Some(0) {
        bail!("--output-name-length must be greater than zero");
    }
    if output.num_rows == Some(0) {
        bail!("--output-num-of-rows must be greater than zero");
    }
    Ok(())
}

/// Validate convert arguments before doing any work
///
/// **Public** - called from main.rs
pub fn validate_convert_args(args: &ConvertArgs) -> Result<()> {
    if !args.input.exists() {
        bail!("Input file not found: {}", args.input.display());
    }
    validate_output_args(&args.output)
}

/// Validate compare arguments before doing any work
///
/// **Public** - called from main.rs
pub fn validate_compare_args(args: &CompareArgs) -> Result<()> {
    for path in [&args.file1, &args.file2] {
        if !path.exists() {
            bail!("Input file not found: {}", path.display());
        }
    }
    if args.label1.is_empty() || args.label2.is_empty() {
        bail!("Labels must not be empty");
    }
    if args.label1 == args.label2 {
        bail!("Labels must differ, both are '{}'", args.label1);
    }
    validate_output_args(&args.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_compare_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.log");
        std::fs::write(&path, "").unwrap();

        let mut args = CompareArgs {
            file1: path.clone(),
            file2: path,
            ..CompareArgs::default()
        };
        assert!(validate_compare_args(&args).is_ok());

        args.label2 = args.label1.clone();
        assert!(validate_compare_args(&args).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.log");
        std::fs::write(&path, "").unwrap();

        let mut args = ConvertArgs {
            input: path,
            ..ConvertArgs::default()
        };
        args.output.num_rows = Some(0);
        assert!(validate_convert_args(&args).is_err());
    }

    #[test]
    fn test_validate_missing_input() {
        let args = ConvertArgs {
            input: "/nonexistent/report.log".into(),
            ..ConvertArgs::default()
        };
        assert!(validate_convert_args(&args).is_err());
    }
}
