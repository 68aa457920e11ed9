//! Profile table comparison.
//!
//! This module aligns two normalized tables (baseline vs target) on the
//! operation name so each metric can be read side by side.
//!
//! # Example
//! ```ignore
//! use proflog_studio::diff::compare_tables;
//! use proflog_studio::parser::{parse_profile, InputFormat};
//!
//! let baseline = parse_profile(reader_a, InputFormat::Text)?;
//! let target = parse_profile(reader_b, InputFormat::Text)?;
//! let joined = compare_tables(&baseline, &target, "A100", "H100")?;
//! ```

mod engine;

// Public API exports
pub use engine::compare_tables;

// Error type
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Comparison labels must differ, both are '{0}'")]
    LabelCollision(String),

    #[error("Table '{0}' has no Name column")]
    MissingKeyColumn(String),

    #[error(
        "Name '{name}' appears more than once in table '{label}' \
         (reports grouped by input shape repeat names; compare ungrouped reports)"
    )]
    DuplicateKey { name: String, label: String },
}
