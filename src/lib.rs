//! Proflog Studio
//!
//! Normalization and comparison of compute-kernel profiler reports.
//!
//! Three report encodings are read into one typed table: the fixed-width
//! text summary printed by the profiler, a CSV export of that summary, and
//! the raw JSON trace of timed events. Tables can then be rendered as text,
//! CSV, Markdown or JSON, or two of them joined on the operation name.
//!
//! This crate provides the core implementation for the `proflog` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! proflog convert -i json trace.json -t markdown
//! proflog compare before.log after.log -1 before -2 after
//! ```

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod output;
pub mod parser;
pub mod utils;
