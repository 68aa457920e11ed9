//! Aggregation of trace events into the normalized profile table.
//!
//! This module transforms complete trace events into:
//! - Per-operation call counts and self times (CPU vs accelerator)
//! - Percentage-of-total and per-call columns

pub mod metrics;
pub mod op_stats;

// Re-export main types and functions
pub use metrics::{build_profile_table, per_call, share_percent, TraceTotals};
pub use op_stats::{aggregate_events, EventSide, OpStats};
