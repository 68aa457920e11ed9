//! Derive the canonical profile table from per-operation statistics.
//!
//! Grand totals of CPU and accelerator self time are the denominators of
//! the percentage columns. Inclusive ("total") times are not available in
//! a flat event stream, so they repeat the self times and the resulting
//! table is flagged with `totals_are_self_time`.

use super::op_stats::OpStats;
use crate::parser::schema::{CellValue, ProfileTable};
use crate::parser::units::{round2, TimeUnit};
use crate::utils::config::{CANONICAL_COLUMNS, PROFILER_ROOT_NAME};
use log::debug;

/// Grand totals across every operation, microseconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TraceTotals {
    pub self_cpu_us: f64,
    pub self_cuda_us: f64,
}

impl TraceTotals {
    pub fn from_stats(stats: &[OpStats]) -> Self {
        stats.iter().fold(Self::default(), |acc, s| Self {
            self_cpu_us: acc.self_cpu_us + s.self_cpu_us,
            self_cuda_us: acc.self_cuda_us + s.self_cuda_us,
        })
    }
}

/// Share of `part` in `total`, in percent rounded to two decimals
///
/// **Public** - 0.0 when the total is zero
pub fn share_percent(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        round2(part / total * 100.0)
    } else {
        0.0
    }
}

/// `value / calls`, or 0.0 without calls
pub fn per_call(value: f64, calls: u64) -> f64 {
    if calls > 0 {
        value / calls as f64
    } else {
        0.0
    }
}

/// Build the normalized table from aggregated statistics
///
/// **Public** - final step of the JSON input path
///
/// # Algorithm
/// 1. Compute CPU and accelerator grand totals
/// 2. Emit one row per operation (times in ms, percentages of the totals)
/// 3. Drop the profiler's own root annotation
/// 4. Sort by name
pub fn build_profile_table(stats: &[OpStats]) -> ProfileTable {
    let totals = TraceTotals::from_stats(stats);
    debug!(
        "Trace totals: {:.3}us CPU, {:.3}us accelerator",
        totals.self_cpu_us, totals.self_cuda_us
    );

    let mut table = ProfileTable::new(CANONICAL_COLUMNS.iter().copied());
    table.totals_are_self_time = true;

    for op in stats.iter().filter(|op| op.name != PROFILER_ROOT_NAME) {
        table.push_row(build_row(op, &totals));
    }

    table.sort_by_name();
    table
}

/// One row in canonical column order
///
/// **Private** - keep in sync with `CANONICAL_COLUMNS`
fn build_row(op: &OpStats, totals: &TraceTotals) -> Vec<Option<CellValue>> {
    let us = TimeUnit::Microseconds;

    let self_cpu_pct = share_percent(op.self_cpu_us, totals.self_cpu_us);
    let self_cuda_pct = share_percent(op.self_cuda_us, totals.self_cuda_us);
    // Total time is a self-time proxy
    let cpu_total_us = op.self_cpu_us;
    let cuda_total_us = op.self_cuda_us;

    [
        CellValue::Text(op.name.clone()),
        CellValue::Float(self_cpu_pct),
        CellValue::Float(us.to_ms(op.self_cpu_us)),
        CellValue::Float(share_percent(cpu_total_us, totals.self_cpu_us)),
        CellValue::Float(us.to_ms(cpu_total_us)),
        CellValue::Float(us.to_ms(per_call(op.self_cpu_us, op.calls))),
        CellValue::Float(us.to_ms(op.self_cuda_us)),
        CellValue::Float(self_cuda_pct),
        CellValue::Float(us.to_ms(cuda_total_us)),
        CellValue::Float(us.to_ms(per_call(op.self_cuda_us, op.calls))),
        CellValue::Int(i64::try_from(op.calls).unwrap_or(i64::MAX)),
    ]
    .into_iter()
    .map(Some)
    .collect()
}
