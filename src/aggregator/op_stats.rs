//! Per-operation accumulation of trace events.
//!
//! Each complete event adds one call to its operation and, depending on its
//! category, its duration to the CPU-side or the accelerator-side bucket.

use crate::parser::trace_events::TraceEvent;
use crate::utils::config::{ACCELERATOR_CATEGORIES, CPU_CATEGORIES};
use log::debug;
use std::collections::HashMap;

/// Which time bucket an event category feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSide {
    Cpu,
    Accelerator,
    /// Ambiguous categories (driver wrappers, python frames): calls only
    Uncounted,
}

impl EventSide {
    pub fn for_category(category: &str) -> Self {
        if CPU_CATEGORIES.contains(&category) {
            EventSide::Cpu
        } else if ACCELERATOR_CATEGORIES.contains(&category) {
            EventSide::Accelerator
        } else {
            EventSide::Uncounted
        }
    }
}

/// Accumulated statistics of one operation name
#[derive(Debug, Clone, PartialEq)]
pub struct OpStats {
    pub name: String,
    pub calls: u64,
    /// Self time on the CPU side, microseconds
    pub self_cpu_us: f64,
    /// Self time on the accelerator, microseconds
    pub self_cuda_us: f64,
}

impl OpStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: 0,
            self_cpu_us: 0.0,
            self_cuda_us: 0.0,
        }
    }

    /// Fold one event into the statistics
    pub fn record(&mut self, event: &TraceEvent) {
        self.calls += 1;
        match EventSide::for_category(event.category()) {
            EventSide::Cpu => self.self_cpu_us += event.duration_us(),
            EventSide::Accelerator => self.self_cuda_us += event.duration_us(),
            EventSide::Uncounted => {}
        }
    }
}

/// Group events by name
///
/// **Public** - main entry point for aggregation
///
/// # Returns
/// One entry per distinct name, in order of first appearance
pub fn aggregate_events(events: &[TraceEvent]) -> Vec<OpStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<OpStats> = Vec::new();

    for event in events {
        let name = event.name();
        let slot = *index.entry(name).or_insert_with(|| {
            stats.push(OpStats::new(name));
            stats.len() - 1
        });
        stats[slot].record(event);
    }

    debug!("Aggregated {} events into {} operations", events.len(), stats.len());
    stats
}
