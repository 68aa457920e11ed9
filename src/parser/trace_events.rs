//! Reader for Chrome-format trace files exported by the profiler.
//!
//! Only the `traceEvents` array matters here. Events are deserialized one
//! at a time so a single malformed event does not reject the whole trace.

use crate::utils::config::{COMPLETE_EVENT_PHASE, UNKNOWN_NAME};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::Deserialize;
use std::io::Read;

/// Top-level trace document
#[derive(Debug, Deserialize)]
struct TraceDocument {
    #[serde(default, rename = "traceEvents")]
    trace_events: Vec<serde_json::Value>,
}

/// One raw trace event
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceEvent {
    /// Phase marker (`X` = complete event with a duration)
    #[serde(default)]
    pub ph: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Category (`cpu_op`, `kernel`, ...)
    #[serde(default)]
    pub cat: Option<String>,

    /// Duration in microseconds
    #[serde(default)]
    pub dur: Option<f64>,
}

impl TraceEvent {
    pub fn is_complete(&self) -> bool {
        self.ph.as_deref() == Some(COMPLETE_EVENT_PHASE)
    }

    /// Event name, `Unknown` when absent or empty
    pub fn name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_NAME,
        }
    }

    pub fn category(&self) -> &str {
        self.cat.as_deref().unwrap_or(UNKNOWN_NAME)
    }

    pub fn duration_us(&self) -> f64 {
        self.dur.unwrap_or(0.0)
    }
}

/// Read a trace document and return its complete events
///
/// **Public** - main entry point for the JSON input format
///
/// # Errors
/// * `ParseError::JsonError` - the document is not valid JSON
/// * `ParseError::InvalidFormat` - every event failed to deserialize
pub fn read_trace_events<R: Read>(reader: R) -> Result<Vec<TraceEvent>, ParseError> {
    let document: TraceDocument = serde_json::from_reader(reader)?;
    let raw_events = document.trace_events;

    debug!("Trace contains {} raw events", raw_events.len());

    let events = parse_events_array(&raw_events)?;
    let complete: Vec<TraceEvent> = events.into_iter().filter(TraceEvent::is_complete).collect();

    debug!("Kept {} complete events", complete.len());
    Ok(complete)
}

/// Deserialize each event, skipping the malformed ones
///
/// **Private** - internal parsing logic
fn parse_events_array(raw_events: &[serde_json::Value]) -> Result<Vec<TraceEvent>, ParseError> {
    let mut events = Vec::with_capacity(raw_events.len());

    for (index, value) in raw_events.iter().enumerate() {
        match TraceEvent::deserialize(value) {
            Ok(event) => events.push(event),
            Err(e) => {
                // Log but don't fail - some events may be malformed
                warn!("Failed to parse trace event {}: {}", index, e);
            }
        }
    }

    if events.is_empty() && !raw_events.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All trace events failed to parse".to_string(),
        ));
    }

    Ok(events)
}
