//! Configuration and constants for the engine and the CLI.

/// Current table document schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Join key shared by every profile table
pub const NAME_COLUMN: &str = "Name";

/// Meta-event emitted by the profiler around the whole capture
pub const PROFILER_ROOT_NAME: &str = "PyTorch Profiler (0)";

/// Phase marker of a "complete" trace event (has a duration)
pub const COMPLETE_EVENT_PHASE: &str = "X";

/// Placeholder for events that carry no name or category
pub const UNKNOWN_NAME: &str = "Unknown";

// Column kinds. Anything not listed here stays a raw string.
pub const INTEGER_COLUMNS: &[&str] = &["# of Calls"];
pub const PERCENT_COLUMNS: &[&str] = &["Self CPU %", "CPU total %", "Self CUDA %"];
pub const DURATION_COLUMNS: &[&str] = &[
    "Self CPU",
    "CPU total",
    "CPU time avg",
    "Self CUDA",
    "CUDA total",
    "CUDA time avg",
];

/// Canonical column display order of a normalized table
pub const CANONICAL_COLUMNS: &[&str] = &[
    "Name",
    "Self CPU %",
    "Self CPU",
    "CPU total %",
    "CPU total",
    "CPU time avg",
    "Self CUDA",
    "Self CUDA %",
    "CUDA total",
    "CUDA time avg",
    "# of Calls",
];

/// Substring marking a CPU-related column (dropped by `--no-output-cpu`)
pub const CPU_COLUMN_MARKER: &str = "CPU";

// Trace event categories. Categories in neither set (e.g. driver wrappers,
// python_function) only count towards the call count.
pub const CPU_CATEGORIES: &[&str] = &[
    "cpu_op",
    "cuda_runtime",
    "user_annotation",
    "Trace",
    "ac2g",
    "null",
    "gpu_user_annotation",
];
pub const ACCELERATOR_CATEGORIES: &[&str] = &["gpu_memcpy", "gpu_memset", "kernel"];

/// Default labels for the two sides of a comparison
pub const DEFAULT_LABEL_1: &str = "File1";
pub const DEFAULT_LABEL_2: &str = "File2";

/// Gzip magic bytes
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
