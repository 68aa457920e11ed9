//! Fixed-width column layout detection.
//!
//! Profiler text tables frame their header with separator rules such as
//!
//! ```text
//! ------------------  ------------  ------------
//!               Name    Self CPU %      Self CPU
//! ------------------  ------------  ------------
//! ```
//!
//! Each dash run is one column; the run plus its two-space gutter is the
//! column width. The cumulative widths ("stops") slice every later line.

/// Whether a line is a separator rule (only dashes and spaces, dash first)
pub fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('-') && trimmed.chars().all(|c| c == '-' || c == ' ')
}

/// Column-end offsets derived from one separator line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    stops: Vec<usize>,
}

impl Layout {
    /// Derive the stops from a separator line
    ///
    /// **Public** - called once per file, on the first separator
    ///
    /// A stop sits where the next dash run begins; the last column extends
    /// two characters past its run. With the profiler's two-space gutters
    /// this equals the running sum of `run length + 2`.
    ///
    /// A line without any dash run yields an empty layout.
    pub fn from_separator(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let runs = dash_runs(line);

        let stops = runs
            .iter()
            .enumerate()
            .map(|(i, &(_, end))| match runs.get(i + 1) {
                Some(&(next_start, _)) => next_start,
                None => end + 2,
            })
            .collect();

        Self { stops }
    }

    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.stops.len()
    }

    /// Slice a line into one trimmed field per column
    ///
    /// Offsets count characters. Lines shorter than the layout yield empty
    /// trailing fields; text past the last stop is dropped.
    pub fn split(&self, line: &str) -> Vec<String> {
        let chars: Vec<char> = line.trim_end_matches(['\r', '\n']).chars().collect();
        let mut start = 0;

        self.stops
            .iter()
            .map(|&stop| {
                let from = start.min(chars.len());
                let to = stop.min(chars.len());
                start = stop;
                chars[from..to].iter().collect::<String>().trim().to_string()
            })
            .collect()
    }
}

/// `(start, end)` character offsets of every dash run in a line
fn dash_runs(line: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start = None;

    for (i, c) in line.chars().enumerate() {
        match (c == '-', run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                runs.push((start, i));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        runs.push((start, line.chars().count()));
    }

    runs
}
