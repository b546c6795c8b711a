use serde::{Deserialize, Serialize};

/// A single note in an N-key chart.
///
/// Times are in milliseconds. A tap has `end_time == start_time`;
/// a hold has `end_time > start_time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Column index (0-indexed)
    pub column: usize,
    /// Start time in milliseconds
    pub start_time: f64,
    /// End time in milliseconds (equals start_time for taps)
    pub end_time: f64,
}

impl Note {
    pub fn tap(column: usize, time: f64) -> Self {
        Self {
            column,
            start_time: time,
            end_time: time,
        }
    }

    pub fn hold(column: usize, start_time: f64, end_time: f64) -> Self {
        Self {
            column,
            start_time,
            end_time,
        }
    }

    pub fn is_hold(&self) -> bool {
        self.end_time > self.start_time
    }

    /// Duration in milliseconds (0 for taps)
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
