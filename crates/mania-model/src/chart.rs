use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::note::Note;

/// A validated, time-ordered note sequence over a fixed number of columns.
///
/// Construction is the trust boundary: once a `Chart` exists, its notes are
/// sorted by non-decreasing start time, every column index is in range, and
/// every end time is at or after its start time. Downstream difficulty code
/// relies on these invariants without re-checking them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    notes: Vec<Note>,
    column_count: usize,
}

impl Chart {
    pub fn new(notes: Vec<Note>, column_count: usize) -> Result<Self> {
        if column_count == 0 {
            anyhow::bail!("chart must have at least one column");
        }

        for (i, note) in notes.iter().enumerate() {
            if note.column >= column_count {
                anyhow::bail!(
                    "note {} is on column {} but the chart has {} columns",
                    i,
                    note.column,
                    column_count
                );
            }
            if note.end_time < note.start_time {
                anyhow::bail!(
                    "note {} ends at {}ms before it starts at {}ms",
                    i,
                    note.end_time,
                    note.start_time
                );
            }
        }

        for pair in notes.windows(2) {
            if pair[1].start_time < pair[0].start_time {
                anyhow::bail!(
                    "notes are not ordered by start time ({}ms followed by {}ms)",
                    pair[0].start_time,
                    pair[1].start_time
                );
            }
        }

        Ok(Self { notes, column_count })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Column index splitting the playfield into a lower and an upper hand.
    ///
    /// Columns `[0, hand_split)` belong to one hand, `[hand_split,
    /// column_count)` to the other.
    pub fn hand_split(&self) -> usize {
        self.column_count / 2
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
