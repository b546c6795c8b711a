// Preprocessor: enriches the raw note sequence with relational metadata

use mania_model::{Chart, Note};

use crate::params::StrainParams;

/// A note enriched with its relation to the preceding note.
///
/// The enriched sequence preserves the chart's start-time order; `index` is
/// the note's position in that sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyNote {
    pub note: Note,
    /// Position in the time-sorted sequence
    pub index: usize,
    /// Gap in milliseconds to the immediately preceding note on any column.
    /// The first note's gap is measured from time zero.
    pub delta_time: f64,
    /// Whether this note starts a new chord rather than continuing the
    /// previous note's chord
    pub chord_head: bool,
}

/// Walk the chart once and build the enriched sequence.
///
/// Chord grouping is decided here, not in the evaluator: a note continues
/// the previous chord iff its delta time is at or under the chord
/// threshold. The first note always heads a chord.
pub fn preprocess(chart: &Chart, params: &StrainParams) -> Vec<DifficultyNote> {
    let mut enriched = Vec::with_capacity(chart.len());
    let mut previous_start = 0.0;

    for (index, &note) in chart.notes().iter().enumerate() {
        // A chart may begin before time zero; the lead-in gap is clamped so
        // a negative elapsed time never reaches the decay curves.
        let delta_time = (note.start_time - previous_start).max(0.0);

        enriched.push(DifficultyNote {
            note,
            index,
            delta_time,
            chord_head: index == 0 || delta_time > params.chord_threshold,
        });
        previous_start = note.start_time;
    }

    log::debug!(
        "preprocessed {} notes across {} columns",
        enriched.len(),
        chart.column_count()
    );
    enriched
}
