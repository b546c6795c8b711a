// Density reducer: trimmed-mean notes-per-second rating over a chart

use mania_model::Note;

/// Window length for one notes-per-second sample.
const WINDOW_MS: f64 = 1000.0;

/// Once more than this many samples exist, only the busiest are kept.
const TRIM_THRESHOLD: usize = 50;

/// Number of samples retained after trimming.
const TRIM_KEEP: usize = 35;

/// Reduce a chart to a single notes-per-second rating.
///
/// Start times are rescaled by `rate` to model playback-speed modifiers,
/// then bucketed into one-second windows anchored at the first note of each
/// window. The window counts are sorted busiest-first; charts with more
/// than 50 windows keep only their 35 busiest, so short dense bursts and
/// long quiet stretches do not drown each other out. The result is the
/// arithmetic mean of the retained counts.
///
/// An empty note list yields 0.0 rather than a division by zero.
pub fn note_density(notes: &[Note], rate: f64) -> f64 {
    assert!(rate > 0.0, "playback rate must be positive, got {rate}");

    let Some(first) = notes.first() else {
        log::warn!("density requested for an empty note list");
        return 0.0;
    };

    let mut samples: Vec<f64> = Vec::new();
    let mut window_start = first.start_time / rate;
    let mut window_count: usize = 0;

    for note in notes {
        let start_time = note.start_time / rate;

        if start_time - window_start < WINDOW_MS {
            window_count += 1;
        } else {
            samples.push(window_count as f64);
            window_start = start_time;
            window_count = 1;
        }
    }
    // The final window counts too; dropping it would shave the tail off
    // every chart.
    samples.push(window_count as f64);

    samples.sort_by(|a, b| b.total_cmp(a));
    if samples.len() > TRIM_THRESHOLD {
        samples.truncate(TRIM_KEEP);
    }

    samples.iter().sum::<f64>() / samples.len() as f64
}
