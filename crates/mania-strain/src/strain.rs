// Strain evaluator: per-note difficulty fold over per-column decaying state

use anyhow::Result;
use mania_model::Chart;

use crate::decay::{apply_decay, definitely_bigger};
use crate::params::StrainParams;
use crate::preprocess::{DifficultyNote, preprocess};

/// End-time comparisons run at 1 ms precision so that nominally
/// simultaneous notes and releases do not register as overlaps.
const TIME_PRECISION: f64 = 1.0;

/// The per-note strain state machine.
///
/// One instance covers exactly one pass over one chart at one
/// (rate, column count, hit window) combination. Calls to [`evaluate`]
/// must arrive strictly in start-time order; the instance is never shared.
///
/// The chord-wide scalar is named `individual_strain` and the per-column
/// array `column_strains`; the reference implementation used near-identical
/// names for the two, which invited shadowing bugs.
///
/// [`evaluate`]: StrainEvaluator::evaluate
#[derive(Debug)]
pub struct StrainEvaluator {
    params: StrainParams,
    column_count: usize,
    hand_split: usize,
    great_hit_window: f64,

    // Per-column state. `start_times` holds NEG_INFINITY until a column's
    // first note so an untouched column never forms a trill or an easy
    // hand pair; `end_times` starts at zero to match the reference's
    // column-delta seeding.
    start_times: Vec<f64>,
    end_times: Vec<f64>,
    column_strains: Vec<f64>,
    anchor_counts: Vec<u32>,
    trill_counts: Vec<u32>,
    deltas: Vec<f64>,

    individual_strain: f64,
    overall_strain: f64,
    current_strain: f64,
}

impl StrainEvaluator {
    pub fn new(params: StrainParams, column_count: usize, great_hit_window: f64) -> Self {
        assert!(column_count > 0, "evaluator needs at least one column");
        assert!(
            great_hit_window > 0.0,
            "great hit window must be positive, got {great_hit_window}"
        );

        Self {
            params,
            column_count,
            hand_split: column_count / 2,
            great_hit_window,
            start_times: vec![f64::NEG_INFINITY; column_count],
            end_times: vec![0.0; column_count],
            column_strains: vec![0.0; column_count],
            anchor_counts: vec![0; column_count],
            trill_counts: vec![0; column_count],
            deltas: vec![0.0; column_count],
            individual_strain: 0.0,
            // The global accumulator starts at 1 so the very first note
            // already carries a baseline that decays toward it.
            overall_strain: 1.0,
            current_strain: 0.0,
        }
    }

    /// Peak strain already credited within the active strain section.
    ///
    /// Maintained by the external section aggregator; [`evaluate`] returns
    /// the contribution above this baseline so repeated high strain within
    /// one section is not double-counted.
    ///
    /// [`evaluate`]: StrainEvaluator::evaluate
    pub fn set_current_strain(&mut self, current_strain: f64) {
        self.current_strain = current_strain;
    }

    pub fn individual_strain(&self) -> f64 {
        self.individual_strain
    }

    pub fn overall_strain(&self) -> f64 {
        self.overall_strain
    }

    /// Process one note and return its strain contribution.
    ///
    /// Must be called exactly once per enriched note, in sequence order.
    pub fn evaluate(&mut self, note: &DifficultyNote) -> f64 {
        let column = note.note.column;
        assert!(
            column < self.column_count,
            "note on column {column} but the evaluator has {} columns",
            self.column_count
        );

        let start_time = note.note.start_time;
        let end_time = note.note.end_time;

        // Hold-overlap scan: look for held ends inside this note's span and
        // for holds lasting beyond it.
        let mut is_overlapping = false;
        let mut hold_factor = 1.0;
        // Lowest value assumable with the information at hand
        let mut closest_end_time = (end_time - start_time).abs();

        for other in 0..self.column_count {
            is_overlapping |= definitely_bigger(self.end_times[other], start_time, TIME_PRECISION)
                && definitely_bigger(end_time, self.end_times[other], TIME_PRECISION);

            // Something else is still held through this note
            if definitely_bigger(self.end_times[other], end_time, TIME_PRECISION) {
                hold_factor = self.params.hold_factor_bonus;
            }

            closest_end_time = closest_end_time.min((end_time - self.end_times[other]).abs());
        }

        // Awkward lone releases earn the full logistic bonus; releases that
        // cluster with another column's end are as easy as a single one and
        // get almost nothing.
        let hold_addition = if is_overlapping {
            1.0 / (1.0 + (0.5 * (self.params.release_threshold - closest_end_time)).exp())
        } else {
            0.0
        };

        // Anchor run: consecutive same-column gaps must stay within
        // tolerance of each other, otherwise the run restarts. The gap is
        // clamped at zero so a note tucked under its own column's earlier
        // hold cannot turn decay into amplification.
        let column_delta = (end_time - self.end_times[column]).max(0.0);
        if (self.deltas[column] - column_delta).abs() > self.params.anchor_tolerance {
            self.anchor_counts[column] = 0;
        } else {
            self.anchor_counts[column] += 1;
        }
        let effective_anchor = self.anchor_counts[column].min(self.params.max_anchor);

        let trill_addition = self.update_trills(column, start_time);

        // Decay the column's strain over the time since it was last hit,
        // then add this note's contributions.
        let mut column_strain = apply_decay(
            self.column_strains[column],
            column_delta,
            self.params.individual_decay_base,
        ) + self.params.base_increment * hold_factor;

        if self.anchor_counts[column] >= self.params.min_anchor {
            column_strain += self.params.anchor_bonus * f64::from(effective_anchor);
        }
        column_strain += trill_addition;

        // A hand repeating an easy pattern on every pair is mashable and
        // should not rate like genuine cross-hand coordination.
        if self.hand_is_easy(column) {
            column_strain *= self.params.hand_nerf_multiplier;
        }
        self.column_strains[column] = column_strain;

        // Within a chord the hardest column wins; otherwise this column's
        // fresh value replaces the scalar.
        self.individual_strain = if note.chord_head {
            column_strain
        } else {
            self.individual_strain.max(column_strain)
        };

        self.overall_strain = apply_decay(
            self.overall_strain,
            note.delta_time,
            self.params.overall_decay_base,
        ) + (1.0 + hold_addition) * hold_factor;

        self.start_times[column] = start_time;
        self.end_times[column] = end_time;
        self.deltas[column] = column_delta;

        // Only the peak above the already-credited section baseline counts
        self.individual_strain + self.overall_strain - self.current_strain
    }

    /// Seed value for a strain section starting at `offset_ms`, before the
    /// given first note of the section is processed.
    pub fn initial_strain(&self, offset_ms: f64, first: &DifficultyNote) -> f64 {
        let elapsed = offset_ms - first.note.start_time;
        apply_decay(self.individual_strain, elapsed, self.params.individual_decay_base)
            + apply_decay(self.overall_strain, elapsed, self.params.overall_decay_base)
    }

    /// Update trill runs against the columns adjacent to `column` and
    /// return the accumulated bonus.
    ///
    /// A hit requires the neighbor to have been struck after this column's
    /// own previous note, close enough in time, and not sitting in a strong
    /// anchor run of its own. Any hit extends the run; no hit on either
    /// neighbor resets it.
    fn update_trills(&mut self, column: usize, start_time: f64) -> f64 {
        let mut addition = 0.0;
        let mut any_hit = false;

        let lower = column.saturating_sub(1);
        let upper = (column + 1).min(self.column_count - 1);

        for adjacent in lower..=upper {
            if adjacent == column {
                continue;
            }

            let hit = self.start_times[adjacent] > self.start_times[column]
                && start_time - self.start_times[adjacent] < self.params.trill_min_time
                && self.anchor_counts[adjacent] < self.params.max_anchor;

            if hit {
                any_hit = true;
                self.trill_counts[column] =
                    (self.trill_counts[column] + 1).min(self.params.max_trill);
                addition += self.params.trill_bonus
                    * self.column_strains[adjacent]
                    * f64::from(self.trill_counts[column]);
            }
        }

        if !any_hit {
            self.trill_counts[column] = 0;
        }
        addition
    }

    /// Whether every adjacent column pair in the hand owning `column`
    /// qualifies as an easy anchor.
    fn hand_is_easy(&self, column: usize) -> bool {
        let (lower, upper) = if column >= self.hand_split {
            (self.hand_split, self.column_count)
        } else {
            (0, self.hand_split)
        };

        // A hand with fewer than two columns has no pair to judge
        if upper - lower < 2 {
            return false;
        }

        (lower..upper - 1).all(|a| self.is_easy_pair(a, a + 1))
    }

    /// An adjacent pair is easy when both columns sit in long anchor runs,
    /// when their last notes land within the hit window of each other
    /// (mashable as one press), or when the pair has idled long enough that
    /// no coordination is being asked of it.
    fn is_easy_pair(&self, a: usize, b: usize) -> bool {
        let time_a = self.start_times[a];
        let time_b = self.start_times[b];

        // A column that has never been hit offers no evidence of easiness
        if !time_a.is_finite() || !time_b.is_finite() {
            return false;
        }

        let gap = (time_a - time_b).abs();
        let anchored = self.anchor_counts[a] >= self.params.min_anchor
            && self.anchor_counts[b] >= self.params.min_anchor;

        anchored || gap > self.params.hand_idle_threshold || gap <= self.great_hit_window
    }
}

/// Run the full pipeline: preprocess the chart, then fold the evaluator
/// over the enriched sequence, yielding one strain contribution per note.
pub fn strain_values(
    chart: &Chart,
    params: StrainParams,
    great_hit_window: f64,
) -> Result<Vec<f64>> {
    params.validate()?;

    let enriched = preprocess(chart, &params);
    let mut evaluator = StrainEvaluator::new(params, chart.column_count(), great_hit_window);

    Ok(enriched.iter().map(|note| evaluator.evaluate(note)).collect())
}
