use criterion::{Criterion, criterion_group, criterion_main};

use mania_model::{Chart, KeyMode, Note};
use mania_strain::{StrainParams, note_density, strain_values};

/// Synthetic 7K stream chart: `count` notes cycling across columns with a
/// hold every 16th note.
fn stream_chart(count: usize) -> Chart {
    let columns = KeyMode::Key7.column_count();
    let notes = (0..count)
        .map(|i| {
            let column = (i * 3) % columns;
            let time = i as f64 * 45.0;
            if i % 16 == 0 {
                Note::hold(column, time, time + 300.0)
            } else {
                Note::tap(column, time)
            }
        })
        .collect();
    Chart::new(notes, columns).unwrap()
}

fn bench_strain_values(c: &mut Criterion) {
    let chart = stream_chart(10_000);
    let params = StrainParams::default();

    c.bench_function("strain_values_10k_notes", |b| {
        b.iter(|| strain_values(&chart, params, 40.0).unwrap());
    });
}

fn bench_note_density(c: &mut Criterion) {
    let chart = stream_chart(10_000);

    c.bench_function("note_density_10k_notes", |b| {
        b.iter(|| note_density(chart.notes(), 1.5));
    });
}

criterion_group!(benches, bench_strain_values, bench_note_density);
criterion_main!(benches);
