//! Benchmarks for capture, encoding and schedule construction
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use handwriting_replay::{
    deserialize, serialize, PlaybackSchedule, Position, Recording, SegmentRecorder,
};
use std::time::Duration;

/// Record a zig-zag drawing sampled every millisecond
fn synthetic_recording(duration_ms: u64) -> Recording {
    let mut recorder = SegmentRecorder::new();
    let mut pointer_down = false;

    for t in 0..duration_ms {
        // lift the pen for 200ms out of every second
        let should_be_down = t % 1000 < 800;
        let pos = Position::new((t % 400) as i32, ((t / 7) % 300) as i32);

        match (pointer_down, should_be_down) {
            (false, true) => {
                recorder.on_draw_start(pos, t);
            }
            (true, true) => {
                recorder.on_draw_move(pos, t);
            }
            (true, false) => recorder.on_draw_end(),
            (false, false) => {}
        }
        pointer_down = should_be_down;
    }

    recorder.finish()
}

fn bench_recorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("recorder");

    for duration in [1_000u64, 10_000, 60_000].iter() {
        group.throughput(Throughput::Elements(*duration));
        group.bench_with_input(
            BenchmarkId::new("capture", duration),
            duration,
            |b, &duration| b.iter(|| synthetic_recording(black_box(duration))),
        );
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for duration in [10_000u64, 60_000].iter() {
        let recording = synthetic_recording(*duration);
        let text = serialize(&recording);

        group.bench_with_input(
            BenchmarkId::new("serialize", duration),
            &recording,
            |b, recording| b.iter(|| serialize(black_box(recording))),
        );
        group.bench_with_input(BenchmarkId::new("deserialize", duration), &text, |b, text| {
            b.iter(|| deserialize(black_box(text)))
        });
    }

    group.finish();
}

fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");
    let anchor_interval = Duration::from_millis(10);

    for duration in [10_000u64, 60_000].iter() {
        let recording = synthetic_recording(*duration);
        group.throughput(Throughput::Elements(recording.anchor_count() as u64));
        group.bench_with_input(
            BenchmarkId::new("build", duration),
            &recording,
            |b, recording| b.iter(|| PlaybackSchedule::build(black_box(recording), anchor_interval)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_recorder, bench_codec, bench_schedule);
criterion_main!(benches);
