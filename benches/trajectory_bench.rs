// Benchmark for minimum-jerk generation and trajectory interpolation
// Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use minjerk::{MinimumJerk, RecordingDiagnostics, Time, WayPoint};
use std::hint::black_box;

fn six_axis() -> MinimumJerk<RecordingDiagnostics> {
    MinimumJerk::with_diagnostics(
        Time::milliseconds(1),
        WayPoint::new(Time::ZERO, vec![0.0; 6]),
        WayPoint::new(Time::seconds(2.0), vec![0.5, -0.3, 1.2, 0.0, 0.7, -1.1]),
        RecordingDiagnostics::new(),
    )
}

fn bench_generate(c: &mut Criterion) {
    let mut generator = six_axis();
    c.bench_function("regenerate 6-axis 2001 samples", |b| {
        b.iter(|| {
            let traj = generator.update();
            assert_eq!(traj.len(), 2001);
        });
    });
}

fn bench_at_time(c: &mut Criterion) {
    let generator = six_axis();
    let traj = generator.trajectory();
    c.bench_function("interpolate 1000 queries", |b| {
        b.iter(|| {
            for k in 0..1000 {
                let t = Time::microseconds(k * 1_999 + 7);
                black_box(traj.at_time(black_box(t)));
            }
        });
    });
}

criterion_group!(benches, bench_generate, bench_at_time);
criterion_main!(benches);
