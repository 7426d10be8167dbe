use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scribe::statistics::{Counters, Statistics, accuracy, format_elapsed, words_per_minute};
use web_time::{Duration, Instant};

fn benchmark_formulas(c: &mut Criterion) {
    let mut group = c.benchmark_group("formulas");

    // (correct characters, total characters, elapsed seconds)
    let test_cases = vec![
        (100, 110, 30),    // Short passage
        (1000, 1050, 240), // Medium passage
        (10000, 10400, 3600), // Marathon
    ];

    for (correct, total, seconds) in test_cases {
        let elapsed = Duration::from_secs(seconds);

        group.bench_with_input(
            BenchmarkId::new("words_per_minute", format!("{correct}chars_{seconds}s")),
            &(correct, elapsed),
            |b, &(correct, elapsed)| {
                b.iter(|| words_per_minute(black_box(correct), black_box(Some(elapsed))))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("accuracy", format!("{correct}of{total}")),
            &(correct, total),
            |b, &(correct, total)| b.iter(|| accuracy(black_box(correct), black_box(total))),
        );
    }

    group.bench_function("format_elapsed", |b| {
        b.iter(|| format_elapsed(black_box(Duration::from_millis(754_321))))
    });

    group.finish();
}

fn benchmark_snapshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshots");

    let counters = Counters {
        correct: 950,
        incorrect: 50,
        total: 1000,
    };
    let start = Instant::now();
    let end = start + Duration::from_secs(180);

    group.bench_function("final", |b| {
        b.iter(|| Statistics::new(black_box(counters), Some(start), Some(end)))
    });

    group.bench_function("live", |b| {
        b.iter(|| Statistics::live(black_box(counters), Some(start), black_box(end)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_formulas, benchmark_snapshots);
criterion_main!(benches);
