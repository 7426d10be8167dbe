use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scribe::{KeyEvent, NamedKey, Session};

const PASSAGE: &str = "It was nine o'clock at night upon the second of August, the most terrible \
August in the history of the world. One might have thought already that God's curse hung heavy \
over a degenerate world, for there was an awesome hush and a feeling of vague expectancy in the \
sultry and stagnant air. ";

fn benchmark_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");

    for repeats in [1, 10, 100] {
        let text = PASSAGE.repeat(repeats);
        let keys: Vec<KeyEvent> = text.chars().map(KeyEvent::char).collect();

        group.bench_with_input(
            BenchmarkId::new("full_passage", text.len()),
            &(text, keys),
            |b, (text, keys)| {
                b.iter(|| {
                    let mut session = Session::new(text).unwrap();
                    for key in keys {
                        session.handle_key(black_box(key));
                    }
                    black_box(session.final_statistics())
                })
            },
        );
    }

    group.finish();
}

fn benchmark_corrections(c: &mut Criterion) {
    let mut group = c.benchmark_group("corrections");

    let backspace = KeyEvent::named(NamedKey::Backspace);

    group.bench_function("mistype_and_fix", |b| {
        b.iter(|| {
            let mut session = Session::new(PASSAGE).unwrap();
            for char in PASSAGE.chars() {
                // Every character is first mistyped, then deleted and fixed
                session.handle_key(black_box(&KeyEvent::char('#')));
                session.handle_key(black_box(&backspace));
                session.handle_key(black_box(&KeyEvent::char(char)));
            }
            black_box(session.counters())
        })
    });

    group.finish();
}

fn benchmark_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let mut session = Session::new(&PASSAGE.repeat(10)).unwrap();
    for char in PASSAGE.chars() {
        session.handle_key(&KeyEvent::char(char));
    }

    group.bench_function("letters", |b| {
        b.iter(|| black_box(session.letters().count()))
    });

    for width in [40, 80, 120] {
        group.bench_with_input(BenchmarkId::new("lines", width), &width, |b, &width| {
            b.iter(|| black_box(session.lines(width)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_typing,
    benchmark_corrections,
    benchmark_rendering
);
criterion_main!(benches);
