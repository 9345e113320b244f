// Criterion benchmark suite: EncodedView operations per storage kind.
//
// Run: cargo bench
// Specific group: cargo bench -- index
// HTML report: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use regmatch::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn subject() -> String {
    "The quick brown fox — jumps over the lazy dög.\n".repeat(64)
}

fn code_points(s: &str) -> Vec<u32> {
    s.chars().map(u32::from).collect()
}

// ---------------------------------------------------------------------------
// 1. index -- Utf8View walks from the start, the others are direct
// ---------------------------------------------------------------------------

fn bench_index(c: &mut Criterion) {
    let text = subject();
    let u = code_points(&text);
    let mut group = c.benchmark_group("index");
    let views = [
        ("bytes", EncodedView::from(text.as_bytes())),
        ("utf8", EncodedView::from(text.as_str())),
        ("utf32", EncodedView::from(&u[..])),
    ];
    for (name, view) in views {
        let mid = view.length() / 2;
        group.bench_with_input(BenchmarkId::new(name, mid), &view, |b, v| {
            b.iter(|| black_box(v.at(black_box(mid))))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 2. lines
// ---------------------------------------------------------------------------

fn bench_lines(c: &mut Criterion) {
    let text = subject();
    let u = code_points(&text);
    let mut group = c.benchmark_group("lines");
    group.bench_function("bytes", |b| {
        let view = EncodedView::from(text.as_bytes());
        b.iter(|| black_box(view.lines()))
    });
    group.bench_function("utf8", |b| {
        let view = EncodedView::from(text.as_str());
        b.iter(|| black_box(view.lines()))
    });
    group.bench_function("utf32", |b| {
        let view = EncodedView::from(&u[..]);
        b.iter(|| black_box(view.lines()))
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// 3. equals -- same kind vs. materializing the Utf32 side
// ---------------------------------------------------------------------------

fn bench_equals(c: &mut Criterion) {
    let text = subject();
    let u = code_points(&text);
    let mut group = c.benchmark_group("equals");
    group.bench_function("utf8_utf8", |b| {
        let a = EncodedView::from(text.as_str());
        b.iter(|| black_box(a.equals(&a)))
    });
    group.bench_function("utf8_utf32", |b| {
        let a = EncodedView::from(text.as_str());
        let z = EncodedView::from(&u[..]);
        b.iter(|| black_box(a.equals(&z)))
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// 4. checkpoint / restore
// ---------------------------------------------------------------------------

fn bench_checkpoint(c: &mut Criterion) {
    let text = subject();
    let input = MatchInput::new(text.as_str());
    c.bench_function("checkpoint_restore", |b| {
        b.iter(|| {
            let mut state = MatchState::new(0, 4);
            let mut context = MatchContext::new();
            for i in 0..32 {
                context.push_checkpoint(state.checkpoint(i)).unwrap();
                let fragment = MatchFragment::from_input(&input, i, 1).unwrap();
                state.record_capture(i % 4 + 1, fragment);
            }
            while context.backtrack(&mut state) {}
            black_box(state.capture_lengths())
        })
    });
}

criterion_group!(benches, bench_index, bench_lines, bench_equals, bench_checkpoint);
criterion_main!(benches);
