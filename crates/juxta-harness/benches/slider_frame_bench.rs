//! Benchmark: per-frame cost of the slider state machine.
//!
//! Run with: `cargo bench -p juxta-harness --bench slider_frame_bench`
//!
//! Measures the work done inside one rendering frame (smoothing step plus
//! visual frame computation) and a full drag gesture with momentum, both on
//! the headless backend so only widget logic is timed.

use core::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use juxta_core::animation::approach;
use juxta_core::config::SliderConfig;
use juxta_core::event::PointerKind;
use juxta_core::visual::VisualFrame;
use juxta_harness::Harness;

// ===========================================================================
// Pure math
// ===========================================================================

fn bench_frame_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_math");

    group.bench_function("approach", |b| {
        b.iter(|| approach(black_box(12.0), black_box(87.0), 0.15, 0.1));
    });

    group.bench_function("visual_frame", |b| {
        let mut position = 1.0;
        b.iter(|| {
            position = if position >= 99.0 { 1.0 } else { position + 0.5 };
            VisualFrame::compute(black_box(position), false)
        });
    });

    group.finish();
}

// ===========================================================================
// Whole-widget scenarios
// ===========================================================================

fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios");

    group.bench_function("smooth_settle", |b| {
        b.iter(|| {
            let mut h = Harness::new(SliderConfig::default().without_auto_play()).expect("mount");
            h.set_position(black_box(95.0), true);
            h.settle()
        });
    });

    group.bench_function("drag_with_momentum", |b| {
        b.iter(|| {
            let mut h = Harness::new(SliderConfig::default().without_auto_play()).expect("mount");
            h.advance(Duration::from_millis(600));
            h.press(PointerKind::Mouse);
            for step in 1..=30 {
                h.advance(Duration::from_millis(4));
                h.drag_to(PointerKind::Mouse, 50.0 + f64::from(step));
            }
            h.release(PointerKind::Mouse);
            h.settle()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_frame_math, bench_scenarios);
criterion_main!(benches);
