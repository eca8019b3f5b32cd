//! Benchmarks for histbook
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use histbook::analysis;
use histbook::event::{EventSource, ToyEventSource};
use histbook::histogram::{Hist1D, Hist2D};
use histbook::registry::{ExportOrder, Registry};
use histbook::sink::MemorySink;
use histbook::traits::Accumulator;

// ============================================================================
// Histogram Benchmarks
// ============================================================================

fn bench_histograms(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");
    group.throughput(Throughput::Elements(1));

    for bins in [10, 100, 1000] {
        group.bench_function(format!("fill_1d_{}", bins), |b| {
            let mut h = Hist1D::new("t", bins, 0.0, 1.0);
            let mut i = 0u64;
            b.iter(|| {
                h.fill(black_box((i % 1024) as f64 / 1000.0));
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("fill_2d", |b| {
        let mut h = Hist2D::new("t", 100, 0.0, 1.0, 100, 0.0, 1.0);
        let mut i = 0u64;
        b.iter(|| {
            let v = (i % 1024) as f64 / 1000.0;
            h.fill(black_box(v), black_box(1.0 - v));
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("merge_2d", |b| {
        let mut h1 = Hist2D::new("t", 100, 0.0, 1.0, 100, 0.0, 1.0);
        let mut h2 = Hist2D::new("t", 100, 0.0, 1.0, 100, 0.0, 1.0);
        for i in 0..10_000u64 {
            h1.fill((i % 97) as f64 / 97.0, (i % 89) as f64 / 89.0);
            h2.fill((i % 83) as f64 / 83.0, (i % 79) as f64 / 79.0);
        }
        b.iter(|| {
            let mut h = h1.clone();
            Accumulator::merge(&mut h, black_box(&h2)).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn keyed_registry(order: ExportOrder, keys: usize) -> Registry {
    let mut registry = Registry::with_order(order);
    for k in 0..keys {
        registry.book_one_axis(format!("h_{:04}", keys - k), "t", 100, 0.0, 1.0);
    }
    registry
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.throughput(Throughput::Elements(1));

    group.bench_function("fill_by_key", |b| {
        let mut registry = keyed_registry(ExportOrder::Declaration, 64);
        let mut i = 0u64;
        b.iter(|| {
            registry.fill(black_box("h_0032"), (i % 100) as f64 / 100.0).unwrap();
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("fill_not_booked", |b| {
        let mut registry = keyed_registry(ExportOrder::Declaration, 64);
        b.iter(|| black_box(registry.fill(black_box("missing"), 0.5).is_err()));
    });

    for order in [ExportOrder::Declaration, ExportOrder::Lexicographic] {
        group.bench_function(format!("write_memory_{}", order), |b| {
            let registry = keyed_registry(order, 256);
            b.iter(|| {
                let mut sink = MemorySink::new();
                registry.write_to(&mut sink).unwrap();
                black_box(sink.close_count())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Event Loop Benchmarks
// ============================================================================

fn bench_event_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_loop");

    group.bench_function("process_event", |b| {
        let mut registry = Registry::new();
        analysis::book_standard(&mut registry);
        let mut source = ToyEventSource::new(42).with_failure_rate(0.0);
        let events: Vec<_> = (0..64).filter_map(|_| source.next_event()).collect();
        let mut i = 0usize;
        b.iter(|| {
            let event = &events[i % events.len()];
            black_box(analysis::process_event(&mut registry, event).unwrap());
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_histograms, bench_registry, bench_event_loop);

criterion_main!(benches);
