//! Benchmarks for registry bootstrap and event routing.
//!
//! Run with: cargo bench -p modaly --bench bootstrap_bench

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use modaly::Registry;
use modaly_dom::{Document, DomEvent, ElementBuilder, Key, NodeId};
use std::hint::black_box;

// =============================================================================
// Helper Functions
// =============================================================================

/// A page with `count` modals, each with one trigger, a header, a
/// description, and a close control.
fn page(count: usize) -> (Document, Vec<NodeId>) {
    let mut doc = Document::new("https://example.test/").expect("url");
    let body = doc.body();
    let mut triggers = Vec::with_capacity(count);
    for i in 0..count {
        let id = format!("m{i}");
        triggers.push(doc.append(
            body,
            ElementBuilder::new("button").attr("data-modaly-trigger", id.as_str()),
        ));
        doc.append(
            body,
            ElementBuilder::new("div")
                .attr("data-modaly", id.as_str())
                .child(ElementBuilder::new("h2").attr("data-modaly-header", ""))
                .child(ElementBuilder::new("p").attr("data-modaly-description", ""))
                .child(ElementBuilder::new("button").attr("data-modaly-close", "")),
        );
    }
    (doc, triggers)
}

// =============================================================================
// Bootstrap
// =============================================================================

fn bench_init(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/init");
    for count in [10usize, 100, 500] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || page(count).0,
                |mut doc| {
                    let mut registry = Registry::new();
                    black_box(registry.init(&mut doc));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

// =============================================================================
// Event Routing
// =============================================================================

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/handle_event");

    group.bench_function("trigger_then_escape_100", |b| {
        let (mut doc, triggers) = page(100);
        let mut registry = Registry::new();
        registry.init(&mut doc);
        let trigger = triggers[50];
        let body = doc.body();

        b.iter(|| {
            black_box(registry.handle_event(&mut doc, &DomEvent::click(trigger)));
            black_box(registry.handle_event(&mut doc, &DomEvent::key_down(body, Key::Escape)));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_init, bench_routing);
criterion_main!(benches);
