//! Eager vs. cooperative printing, plus parse cost, over a telemetry-shaped batch.
//!
//! ```bash
//! cargo bench -p jsonobj-core --bench printing
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsonobj_core::{parse, print, PrintTask, SliceBudget, Value};

fn event(i: i32) -> Value {
    let mut event = Value::object();
    event.add_field("name", "player_moved");
    event.add_field("seq", i);
    event.add_field("elapsed", f64::from(i) * 0.016);
    event.add_field("pos", Value::vector3(i as f32, 0.5, -(i as f32)));
    event.add_field(
        "tags",
        ["run", "outdoor", "level_3"].into_iter().map(Value::from).collect::<Value>(),
    );
    event
}

fn batch(events: i32) -> Value {
    let mut batch = Value::object();
    batch.add_field("session", "8f3c2a");
    batch.add_field("events", (0..events).map(event).collect::<Value>());
    batch
}

fn bench_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("print");
    for size in [10, 100, 1000] {
        let doc = batch(size);
        group.throughput(Throughput::Bytes(print(&doc, false).len() as u64));

        group.bench_with_input(BenchmarkId::new("eager", size), &doc, |b, doc| {
            b.iter(|| print(black_box(doc), false))
        });
        group.bench_with_input(BenchmarkId::new("eager_pretty", size), &doc, |b, doc| {
            b.iter(|| print(black_box(doc), true))
        });
        group.bench_with_input(BenchmarkId::new("cooperative_64", size), &doc, |b, doc| {
            b.iter(|| {
                PrintTask::new(black_box(doc), false)
                    .with_budget(SliceBudget::Nodes(64))
                    .finish()
            })
        });
        group.bench_with_input(BenchmarkId::new("cooperative_timed", size), &doc, |b, doc| {
            b.iter(|| PrintTask::new(black_box(doc), false).finish())
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10, 100, 1000] {
        let text = print(&batch(size), false);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_print, bench_parse);
criterion_main!(benches);
