//! Replay throughput benchmarks
//!
//! - Recording a chain on a stand-in
//! - Replaying chains of increasing depth
//! - select / collect over populations of increasing size, chain vs selector

use chainquery::{
    collect, recordable, select, transform, Describe, ExpressionChain, Match, QueryEngine,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

#[derive(Debug, Clone)]
struct Node {
    id: i64,
    label: String,
    next: Option<Box<Node>>,
}

impl Node {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn next(&self) -> Option<Node> {
        self.next.as_deref().cloned()
    }
}

recordable! {
    impl Node {
        id() -> i64;
        label() -> String;
        next() => Node;
    }
}

/// Linked list of `depth + 1` nodes starting at `id`
fn node(id: i64, depth: usize) -> Node {
    Node {
        id,
        label: format!("n{}", id % 7),
        next: (depth > 0).then(|| Box::new(node(id + 1, depth - 1))),
    }
}

fn path(depth: usize) -> ExpressionChain {
    let mut members = vec!["next"; depth];
    members.push("id");
    ExpressionChain::path(Node::type_handle(), &members).unwrap()
}

// ============================================================================
// Capture
// ============================================================================

fn bench_record(c: &mut Criterion) {
    let engine = QueryEngine::new();
    c.bench_function("record_three_steps", |b| {
        b.iter(|| {
            let each = engine.capture_for::<Node>().unwrap();
            each.get("next").unwrap().get("next").unwrap().get("label").unwrap();
            black_box(each.finish())
        });
    });
}

// ============================================================================
// Replay
// ============================================================================

fn bench_replay_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay_depth");

    for depth in [0usize, 1, 4, 16] {
        let root = node(0, depth);
        let chain = path(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(chain.replay(&root).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Queries
// ============================================================================

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    for size in [100usize, 1_000, 10_000] {
        let source: Vec<Node> = (0..size as i64).map(|id| node(id, 1)).collect();
        let label = ExpressionChain::path(Node::type_handle(), &["next", "label"]).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("chain", size), &source, |b, source| {
            b.iter(|| black_box(select(source, &label, Match::eq("n3")).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("selector", size), &source, |b, source| {
            let selector = transform(|n: &Node| n.next().map(|next| next.label()));
            b.iter(|| {
                black_box(
                    select(source, &selector, |l: &Option<String>| l.as_deref() == Some("n3"))
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");

    for size in [100usize, 10_000] {
        let source: Vec<Node> = (0..size as i64).map(|id| node(id, 0)).collect();
        let id = path(0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(collect(source, &id).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record, bench_replay_depth, bench_select, bench_collect);
criterion_main!(benches);
