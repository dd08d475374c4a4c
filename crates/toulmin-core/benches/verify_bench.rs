//! # Verification Benchmarks
//!
//! Performance benchmarks for toulmin-core verification and export.
//!
//! Run with: `cargo bench -p toulmin-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use toulmin_core::{
    Graph, Ingestor, LayoutOptions, ScoringWeights, StructuralOnly, Submission, analyze_graph,
    export_layout, verify,
};

/// Create a graph holding `size` complete arguments.
fn create_argument_graph(size: usize) -> Graph {
    let submissions: Vec<Submission> = (0..size)
        .map(|i| {
            Submission::new(format!("claim {i}"), format!("grounds {i}"), format!("warrant {i}"))
                .with_backing(format!("backing {i}"))
                .with_rebuttal(format!("rebuttal {i}"))
        })
        .collect();

    let mut graph = Graph::new();
    Ingestor::ingest_batch(&mut graph, &submissions).expect("ingest");
    graph
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_batch");

    for size in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(create_argument_graph(size)));
        });
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");

    for size in [100, 1000, 5000].iter() {
        let graph = create_argument_graph(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(verify(&graph)));
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_graph");
    let weights = ScoringWeights::default();

    for size in [100, 1000].iter() {
        let graph = create_argument_graph(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(analyze_graph(&graph, &weights, &StructuralOnly)));
        });
    }

    group.finish();
}

fn bench_export_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_layout");
    let options = LayoutOptions {
        max_label_length: Some(24),
    };

    for size in [100, 1000].iter() {
        let graph = create_argument_graph(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(export_layout(&graph, &options).to_canonical_bytes()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_ingest,
    bench_verify,
    bench_analyze,
    bench_export_layout,
);

criterion_main!(benches);
