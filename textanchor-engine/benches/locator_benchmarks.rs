//! Performance benchmarks for the locator and stitcher
//!
//! Run with: cargo bench --bench locator_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use textanchor_engine::{
    BatchStitcher, ChunkBoundary, LocateRequest, Locator, LocatorConfig,
};

/// Generate test text of specified size in chars
fn generate_text(size: usize) -> String {
    let sentences = [
        "The committee reviewed the annual budget in detail. ",
        "Revenue grew in every region except the north. ",
        "Costs were contained through careful negotiation. ",
        "The board approved a modest dividend increase. ",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(sentences[i % sentences.len()]);
        text.push_str(&format!("Paragraph {i} closes here. "));
        i += 1;
    }
    text.truncate(size);
    text
}

fn boundaries(text: &str, chunk: usize) -> Vec<ChunkBoundary> {
    let len = text.chars().count();
    (0..len.div_ceil(chunk))
        .map(|i| ChunkBoundary::new(i, i * chunk, ((i + 1) * chunk).min(len)))
        .collect()
}

/// Exact hits at increasing haystack sizes
fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate_exact");
    let locator = Locator::new(LocatorConfig::default()).unwrap();

    for size in [10_240, 102_400, 1_024_000] {
        let text = generate_text(size);
        let needle = "Paragraph 42 closes here.";

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("exact", size), &text, |b, text| {
            b.iter(|| {
                let _ = locator
                    .locate(LocateRequest::new(black_box(needle), black_box(text)))
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Chunk-bounded search cost should not grow with document size
fn bench_chunk_bounded(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate_chunk_bounded");
    let locator = Locator::new(LocatorConfig::default()).unwrap();
    let needle = "Revenue grw in evry region excpt the north.";

    for size in [10_240, 102_400] {
        let text = generate_text(size);
        let table = boundaries(&text, 1_000);
        let hint = table.len() / 2;

        group.bench_with_input(BenchmarkId::new("bounded", size), &text, |b, text| {
            b.iter(|| {
                let _ = locator
                    .locate(LocateRequest::new(black_box(needle), text).with_chunk_hint(hint, &table))
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Trigram scan fallback
fn bench_fuzzy(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate_fuzzy");
    let locator = Locator::new(LocatorConfig::annotation_recovery()).unwrap();
    let needle = "the board aproved a modest dividnd increase paragraph";

    for size in [10_240, 102_400] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("trigram", size), &text, |b, text| {
            b.iter(|| {
                let _ = locator
                    .locate(LocateRequest::new(black_box(needle), text))
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Stitching overlapping windows
fn bench_stitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("stitch");
    let stitcher = BatchStitcher::default();

    for window in [4_096, 32_768] {
        let text: Vec<char> = generate_text(window * 3).chars().collect();
        let segments: Vec<String> = (0..3)
            .map(|i| {
                let start = (i * window).saturating_sub(if i == 0 { 0 } else { 500 });
                let end = ((i + 1) * window).min(text.len());
                text[start..end].iter().collect()
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("stitch_all", window), &segments, |b, segs| {
            b.iter(|| {
                let _ = stitcher.stitch_all(black_box(segs));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_exact,
    bench_chunk_bounded,
    bench_fuzzy,
    bench_stitch
);
criterion_main!(benches);
