//! Benchmarks for parsing capture tables
//!
//! Point files dominate load time, so they are measured at a few sizes, with
//! and without malformed rows mixed in.

use arscene_io::{parse_records, PointSample, RowPolicy};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Point table text with `rows` samples; every `bad_every`th row is malformed
fn point_table(rows: usize, bad_every: Option<usize>) -> String {
    let mut text = String::from("x,y,z\n");
    for i in 0..rows {
        if bad_every.map_or(false, |n| i % n == 0) {
            text.push_str("0.1,,0.3\n");
            continue;
        }
        let t = i as f32 * 0.01;
        text.push_str(&format!("{:.4},{:.4},{:.4}\n", t.sin(), t * 0.001, t.cos()));
    }
    text
}

fn benchmark_point_parsing(c: &mut Criterion) {
    let sizes = vec![1000, 10000, 100000];

    let mut group = c.benchmark_group("point_parsing");

    for size in sizes {
        let clean = point_table(size, None);
        group.throughput(Throughput::Bytes(clean.len() as u64));
        group.bench_with_input(BenchmarkId::new("clean", size), &clean, |b, text| {
            b.iter(|| {
                let parsed = parse_records::<PointSample>("points", text, RowPolicy::Strict)
                    .expect("Failed to parse points");
                black_box(parsed);
            });
        });

        let noisy = point_table(size, Some(10));
        group.bench_with_input(BenchmarkId::new("skip_malformed", size), &noisy, |b, text| {
            b.iter(|| {
                let parsed = parse_records::<PointSample>("points", text, RowPolicy::Skip)
                    .expect("Failed to parse points");
                black_box(parsed);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_point_parsing);

criterion_main!(benches);
