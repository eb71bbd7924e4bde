//! Benchmarks for both scanners and the full parse pipeline.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lbconv::parser::{scan, Dialect};
use lbconv::{parse_str, ParseOptions};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

/// Repeat a dump with renamed objects so names stay unique.
fn scaled(source: &str, copies: usize) -> String {
    (0..copies)
        .map(|i| {
            source
                .replace("\"vs_", &format!("\"vs{}_", i))
                .replace("/Common/vs_", &format!("/Common/vs{}_", i))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// -- Scanning benchmarks --

fn bench_scanning(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanning");

    let edit_set = load_fixture("fortiadc.conf");
    let braced = load_fixture("bigip.conf");

    group.bench_function("scan_edit_set", |b| {
        b.iter(|| scan(black_box(&edit_set), Dialect::EditSet, &[]).unwrap())
    });

    group.bench_function("scan_braced", |b| {
        b.iter(|| scan(black_box(&braced), Dialect::Braced, &[]).unwrap())
    });

    group.finish();
}

// -- Full pipeline benchmarks --

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let options = ParseOptions::default();

    let edit_set = scaled(&load_fixture("fortiadc.conf"), 50);
    let braced = scaled(&load_fixture("bigip.conf"), 50);

    group.bench_function("parse_edit_set_x50", |b| {
        b.iter(|| parse_str(black_box(&edit_set), &options).unwrap())
    });

    group.bench_function("parse_braced_x50", |b| {
        b.iter(|| parse_str(black_box(&braced), &options).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_scanning, bench_pipeline);
criterion_main!(benches);
