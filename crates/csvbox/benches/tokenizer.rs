//! Benchmark – `csvbox::Tokenizer`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use csvbox::{IterSource, ReaderSource, StrSource, Tokenizer, encode_record};

/// Produce a *deterministic* document of `rows` records. Every fourth field is
/// quoted with an embedded delimiter and every tenth line carries a box
/// comment, so all the interesting states of the tokenizer are visited.
fn make_csv_payload(rows: usize) -> String {
    let mut s = String::new();
    for row in 0..rows {
        let fields = [
            row.to_string(),
            format!("name {row}"),
            if row % 4 == 0 {
                format!("Doe, \"J\" {row}")
            } else {
                format!("plain {row}")
            },
            "  padded".to_owned(),
        ];
        let mut line = encode_record(&fields, ',');
        if row % 10 == 0 {
            line.insert_str(0, "/* section marker */");
        }
        s.push_str(&line);
    }
    s
}

/// Tokenize `payload` to the end and return the number of fields so the
/// result can be black-boxed by Criterion.
fn run_tokenizer<S: csvbox::CharSource>(mut source: S) -> usize
where
    S::Error: std::fmt::Debug,
{
    let mut tokenizer = Tokenizer::default();
    let mut produced = 0usize;
    while !tokenizer.is_end_of_stream() {
        let field = tokenizer.next_token(&mut source).unwrap();
        produced += field.len();
    }
    produced
}

fn bench_tokenizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_sources");

    for &rows in &[100usize, 1_000, 10_000] {
        let payload = make_csv_payload(rows);
        group.throughput(Throughput::Bytes(payload.len() as u64));

        group.bench_with_input(BenchmarkId::new("str", rows), &payload, |b, p| {
            b.iter(|| black_box(run_tokenizer(StrSource::new(black_box(p)))));
        });
        group.bench_with_input(BenchmarkId::new("iter", rows), &payload, |b, p| {
            b.iter(|| black_box(run_tokenizer(IterSource::new(black_box(p).chars()))));
        });
        group.bench_with_input(BenchmarkId::new("reader", rows), &payload, |b, p| {
            b.iter(|| black_box(run_tokenizer(ReaderSource::new(black_box(p).as_bytes()))));
        });
    }
    group.finish();
}

fn bench_records(c: &mut Criterion) {
    let payload = make_csv_payload(1_000);
    c.bench_function("records_1000", |b| {
        b.iter(|| {
            let mut tokenizer = Tokenizer::default();
            let count = tokenizer
                .records(StrSource::new(black_box(&payload)))
                .map(Result::unwrap)
                .count();
            black_box(count);
        });
    });
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_tokenizer, bench_records }
criterion_main!(benches);
