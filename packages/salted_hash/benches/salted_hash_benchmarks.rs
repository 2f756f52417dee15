//! Benchmarks for salted hash generation and validation
//!
//! Throughput across algorithms and clear-text sizes, plus the cost of a
//! full validate round.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use cryypt_salted_hash::{Salt, SaltedHash};

const ALGORITHMS: [&str; 4] = ["MD5", "SHA-1", "SHA-256", "SHA-512"];

fn fixed_salt() -> Salt {
    Salt::from_bytes(vec![0x6d, 0xe2, 0x08, 0x8b])
}

/// Benchmark token generation with different input sizes
fn benchmark_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_throughput");

    // 16B (typical password), 1KB, 64KB, 1MB
    let sizes = [16, 1024, 65536, 1_048_576];

    for size in &sizes {
        group.throughput(Throughput::Bytes(*size as u64));
        let data = vec![0u8; *size];

        for algorithm in ALGORITHMS {
            group.bench_with_input(BenchmarkId::new(algorithm, size), &data, |b, data| {
                b.iter(|| {
                    let mut hash = SaltedHash::builder()
                        .algorithm(algorithm)
                        .salt(fixed_salt())
                        .build()
                        .expect("algorithm should be registered");
                    hash.add(data);
                    std::hint::black_box(hash.generate());
                });
            });
        }
    }
    group.finish();
}

/// Benchmark repeated generate calls on one accumulator
fn benchmark_incremental(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental_generate");

    let mut hash = SaltedHash::builder()
        .algorithm("SHA-256")
        .salt(fixed_salt())
        .build()
        .expect("SHA-256 should be registered");
    hash.add(vec![0u8; 65536]);

    group.bench_function("SHA-256_generate_after_64KB", |b| {
        b.iter(|| std::hint::black_box(hash.generate()));
    });
    group.finish();
}

/// Benchmark validation of stored tokens
fn benchmark_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for algorithm in ALGORITHMS {
        let mut hash = SaltedHash::builder()
            .algorithm(algorithm)
            .salt(fixed_salt())
            .build()
            .expect("algorithm should be registered");
        hash.add("testing123");
        let token = hash.generate();

        group.bench_with_input(BenchmarkId::new("match", algorithm), &token, |b, token| {
            b.iter(|| {
                let matched =
                    SaltedHash::validate(token, "testing123").expect("token should be well formed");
                std::hint::black_box(matched);
            });
        });

        group.bench_with_input(BenchmarkId::new("mismatch", algorithm), &token, |b, token| {
            b.iter(|| {
                let matched =
                    SaltedHash::validate(token, "Test123").expect("token should be well formed");
                std::hint::black_box(matched);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_generate,
    benchmark_incremental,
    benchmark_validate
);
criterion_main!(benches);
