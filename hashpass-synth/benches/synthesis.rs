mod common;

use std::time::{Duration, Instant};

use common::{CHARSET, charset_modulus, generate_random_inputs};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hashpass_synth::{Algorithm, CharacterSet, HashFunction, PasswordSynthesizer};

const PASSWORD_LENGTHS: &[usize] = &[8, 16, 32];

fn bench_hash_functions(c: &mut Criterion) {
    let inputs = generate_random_inputs(10_000);
    let modulus = charset_modulus();

    let mut group = c.benchmark_group("hash_10k");
    for algorithm in Algorithm::ALL {
        let func = HashFunction::new(algorithm).unwrap();
        group.bench_function(algorithm.label(), |b| {
            b.iter(|| {
                for input in &inputs {
                    black_box(func.hash(black_box(*input), modulus));
                }
            })
        });
    }
    group.finish();
}

fn bench_synthesis(c: &mut Criterion) {
    let charset = CharacterSet::new(CHARSET).unwrap();

    let mut group = c.benchmark_group("synthesize");
    for &length in PASSWORD_LENGTHS {
        for algorithm in Algorithm::ALL {
            let mut synth = PasswordSynthesizer::new(algorithm).unwrap();
            let id = BenchmarkId::new(algorithm.label(), length);
            group.bench_with_input(id, &length, |b, &len| {
                b.iter(|| black_box(synth.generate(&charset, len).unwrap()))
            });
        }
    }
    group.finish();
}

/// Construction cost, dominated by the OsRng draws for universal parameters.
fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    for algorithm in Algorithm::ALL {
        group.bench_function(algorithm.label(), |b| {
            b.iter(|| black_box(HashFunction::new(black_box(algorithm)).unwrap()))
        });
    }
    group.finish();
}

/// One fresh synthesizer per password, the way a one-shot caller pays for it.
fn bench_cold_synthesis(c: &mut Criterion) {
    let charset = CharacterSet::new(CHARSET).unwrap();

    let mut group = c.benchmark_group("cold_synthesize");
    // We can't turn the warmup off, but we can set it to a comically low threshold to essentially
    // turn it off. Note: This panics if set to zero duration.
    group.warm_up_time(Duration::from_nanos(1));

    group.bench_function("universal_1k", |b| {
        b.iter_custom(|iters| {
            let count = 1000u64;
            let start = Instant::now();

            for _ in 0..count {
                let mut synth = PasswordSynthesizer::new(Algorithm::Universal).unwrap();
                black_box(synth.generate(&charset, 16).unwrap());
            }

            let elapsed = start.elapsed();
            let time_per_password_ns = elapsed.as_nanos() as f64 / count as f64;
            Duration::from_nanos((time_per_password_ns * iters as f64) as u64)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_hash_functions,
    bench_synthesis,
    bench_construction,
    bench_cold_synthesis
);
criterion_main!(benches);
