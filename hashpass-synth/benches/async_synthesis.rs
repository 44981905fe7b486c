mod common;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

// Baseline: 1k syntheses fanned out over std::thread::scope (no features required)
fn bench_sync_concurrency(c: &mut Criterion) {
    use common::CHARSET;
    use hashpass_synth::{Algorithm, synthesize};

    let jobs: Vec<(usize, Algorithm)> = (0..1000)
        .map(|i| (8 + i % 25, Algorithm::ALL[i % 3]))
        .collect();

    let mut group = c.benchmark_group("concurrent_1k");

    group.bench_function("sync_threads", |b| {
        b.iter_batched(
            || jobs.clone(),
            |jobs| {
                std::thread::scope(|s| {
                    let handles: Vec<_> = jobs
                        .iter()
                        .map(|(length, algorithm)| {
                            s.spawn(move || synthesize(CHARSET, *length, *algorithm))
                        })
                        .collect();

                    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
                    black_box(results)
                })
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

#[cfg(feature = "tokio")]
fn bench_tokio_concurrency(c: &mut Criterion) {
    use common::CHARSET;
    use futures::future::join_all;
    use hashpass_synth::{Algorithm, synthesize_async};

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();
    let jobs: Vec<(usize, Algorithm)> = (0..1000)
        .map(|i| (8 + i % 25, Algorithm::ALL[i % 3]))
        .collect();

    let mut group = c.benchmark_group("concurrent_1k");

    group.bench_function("synthesize_async", |b| {
        b.to_async(&rt).iter_batched(
            || jobs.clone(),
            |jobs| async move {
                let futs: Vec<_> = jobs
                    .into_iter()
                    .map(|(length, algorithm)| {
                        synthesize_async(CHARSET.to_string(), length, algorithm)
                    })
                    .collect();

                let results: Vec<_> = join_all(futs).await;
                black_box(results)
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

#[cfg(not(feature = "tokio"))]
fn bench_tokio_concurrency(_c: &mut Criterion) {}

criterion_group!(
    async_benches,
    bench_sync_concurrency,
    bench_tokio_concurrency
);
criterion_main!(async_benches);
