use admission::rate_limit::{
    GlobalRateLimiter, KeyedRateLimiter, RateLimitConfig, WindowDuration,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_keyed_admit_single_identity(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();

    let limiter = KeyedRateLimiter::new(RateLimitConfig {
        max_requests: u32::MAX,
        window: WindowDuration::Minute,
    });

    c.bench_function("keyed_admit_single_identity", |b| {
        b.iter(|| black_box(limiter.admit("203.0.113.7")))
    });
}

fn benchmark_keyed_admit_many_identities(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();

    let limiter = KeyedRateLimiter::new(RateLimitConfig {
        max_requests: u32::MAX,
        window: WindowDuration::Minute,
    });
    let identities: Vec<String> = (0..1024).map(|i| format!("10.0.{}.{}", i / 256, i % 256)).collect();

    c.bench_function("keyed_admit_many_identities", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % identities.len();
            black_box(limiter.admit(&identities[i]))
        })
    });
}

fn benchmark_keyed_admit_rejected(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();

    let limiter = KeyedRateLimiter::new(RateLimitConfig {
        max_requests: 1,
        window: WindowDuration::Day,
    });
    limiter.admit("203.0.113.7");

    c.bench_function("keyed_admit_rejected", |b| {
        b.iter(|| black_box(limiter.admit("203.0.113.7")))
    });
}

fn benchmark_global_admit(c: &mut Criterion) {
    let limiter = GlobalRateLimiter::new(RateLimitConfig {
        max_requests: u32::MAX,
        window: WindowDuration::Minute,
    });

    c.bench_function("global_admit", |b| b.iter(|| black_box(limiter.admit())));
}

criterion_group!(
    benches,
    benchmark_keyed_admit_single_identity,
    benchmark_keyed_admit_many_identities,
    benchmark_keyed_admit_rejected,
    benchmark_global_admit
);
criterion_main!(benches);
