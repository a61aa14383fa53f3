use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gatehouse::{
    ClaimRecord, Listener, Perimeter, PolicyEngine, PolicySet, PolicySpec, RuleSpec, TokenSealer,
};

/// Requests spread across the built-in table, allowed and denied
const REQUESTS: &[(&str, &str, &str)] = &[
    ("consumer", "/bytes/122", "GET"),
    ("consumer", "/chequebook/withdraw", "POST"),
    ("creator", "/bzz?name=index.html", "POST"),
    ("creator", "/tags/7", "PATCH"),
    ("accountant", "/v1/chequebook/deposit?amount=5", "POST"),
    ("maintainer", "/stamps/topup/batch/100", "PATCH"),
    ("maintainer", "/node", "GET"),
    ("nobody", "/bytes/122", "GET"),
];

/// Benchmark policy evaluation with cache (hot path)
fn bench_policy_eval_cached(c: &mut Criterion) {
    let eval_counts = vec![100, 1_000, 10_000];

    let mut group = c.benchmark_group("policy_eval_cached");

    for count in eval_counts {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let engine = PolicyEngine::builtin().unwrap();

            b.iter(|| {
                for i in 0..count {
                    let (role, resource, action) = REQUESTS[i % REQUESTS.len()];
                    black_box(engine.enforce(role, resource, action));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark policy evaluation without cache (cold path)
fn bench_policy_eval_uncached(c: &mut Criterion) {
    let eval_counts = vec![100, 1_000, 5_000];

    let mut group = c.benchmark_group("policy_eval_uncached");

    for count in eval_counts {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let engine = PolicyEngine::new(PolicySet::builtin().unwrap(), 0);

            b.iter(|| {
                for i in 0..count {
                    let (role, resource, action) = REQUESTS[i % REQUESTS.len()];
                    black_box(engine.enforce(role, resource, action));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark cache hit rate measurement
fn bench_cache_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_hit_rate");

    group.bench_function("90_percent_hit_rate", |b| {
        let engine = PolicyEngine::builtin().unwrap();
        let mut unique = 0usize;

        b.iter(|| {
            // 90% access to a hot set of 10 paths
            for _ in 0..90 {
                let i = rand::random::<usize>() % 10;
                let path = format!("/bytes/{}", i);
                black_box(engine.enforce("consumer", &path, "GET"));
            }

            // 10% access to unique paths
            for _ in 0..10 {
                unique += 1;
                let path = format!("/bytes/cold-{}", unique);
                black_box(engine.enforce("consumer", &path, "GET"));
            }
        });
    });

    group.finish();
}

/// Benchmark evaluation cost against table size
fn bench_policy_complexity(c: &mut Criterion) {
    let rule_counts = vec![10, 100, 1_000];

    let mut group = c.benchmark_group("policy_complexity");

    for count in rule_counts {
        let spec = PolicySpec {
            roles: vec!["user".into()],
            inherits: Vec::new(),
            rules: (0..count)
                .map(|i| RuleSpec::new("user", format!("/svc{}/*", i), "(GET)|(PUT)"))
                .collect(),
        };
        let engine = PolicyEngine::new(PolicySet::from_spec(&spec).unwrap(), 0);
        let last = format!("/svc{}/item", count - 1);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                // Worst case: only the final rule matches
                black_box(engine.enforce("user", &last, "PUT"));
            });
        });
    }

    group.finish();
}

/// Benchmark perimeter checks over the built-in lists
fn bench_perimeter(c: &mut Criterion) {
    let perimeter = Perimeter::builtin();
    let mut group = c.benchmark_group("perimeter");

    group.bench_function("internal_allow_list", |b| {
        b.iter(|| black_box(perimeter.admits(Listener::Internal, "/stewardship/abc")));
    });

    group.bench_function("external_deny_list", |b| {
        b.iter(|| black_box(perimeter.admits(Listener::External, "/bytes/122")));
    });

    group.finish();
}

/// Benchmark sealing and opening tokens
fn bench_token(c: &mut Criterion) {
    let sealer = TokenSealer::from_secret("bench-secret");
    let claim = ClaimRecord::new("creator", Utc::now() + Duration::hours(1));
    let token = sealer.seal(&claim).unwrap();

    let mut group = c.benchmark_group("token");

    group.bench_function("seal", |b| {
        b.iter(|| black_box(sealer.seal(&claim).unwrap()));
    });

    group.bench_function("open", |b| {
        b.iter(|| black_box(sealer.open(&token).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_policy_eval_cached,
    bench_policy_eval_uncached,
    bench_cache_hit_rate,
    bench_policy_complexity,
    bench_perimeter,
    bench_token
);
criterion_main!(benches);
