use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wellchat::core::message::ChatMessage;
use wellchat::core::request_builder::build_request;
use wellchat::core::response_cache::{ResponseCache, DEFAULT_CACHE_CAPACITY};

fn make_keys(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("how much water should i drink after run {i}?"))
        .collect()
}

fn make_history(n_pairs: usize) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(n_pairs * 2);
    for i in 0..n_pairs {
        messages.push(ChatMessage::user(format!("  Is {i} hours of sleep enough?  ")));
        messages.push(ChatMessage::assistant(
            "Most adults need seven to nine hours of sleep per night.",
        ));
    }
    messages
}

fn bench_response_cache(c: &mut Criterion) {
    let answer = "Aim for roughly 500 ml per 30 minutes of running, adjusted for heat.";

    for &n in &[DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_CAPACITY * 4] {
        let keys = make_keys(n);
        let mut group = c.benchmark_group(format!("response_cache_keys{n}"));
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(BenchmarkId::new("store", n), |b| {
            b.iter(|| {
                let cache = ResponseCache::default();
                for key in &keys {
                    cache.store(key.as_str(), answer);
                }
                cache.len()
            })
        });

        let warm = ResponseCache::default();
        for key in &keys {
            warm.store(key.as_str(), answer);
        }
        // Past capacity, the first keys have been evicted, so this mixes hits and misses
        group.bench_function(BenchmarkId::new("lookup", n), |b| {
            b.iter(|| keys.iter().filter(|key| warm.lookup(key).is_some()).count())
        });

        group.finish();
    }

    let mut group = c.benchmark_group("build_request");
    for &pairs in &[1usize, 50usize] {
        let history = make_history(pairs);
        group.bench_function(BenchmarkId::new("history_pairs", pairs), |b| {
            b.iter(|| build_request(&history).map(|built| built.cache_key))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_response_cache);
criterion_main!(benches);
