//! Benchseq Example Benchmarks
//!
//! This example demonstrates the declaration API and serves as a template for
//! writing your own benchmark suites.
//!
//! Run with:
//!   cargo run --example demo                          # Run all suites
//!   cargo run --example demo -- list                  # List suites and cases
//!   cargo run --example demo -- sorting               # Run suites matching a pattern
//!   cargo run --example demo -- -n 10 --measurement 1 # Quick low-resolution pass

use benchseq::prelude::*;
use std::hint::black_box;
use std::time::Duration;

// ============================================================================
// Collections
// ============================================================================

/// Traversal and lookup costs for the standard collections.
#[allow(clippy::unnecessary_fold)] // Intentionally benchmark fold() against sum()
fn collections(h: &mut Harness) {
    h.group("collections", |h| {
        h.compare("vec sum", |h| {
            let data: Vec<i64> = (0..10_000).collect();
            let fold_data = data.clone();

            h.bench("sum", move || data.iter().sum::<i64>());
            h.bench("fold", move || fold_data.iter().fold(0i64, |a, b| a + b));
        });

        use std::collections::HashMap;
        let map: HashMap<i32, i32> = (0..1_000).map(|i| (i, i * 2)).collect();

        h.bench("hashmap_lookup", move || {
            let mut hits = 0;
            for i in 0..100 {
                if let Some(v) = map.get(&i) {
                    hits += v;
                }
            }
            hits
        });
    });
}

suite!(collections);

// ============================================================================
// Strings
// ============================================================================

/// String building strategies, plus a standalone parsing case.
fn strings(h: &mut Harness) {
    h.compare("string building", |h| {
        h.bench("push_str", || {
            let mut s = String::new();
            for i in 0..100 {
                s.push_str(&i.to_string());
            }
            s
        });

        h.bench("format", || {
            let mut s = String::new();
            for i in 0..100 {
                s = format!("{s}{i}");
            }
            s
        });

        h.bench("collect", || {
            (0..100).map(|i| i.to_string()).collect::<String>()
        });
    });

    let numbers: Vec<String> = (0..100).map(|i| i.to_string()).collect();
    h.bench("parse_i64", move || {
        numbers.iter().filter_map(|s| s.parse::<i64>().ok()).sum::<i64>()
    });
}

suite!(strings);

// ============================================================================
// Sorting
// ============================================================================

/// Standard library sorting on freshly generated random data.
fn sorting(h: &mut Harness) {
    use rand::prelude::*;

    h.compare("sort 1k integers", |h| {
        h.bench("stable", || {
            let mut rng = rand::rng();
            let mut data: Vec<i32> = (0..1_000).map(|_| rng.random()).collect();
            data.sort();
            data
        });

        h.bench("unstable", || {
            let mut rng = rand::rng();
            let mut data: Vec<i32> = (0..1_000).map(|_| rng.random()).collect();
            data.sort_unstable();
            data
        });
    });
}

suite!(sorting);

// ============================================================================
// Computation
// ============================================================================

/// Recursive versus iterative Fibonacci.
fn compute(h: &mut Harness) {
    fn fib_naive(n: u32) -> u64 {
        if n <= 1 {
            n as u64
        } else {
            fib_naive(n - 1) + fib_naive(n - 2)
        }
    }

    fn fib_iter(n: u32) -> u64 {
        let mut a = 0u64;
        let mut b = 1u64;
        for _ in 0..n {
            let tmp = a;
            a = b;
            b += tmp;
        }
        a
    }

    h.compare("fibonacci", |h| {
        // The naive version is slow; fewer samples keep the run short.
        let quick = CaseOptions {
            sample_size: Some(10),
            ..CaseOptions::default()
        };

        h.bench_with("naive", quick, || fib_naive(black_box(20)));
        h.bench("iterative", || fib_iter(black_box(20)));
    });
}

suite!("math", compute);

// ============================================================================
// Async
// ============================================================================

/// Timer and task scheduling overhead on the shared runtime.
fn async_tasks(h: &mut Harness) {
    h.compare("await strategies", |h| {
        h.bench_async("sleep_10us", || {
            tokio::time::sleep(Duration::from_micros(10))
        });

        h.bench_async("yield_now", || tokio::task::yield_now());

        h.bench_async("spawn_and_join", || async {
            tokio::spawn(async { black_box(40u64) + 2 }).await.unwrap()
        });
    });

    h.bench_async("ready_future", || std::future::ready(42u64));
}

suite!(async_tasks);

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    // Suites registered above are discovered through the global registry.
    if let Err(e) = benchseq::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
