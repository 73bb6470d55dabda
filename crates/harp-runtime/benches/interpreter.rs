//! Pipeline benchmarks
//!
//! Scanning, parsing, and tree-walking execution of small programs that
//! stress loops, calls, and scope lookups.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use harp_runtime::{parse, scan, Interpreter};

fn interp_run(source: &str) {
    let (tokens, _) = scan(source);
    let (program, _) = parse(tokens);
    let mut interp = Interpreter::with_output(Box::new(std::io::sink()));
    let _ = interp.eval(&program);
}

fn parse_only(source: &str) {
    let (tokens, _) = scan(source);
    let _ = parse(tokens);
}

const LOOP: &str =
    "int sum = 0; int i = 0; while (i < 10000) { sum = sum + i; i = i + 1; } sum;";

const FIB: &str =
    "func fib(int n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } fib(18);";

const DEEP_SCOPE: &str = r#"
    int x = 0;
    {{{{{{{{
        for (int i = 0; i < 2000; i = i + 1) x = x + 1;
    }}}}}}}}
    x;
"#;

fn bench_scan_parse(c: &mut Criterion) {
    let source = FIB.repeat(50);
    c.bench_function("parse_fib_x50", |b| b.iter(|| parse_only(black_box(&source))));
}

fn bench_arithmetic_loop(c: &mut Criterion) {
    c.bench_function("interp_arithmetic_loop_10k", |b| {
        b.iter(|| interp_run(black_box(LOOP)))
    });
}

fn bench_fibonacci(c: &mut Criterion) {
    c.bench_function("interp_fibonacci_18", |b| b.iter(|| interp_run(black_box(FIB))));
}

fn bench_deep_scope_lookup(c: &mut Criterion) {
    c.bench_function("interp_deep_scope_lookup", |b| {
        b.iter(|| interp_run(black_box(DEEP_SCOPE)))
    });
}

criterion_group!(
    benches,
    bench_scan_parse,
    bench_arithmetic_loop,
    bench_fibonacci,
    bench_deep_scope_lookup
);
criterion_main!(benches);
