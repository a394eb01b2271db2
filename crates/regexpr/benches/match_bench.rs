// crates/regexpr/benches/match_bench.rs
use criterion::{Criterion, criterion_group, criterion_main};
use regexpr::Regex;
use std::hint::black_box;

fn mk_haystack() -> String {
    let mut s = String::new();
    for i in 0..500 {
        s.push_str("lorem ipsum dolor sit amet ");
        if i % 50 == 0 {
            s.push_str("needle@example.org ");
        }
    }
    s
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_alternation", |b| {
        b.iter(|| Regex::compile(black_box("(lorem|ipsum|dolor)+ [a-z]{2,8}?$")))
    });
}

fn bench_literal(c: &mut Criterion) {
    let hay = mk_haystack();
    let regex = Regex::compile("needle").unwrap();
    c.bench_function("find_matches_literal", |b| {
        b.iter(|| regex.find_matches(black_box(&hay)).count())
    });
}

fn bench_groups(c: &mut Criterion) {
    let hay = mk_haystack();
    let regex = Regex::compile("([a-z]+)@([a-z]+)\\.org").unwrap();
    c.bench_function("find_matches_groups", |b| {
        b.iter(|| regex.find_matches(black_box(&hay)).count())
    });
}

fn bench_pathological(c: &mut Criterion) {
    let subject = "a".repeat(64);
    let regex = Regex::compile("(a*)*b").unwrap();
    c.bench_function("nested_star_no_match", |b| {
        b.iter(|| regex.test(black_box(&subject)))
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_literal,
    bench_groups,
    bench_pathological
);
criterion_main!(benches);
