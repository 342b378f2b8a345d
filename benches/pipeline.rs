//! Benchmarks for the regex → automaton pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relang::regexp::{de_simone, parse_str, thompson};

const EXPRESSIONS: &[&str] = &["(a|b)*abb", "01*|1", "(0|1)+:\\*:\\+", "a?b+c*|d:e"];

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| {
            for re in EXPRESSIONS {
                parse_str(black_box(re)).unwrap();
            }
        })
    });
}

fn bench_thompson_determinise_minimise(c: &mut Criterion) {
    c.bench_function("thompson_pipeline", |b| {
        b.iter(|| {
            for re in EXPRESSIONS {
                let nfae = thompson(&parse_str(black_box(re)).unwrap()).unwrap();
                nfae.to_dfa().compact(0).unwrap().minimize().unwrap();
            }
        })
    });
}

fn bench_de_simone(c: &mut Criterion) {
    c.bench_function("de_simone", |b| {
        b.iter(|| {
            for re in EXPRESSIONS {
                de_simone(parse_str(black_box(re)).unwrap()).unwrap();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_thompson_determinise_minimise,
    bench_de_simone
);
criterion_main!(benches);
