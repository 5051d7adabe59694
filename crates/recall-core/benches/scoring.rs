use criterion::{black_box, criterion_group, criterion_main, Criterion};

use recall_core::compare;
use recall_core::format::format_accuracy;
use recall_core::normalize::normalize;
use recall_core::token::tokenize;

const PASSAGE: &str = "We hold these truths to be self-evident, that all men are created equal, \
that they are endowed by their Creator with certain unalienable Rights, that among these are \
Life, Liberty and the pursuit of Happiness. That to secure these rights, Governments are \
instituted among Men, deriving their just powers from the consent of the governed.";

const ATTEMPT: &str = "We hold these truths to be self evident, that all men are created equal, \
that they are endowed by their creator with certain inalienable rights, that among these are \
life, liberty and the pursuit of happiness. That to secure these rights, governments are \
instituted among men, deriving their powers from the consent of the governed.";

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    group.bench_function("identical", |b| {
        b.iter(|| compare(black_box(PASSAGE), black_box(PASSAGE)))
    });

    group.bench_function("near_miss", |b| {
        b.iter(|| compare(black_box(PASSAGE), black_box(ATTEMPT)))
    });

    group.bench_function("empty_attempt", |b| {
        b.iter(|| compare(black_box(PASSAGE), black_box("")))
    });

    group.finish();
}

fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");

    group.bench_function("normalize", |b| b.iter(|| normalize(black_box(PASSAGE))));

    group.bench_function("tokenize", |b| b.iter(|| tokenize(black_box(PASSAGE))));

    group.bench_function("format_accuracy", |b| {
        b.iter(|| format_accuracy(black_box(PASSAGE), black_box(ATTEMPT)))
    });

    group.finish();
}

criterion_group!(benches, bench_compare, bench_components);
criterion_main!(benches);
