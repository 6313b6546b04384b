use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use structured_fields::{parse_dictionary, parse_item, parse_list};

fn benchmark_parse_item(c: &mut Criterion) {
    let input = "\"some string value\";charset=utf-8;q=0.9";

    c.bench_function("parse_item", |b| {
        b.iter(|| parse_item(black_box(input)))
    });
}

fn benchmark_parse_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_list");

    for size in [4, 16, 64].iter() {
        let members: Vec<String> = (0..*size)
            .map(|i| format!("member{i};q={}.{}", i % 10, i % 1000))
            .collect();
        let input = members.join(", ");

        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse_list(black_box(input)));
        });
    }

    group.finish();
}

fn benchmark_parse_dictionary(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_dictionary");

    for size in [4, 16, 64].iter() {
        let entries: Vec<String> = (0..*size)
            .map(|i| format!("key{i}=({i} {});x", i + 1))
            .collect();
        let input = entries.join(", ");

        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse_dictionary(black_box(input)));
        });
    }

    group.finish();
}

fn benchmark_serialize(c: &mut Criterion) {
    let list = parse_list("sugar, tea;hot, (milk cream);dairy=1, \"biscuits\", :aGVsbG8=:").unwrap();

    c.bench_function("serialize_list", |b| {
        b.iter(|| black_box(&list).canonical())
    });
}

criterion_group!(
    benches,
    benchmark_parse_item,
    benchmark_parse_list,
    benchmark_parse_dictionary,
    benchmark_serialize
);
criterion_main!(benches);
