use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use cronkit::Expression;

// 2024-01-15T00:00:00Z
const FROM: i64 = 1_705_276_800;

const EXPRESSIONS: [(&str, &str); 5] = [
    ("every minute", "* * * * *"),
    ("quarter hours", "0 */15 * * * ? *"),
    ("weekdays at nine", "0 0 9 ? * MON-FRI *"),
    ("last day", "0 0 0 L * ? *"),
    ("first monday", "0 0 9 ? * MON#1 *"),
];

pub fn criterion_benchmark(c: &mut Criterion) {
    for (name, text) in EXPRESSIONS {
        c.bench_function(&format!("parse {name}"), |b| {
            b.iter(|| Expression::new(black_box(text)))
        });
    }
    for (name, text) in EXPRESSIONS {
        let expression = Expression::new(text).unwrap();
        c.bench_function(&format!("next {name}"), |b| {
            b.iter(|| expression.next(black_box(Some(FROM))))
        });
        c.bench_function(&format!("previous {name}"), |b| {
            b.iter(|| expression.previous(black_box(Some(FROM))))
        });
    }
    let sparse = Expression::new("0 0 0 29 2 ? *").unwrap();
    c.bench_function("next leap day", |b| b.iter(|| sparse.next(black_box(Some(FROM)))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
