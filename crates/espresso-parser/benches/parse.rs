use criterion::{black_box, criterion_group, criterion_main, Criterion};
use espresso_parser::{ParseResult, Parser};

const SOURCE: &str = include_str!("testdata/service.java");

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse service.java", move |b| {
        b.iter(|| {
            let result = Parser::new(black_box(SOURCE)).parse();
            let ParseResult::Success(tree) = result else {
                panic!("parses cleanly");
            };
            black_box(tree.node_count());
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
