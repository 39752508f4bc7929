use criterion::{black_box, criterion_group, criterion_main, Criterion};
use espresso_parser::Lexer;

const SOURCE: &str = include_str!("testdata/service.java");

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize service.java", move |b| {
        b.iter(|| {
            let tokens = Lexer::new(black_box(SOURCE)).lex().expect("lexes cleanly");
            black_box(tokens.len());
        })
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
