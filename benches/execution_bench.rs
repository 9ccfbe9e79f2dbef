use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sbml::parallel::ParallelConfig;
use sbml::{run_source, DriverConfig, Evaluator, Parser, Scanner};

const LINE: &str = r#"[1, 2.5, "three"] + [#2(4, 5 ** 2 div 3, 6)] :: [] orelse 1 < 2"#;

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize line", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(LINE));
            scanner.scan_tokens().unwrap()
        })
    });
}

fn parse_benchmark(c: &mut Criterion) {
    let tokens = Scanner::new(LINE).scan_tokens().unwrap();

    c.bench_function("parse line", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(tokens.clone()));
            parser.parse().unwrap()
        })
    });
}

fn evaluate_benchmark(c: &mut Criterion) {
    let expr = sbml::parse("(1 + 2) * 3 ** 2 - 10 div 3 + #1(4, 5) + [7, 8, 9][2]").unwrap();
    let evaluator = Evaluator::new();

    c.bench_function("evaluate arithmetic", |b| {
        b.iter(|| evaluator.evaluate(black_box(&expr)).unwrap())
    });
}

fn driver_benchmark(c: &mut Criterion) {
    let source: String = (0..1000)
        .map(|i| format!("{} * {} + [{}, {}][1] mod 7", i, i + 1, i, i * 2))
        .collect::<Vec<_>>()
        .join("\n");

    let sequential = DriverConfig::default();
    let parallel = DriverConfig {
        parallel: Some(ParallelConfig::default()),
        ..DriverConfig::default()
    };

    c.bench_function("run 1000 lines sequential", |b| {
        b.iter(|| run_source(black_box(&source), &sequential))
    });
    c.bench_function("run 1000 lines parallel", |b| {
        b.iter(|| run_source(black_box(&source), &parallel))
    });
}

criterion_group!(
    benches,
    lexer_benchmark,
    parse_benchmark,
    evaluate_benchmark,
    driver_benchmark
);
criterion_main!(benches);
