use criterion::{criterion_group, criterion_main, Criterion};
use rpnsearch_core::query::BooleanRetrieval;
use rpnsearch_core::tokenizer::tokenize;
use rpnsearch_core::{InvertedIndex, RawDocument};

const WORDS: &[&str] = &[
    "iran", "israel", "sanctions", "african", "the", "talks", "economy", "1988",
];

fn synthetic_text(seed: usize, len: usize) -> String {
    (0..len).map(|i| WORDS[(seed * 7 + i * 3) % WORDS.len()]).collect::<Vec<_>>().join(" ")
}

fn bench_tokenize(c: &mut Criterion) {
    let text = synthetic_text(1, 2_000);
    c.bench_function("tokenize_2k_words", |b| b.iter(|| tokenize(&text)));
}

fn bench_query(c: &mut Criterion) {
    let idx = InvertedIndex::from_documents((0..5_000).map(|i| RawDocument {
        docno: Some(format!("D{i}")),
        text: Some(synthetic_text(i, 5)),
    }));
    let br = BooleanRetrieval::new(&idx);
    c.bench_function("query_and_or_not", |b| {
        b.iter(|| br.execute("iran israel AND sanctions OR economy NOT"))
    });
}

criterion_group!(benches, bench_tokenize, bench_query);
criterion_main!(benches);
