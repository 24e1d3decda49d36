use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{DocumentStatus, SearchIndex};

const WORDS: &[&str] = &[
    "fluffy", "cat", "dog", "groomed", "collar", "tail", "white", "black", "starling", "eyes",
    "fashionable", "expressive", "big", "small", "curly", "sparrow",
];

fn build_index(docs: usize) -> SearchIndex {
    let mut index = SearchIndex::from_stop_words_text("and in on the").unwrap();
    for id in 0..docs {
        let text: Vec<&str> = (0..8).map(|k| WORDS[(id * 7 + k * 3) % WORDS.len()]).collect();
        let status = if id % 10 == 0 { DocumentStatus::Banned } else { DocumentStatus::Actual };
        index.add_document(id as i32, &text.join(" "), status, &[(id % 11) as i32]).unwrap();
    }
    index
}

fn bench_search(c: &mut Criterion) {
    let index = build_index(10_000);
    c.bench_function("find_top_documents", |b| {
        b.iter(|| index.find_top_documents("fluffy groomed cat -collar").unwrap())
    });
    c.bench_function("add_document_10k", |b| b.iter(|| build_index(10_000)));
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
