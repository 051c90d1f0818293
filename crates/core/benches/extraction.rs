use criterion::{Criterion, black_box, criterion_group, criterion_main};
use futures::executor::block_on;
use quill_core::{Document, PROFILE_META, ProfileConfig, assemble_profile};

fn bench_parse(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/profile.html").unwrap();

    c.bench_function("parse", |b| b.iter(|| Document::parse(black_box(&html))));
}

fn bench_assemble(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/profile.html").unwrap();
    let doc = Document::parse(&html).unwrap();
    let config = ProfileConfig::default();

    c.bench_function("assemble_profile", |b| {
        b.iter(|| block_on(assemble_profile(black_box(&doc), black_box(&config))))
    });
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/profile.html").unwrap();
    let config = ProfileConfig::default();

    c.bench_function("full_extraction", |b| {
        b.iter(|| {
            let doc = Document::parse(black_box(&html)).unwrap();
            block_on(assemble_profile(&doc, &config))
        })
    });
}

fn bench_meta(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/profile.html").unwrap();
    let doc = Document::parse(&html).unwrap();

    c.bench_function("meta_record", |b| b.iter(|| doc.meta_record(black_box(PROFILE_META))));
}

criterion_group!(benches, bench_parse, bench_assemble, bench_full_extraction, bench_meta);
criterion_main!(benches);
