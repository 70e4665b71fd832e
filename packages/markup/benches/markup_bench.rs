use criterion::{black_box, criterion_group, criterion_main, Criterion};
use diff_suggestion_markup::{parse, serialize};

fn suggestion_paragraphs(count: usize) -> String {
    let mut source = String::new();
    for i in 0..count {
        source.push_str(&format!(
            r#"<p>Paragraph {i} is <span data-diff-suggestion="" data-diff-suggestion-id="s{i}" data-diff-suggestion-comment="Tone" contenteditable="false" class="diff-suggestion"><span data-diff-suggestion-old="">good</span><span data-diff-suggestion-new="">excellent &amp; clear</span></span> overall.</p>"#
        ));
    }
    source
}

fn parse_small(c: &mut Criterion) {
    let source = suggestion_paragraphs(1);
    c.bench_function("parse_single_suggestion", |b| {
        b.iter(|| parse(black_box(&source)))
    });
}

fn parse_large(c: &mut Criterion) {
    let source = suggestion_paragraphs(500);
    c.bench_function("parse_500_suggestions", |b| {
        b.iter(|| parse(black_box(&source)))
    });
}

fn serialize_large(c: &mut Criterion) {
    let fragment = parse(&suggestion_paragraphs(500)).expect("Failed to parse");
    c.bench_function("serialize_500_suggestions", |b| {
        b.iter(|| serialize(black_box(&fragment)))
    });
}

criterion_group!(benches, parse_small, parse_large, serialize_large);
criterion_main!(benches);
