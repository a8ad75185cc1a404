//! Benchmarks for the marker sanitizer.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markdraft::document::{Block, BlockId, Document, InlineStyle};
use markdraft::editor::{PendingMarker, sanitize};

fn marked_document(blocks: usize) -> Document {
    Document::from_blocks(
        (0..blocks)
            .map(|_| {
                Block::new(BlockId::new(0), "some #text with *markers* inside **")
                    .toggle_style(5..20, InlineStyle::Bold)
            })
            .collect(),
    )
}

fn bench_sanitize_clean(c: &mut Criterion) {
    let doc = sanitize(marked_document(200), PendingMarker::None);
    c.bench_function("sanitize_clean", |b| {
        b.iter(|| sanitize(black_box(doc.clone()), PendingMarker::None))
    });
}

fn bench_sanitize_marked(c: &mut Criterion) {
    let doc = marked_document(200);
    c.bench_function("sanitize_marked", |b| {
        b.iter(|| sanitize(black_box(doc.clone()), PendingMarker::None))
    });
}

criterion_group!(benches, bench_sanitize_clean, bench_sanitize_marked);
criterion_main!(benches);
