//! Benchmarks for page control layout and tree flattening.
//!
//! These run once per rendered frame, so they should stay cheap.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hr_console::pagination::compute_visible_pages;
use hr_console::tree::{CascadePolicy, LazyTree, NodeData, NodeKind};

fn bench_visible_pages(c: &mut Criterion) {
    c.bench_function("visible_pages_sweep_1000", |b| {
        b.iter(|| {
            for page in 1..=1000 {
                black_box(compute_visible_pages(black_box(page), 1000));
            }
        })
    });
}

fn bench_tree_visible_rows(c: &mut Criterion) {
    let roots = (0..500)
        .map(|i| NodeData::new(&format!("d{}", i), &format!("Dept {}", i), NodeKind::Department))
        .collect();
    let tree = LazyTree::new(roots, vec![], CascadePolicy::Independent);
    c.bench_function("tree_visible_rows_500_roots", |b| {
        b.iter(|| black_box(tree.visible_rows()))
    });
}

criterion_group!(benches, bench_visible_pages, bench_tree_visible_rows);
criterion_main!(benches);
