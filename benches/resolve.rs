use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cookbook::{Cookbook, Entry};

/// A chain `C0 -> C1 -> ... -> C{depth-1} -> Salt`.
fn chain_cookbook(depth: usize) -> Cookbook {
    let cookbook = Cookbook::in_memory();
    cookbook.insert(Entry::ingredient("Salt", 1)).unwrap();
    for i in 0..depth {
        let next = if i + 1 == depth {
            "Salt".to_string()
        } else {
            format!("C{}", i + 1)
        };
        cookbook.insert(Entry::recipe(format!("C{i}"), [(next, 1)])).unwrap();
    }
    cookbook
}

/// One recipe requiring `width` distinct ingredients.
fn wide_cookbook(width: usize) -> Cookbook {
    let cookbook = Cookbook::in_memory();
    let mut items = Vec::with_capacity(width);
    for i in 0..width {
        let name = format!("I{i}");
        cookbook.insert(Entry::ingredient(name.clone(), 1)).unwrap();
        items.push((name, 3));
    }
    cookbook.insert(Entry::recipe("Feast", items)).unwrap();
    cookbook
}

/// `levels` stacked diamonds: every level reaches the next through two branches.
fn diamond_cookbook(levels: usize) -> Cookbook {
    let cookbook = Cookbook::in_memory();
    cookbook.insert(Entry::ingredient(format!("D{levels}"), 1)).unwrap();
    for level in 0..levels {
        let next = format!("D{}", level + 1);
        cookbook
            .insert(Entry::recipe(
                format!("D{level}"),
                [(format!("L{level}"), 1), (format!("R{level}"), 1)],
            ))
            .unwrap();
        cookbook.insert(Entry::recipe(format!("L{level}"), [(next.clone(), 1)])).unwrap();
        cookbook.insert(Entry::recipe(format!("R{level}"), [(next, 1)])).unwrap();
    }
    cookbook
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for depth in [16usize, 256] {
        let cookbook = chain_cookbook(depth);
        group.bench_with_input(BenchmarkId::new("chain", depth), &cookbook, |b, cb| {
            b.iter(|| black_box(cb.summarize("C0").unwrap()));
        });
    }

    for width in [16usize, 1024] {
        let cookbook = wide_cookbook(width);
        group.bench_with_input(BenchmarkId::new("wide", width), &cookbook, |b, cb| {
            b.iter(|| black_box(cb.summarize("Feast").unwrap()));
        });
    }

    for levels in [4usize, 12] {
        let cookbook = diamond_cookbook(levels);
        group.bench_with_input(BenchmarkId::new("diamond", levels), &cookbook, |b, cb| {
            b.iter(|| black_box(cb.summarize("D0").unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
