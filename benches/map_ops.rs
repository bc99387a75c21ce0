use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use hamt_trie::{HamtMap, HamtSet};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn build_map(n: usize) -> HamtMap<u64, u64> {
    let mut map = HamtMap::with_default_hasher();
    for i in 0..n as u64 {
        map = map.insert(i, i);
    }
    map
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in SIZES {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("{n}"), |b| {
            b.iter(|| build_map(black_box(n)));
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for n in SIZES {
        let map = build_map(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("{n}"), |b| {
            b.iter(|| {
                for i in 0..n as u64 {
                    black_box(map.get(&i));
                }
            });
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for n in SIZES {
        let map = build_map(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("{n}"), |b| {
            b.iter_batched(
                || map.clone(),
                |mut map| {
                    for i in 0..n as u64 {
                        map = map.remove(&i);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    for n in SIZES {
        let map = build_map(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("{n}"), |b| {
            b.iter(|| {
                let mut total = 0_u64;
                for (_, value) in &map {
                    total = total.wrapping_add(*value);
                }
                black_box(total)
            });
        });
    }
    group.finish();
}

fn bench_set_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_algebra");
    for n in SIZES {
        let left: HamtSet<u64> = (0..n as u64).collect();
        let right: HamtSet<u64> = (n as u64 / 2..n as u64 + n as u64 / 2).collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("union/{n}"), |b| {
            b.iter(|| black_box(left.union(&right)));
        });
        group.bench_function(format!("intersection/{n}"), |b| {
            b.iter(|| black_box(left.intersection(&right)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_get,
    bench_remove,
    bench_iterate,
    bench_set_algebra
);
criterion_main!(benches);
