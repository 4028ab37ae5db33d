use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use yard_core::avl::AvlIndex;

const SEED: u64 = 0xD0C_A11C;
const KEYS: usize = 10_000;
const QUERIES: usize = 5_000;
const KEY_SPACE: u64 = 1_000_000;

fn random_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..KEY_SPACE)).collect()
}

fn filled(keys: &[u64]) -> AvlIndex<u64, u64> {
    let mut index = AvlIndex::new();
    for &k in keys {
        index.insert(k, k);
    }
    index
}

fn bench_insert(c: &mut Criterion) {
    let keys = random_keys(KEYS, SEED);
    c.bench_function("avl/insert_10k", |b| {
        b.iter(|| black_box(filled(black_box(&keys))))
    });
}

fn bench_delete(c: &mut Criterion) {
    let keys = random_keys(KEYS, SEED);
    let base = filled(&keys);
    c.bench_function("avl/delete_10k", |b| {
        b.iter_batched(
            || base.clone(),
            |mut index| {
                for &k in &keys {
                    black_box(index.delete(k));
                }
                index
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_queries(c: &mut Criterion) {
    let index = filled(&random_keys(KEYS, SEED));
    let probes = random_keys(QUERIES, SEED ^ 0xFFFF);

    c.bench_function("avl/find_floor_5k", |b| {
        b.iter(|| {
            for &p in &probes {
                black_box(index.find_floor(black_box(p)));
            }
        })
    });

    c.bench_function("avl/find_ceiling_5k", |b| {
        b.iter(|| {
            for &p in &probes {
                black_box(index.find_ceiling(black_box(p)));
            }
        })
    });

    c.bench_function("avl/successor_walk_full", |b| {
        b.iter(|| {
            let mut cur = index.find_ceiling(0);
            let mut n = 0usize;
            while let Some((k, _)) = cur {
                n += 1;
                cur = index.successor(k);
            }
            black_box(n)
        })
    });
}

criterion_group!(benches, bench_insert, bench_delete, bench_queries);
criterion_main!(benches);
