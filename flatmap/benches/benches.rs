use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flatmap::FlatMap;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn insert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<u64> = (0..1024).map(|_| rng.gen()).collect();

    c.bench_function("insert 1024", |b| {
        b.iter(|| {
            let mut map = FlatMap::new();
            for &key in &keys {
                map.insert(black_box(key), key);
            }
            map
        })
    });
}

fn get(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<u64> = (0..1024).map(|_| rng.gen()).collect();
    let map: FlatMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

    c.bench_function("get 1024", |b| {
        b.iter(|| {
            let mut found = 0;
            for key in &keys {
                if map.contains(black_box(key)) {
                    found += 1;
                }
            }
            found
        })
    });
}

fn scan(c: &mut Criterion) {
    let map: FlatMap<u64, u64> = (0..1024).map(|k| (k, k)).collect();

    c.bench_function("scan 1024", |b| {
        b.iter(|| map.iter().sum::<u64>())
    });
}

criterion_group!(benches, insert, get, scan);
criterion_main!(benches);
