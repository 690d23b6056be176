// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kinemark_markers::{MarkerRecord, MarkerStore};
use kinemark_persist::FlatMap;
use kurbo::Point;

fn filled(len: usize) -> MarkerStore {
    let mut store = MarkerStore::new();
    for id in 0..len as i64 {
        store
            .insert(id * 2, Point::new(id as f64, 0.5 * id as f64))
            .unwrap();
    }
    store
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers/insert");

    // Frames tagged in playback order append; scrubbing back inserts in front.
    for len in [256usize, 2_048, 16_384] {
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("ascending", len), &len, |b, &len| {
            b.iter_batched(
                MarkerStore::new,
                |mut store| {
                    for id in 0..len as i64 {
                        store.add(MarkerRecord::new(id, Point::ORIGIN)).unwrap();
                    }
                    black_box(store);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("descending", len), &len, |b, &len| {
            b.iter_batched(
                MarkerStore::new,
                |mut store| {
                    for id in (0..len as i64).rev() {
                        store.add(MarkerRecord::new(id, Point::ORIGIN)).unwrap();
                    }
                    black_box(store);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers/find_by_id");

    for len in [256usize, 2_048, 16_384] {
        let store = filled(len);
        let probes: Vec<i64> = (0..len as i64).collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &probes, |b, probes| {
            b.iter(|| {
                let mut hits = 0_usize;
                for &id in probes {
                    hits += usize::from(store.find_by_id(black_box(id)).is_some());
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn bench_persist(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers/persist");

    for len in [256usize, 16_384] {
        let store = filled(len);
        let mut saved = FlatMap::new();
        store.save(&mut saved);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("save", len), &store, |b, store| {
            b.iter(|| {
                let mut map = FlatMap::new();
                store.save(&mut map);
                black_box(map);
            });
        });

        group.bench_with_input(BenchmarkId::new("restore", len), &saved, |b, saved| {
            b.iter_batched(
                MarkerStore::new,
                |mut store| {
                    store.restore(saved).unwrap();
                    black_box(store);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_persist);
criterion_main!(benches);
