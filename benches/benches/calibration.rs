// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kinemark_calibration::{CalibrationParams, CoordinateCalibration};
use kurbo::Point;

fn calibration(swap_axes: bool) -> CoordinateCalibration {
    CoordinateCalibration::with_params(CalibrationParams {
        x_scale: 0.01,
        y_scale: 0.02,
        origin: Point::new(320.0, 240.0),
        axis1: Point::new(400.0, 180.0),
        swap_axes,
    })
    .unwrap()
}

fn raw_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new((i % 640) as f64, (i / 640) as f64))
        .collect()
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibration/convert");
    let points = raw_points(4_096);
    group.throughput(Throughput::Elements(points.len() as u64));

    for swap_axes in [false, true] {
        let cal = calibration(swap_axes);

        group.bench_with_input(
            BenchmarkId::new("raw_to_real", swap_axes),
            &points,
            |b, points| {
                b.iter(|| {
                    let mut acc = Point::ORIGIN;
                    for &p in points {
                        let real = cal.raw_to_real(black_box(p));
                        acc.x += real.x;
                        acc.y += real.y;
                    }
                    black_box(acc)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("round_trip", swap_axes),
            &points,
            |b, points| {
                b.iter(|| {
                    let mut acc = 0.0;
                    for &p in points {
                        acc += cal.real_to_raw(cal.raw_to_real(black_box(p))).x;
                    }
                    black_box(acc)
                });
            },
        );
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibration/update");

    // Dragging a scale marker: every frame sets a fresh scale and notifies.
    for listeners in [0usize, 4, 32] {
        let mut cal = calibration(false);
        for _ in 0..listeners {
            cal.subscribe(|cal, event| {
                black_box((cal.x_scale(), event.changed));
            });
        }
        let mut step = 0_u32;

        group.bench_function(BenchmarkId::new("set_scale", listeners), |b| {
            b.iter(|| {
                step = step.wrapping_add(1);
                let scale = 0.01 + f64::from(step % 1_000) * 1e-5;
                cal.set_scale(scale, scale).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_update);
criterion_main!(benches);
