// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `kinemark_calibration` crate.
//!
//! These pin the axis conventions through the public API and check that the
//! inverse transform holds across a spread of calibration states.

use kinemark_calibration::{CalibrationParams, CoordinateCalibration, angle_between};
use kurbo::Point;

fn close(a: Point, b: Point, tol: f64) -> bool {
    (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol
}

#[test]
fn horizontal_axis_is_identity_at_unit_scale() {
    let mut cal = CoordinateCalibration::new();
    cal.set_origin(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
        .unwrap();
    assert_eq!(cal.angle(), 0.0);
    assert!(!cal.swap_axes());
    assert_eq!(cal.raw_to_real(Point::new(5.0, 0.0)), Point::new(5.0, 0.0));
}

#[test]
fn vertical_axis_maps_raw_x_to_negative_real_y() {
    let mut cal = CoordinateCalibration::new();
    cal.set_origin(Point::new(0.0, 0.0), Point::new(0.0, 10.0))
        .unwrap();
    assert_eq!(cal.angle(), 90.0);
    assert!(close(
        cal.raw_to_real(Point::new(10.0, 0.0)),
        Point::new(0.0, -10.0),
        1e-12
    ));
}

#[test]
fn swap_exchanges_real_axes_in_any_frame() {
    let mut cal = CoordinateCalibration::new();
    cal.set_origin(Point::new(2.0, 3.0), Point::new(7.0, 8.0))
        .unwrap();
    let raw = Point::new(-4.0, 11.0);
    let plain = cal.raw_to_real(raw);

    cal.set_swap_axes(true);
    let swapped = cal.raw_to_real(raw);
    assert!(close(swapped, Point::new(plain.y, plain.x), 1e-9));
}

#[test]
fn round_trip_holds_for_many_states() {
    let origins = [Point::new(0.0, 0.0), Point::new(320.0, 240.0), Point::new(-50.0, 9.5)];
    let angles_deg = [0.0_f64, 30.0, 90.0, 135.0, 180.0, 271.0];
    let scales = [(1.0, 1.0), (0.004, 0.004), (2.5, 0.3)];
    let raws = [
        Point::new(0.0, 0.0),
        Point::new(1920.0, 1080.0),
        Point::new(-7.25, 33.0),
    ];

    for origin in origins {
        for angle in angles_deg {
            let (s, c) = angle.to_radians().sin_cos();
            let axis1 = Point::new(origin.x + 100.0 * c, origin.y + 100.0 * s);
            assert!((angle_between(origin, axis1) - angle).abs() < 1e-9);

            for (x_scale, y_scale) in scales {
                for swap_axes in [false, true] {
                    let cal = CoordinateCalibration::with_params(CalibrationParams {
                        x_scale,
                        y_scale,
                        origin,
                        axis1,
                        swap_axes,
                    })
                    .unwrap();
                    for raw in raws {
                        let back = cal.real_to_raw(cal.raw_to_real(raw));
                        assert!(close(back, raw, 1e-4), "{raw:?} came back as {back:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn transform_never_mutates_the_calibration() {
    let mut cal = CoordinateCalibration::new();
    cal.set_scale(3.0, 3.0).unwrap();
    let before = cal.params();
    let _ = cal.raw_to_real(Point::new(1.0, 2.0));
    let _ = cal.real_to_raw(Point::new(1.0, 2.0));
    assert_eq!(cal.params(), before);
}
