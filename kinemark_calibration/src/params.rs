// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::error::CalibrationError;
use crate::event::CalibrationChange;

/// Mirrors raw x before the swap quarter turn.
const MIRROR_X: Affine = Affine::new([-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

/// Rotates the axes by +90°, i.e. points by -90°: `(x, y) -> (y, -x)`.
const QUARTER_TURN: Affine = Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, 0.0]);

/// Returns the direction of `point` as seen from `origin`, in degrees.
///
/// The angle is measured from the positive raw x-axis towards the positive raw
/// y-axis and normalized to `[0, 360)`. Coincident points yield `0`.
///
/// ```rust
/// use kurbo::Point;
/// use kinemark_calibration::angle_between;
///
/// let origin = Point::new(1.0, 1.0);
/// assert_eq!(angle_between(origin, Point::new(5.0, 1.0)), 0.0);
/// assert_eq!(angle_between(origin, Point::new(1.0, 4.0)), 90.0);
/// assert_eq!(angle_between(origin, Point::new(-2.0, 1.0)), 180.0);
/// assert_eq!(angle_between(origin, Point::new(1.0, 0.0)), 270.0);
/// ```
#[must_use]
pub fn angle_between(origin: Point, point: Point) -> f64 {
    let v = point - origin;
    // atan2 of signed zeros can be ±180.
    if v.x == 0.0 && v.y == 0.0 {
        return 0.0;
    }
    let deg = v.atan2().to_degrees();
    if deg < 0.0 {
        let wrapped = deg + 360.0;
        // Angles a hair below zero round up to a full turn.
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    } else {
        // Folds -0.0 into 0.0.
        deg + 0.0
    }
}

/// Plain calibration parameters, without listeners.
///
/// This is the value type behind [`CoordinateCalibration`](crate::CoordinateCalibration):
/// it is what listeners receive as the previous state, what
/// [`CoordinateCalibration::params`](crate::CoordinateCalibration::params)
/// returns, and it can evaluate the transform on its own.
///
/// The axis angle is not stored; it is derived from `origin` and `axis1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationParams {
    /// Real units per raw unit along the real x-axis.
    pub x_scale: f64,
    /// Real units per raw unit along the real y-axis.
    pub y_scale: f64,
    /// Raw point mapped to real `(0, 0)`.
    pub origin: Point,
    /// Raw reference point on the positive real x-axis.
    pub axis1: Point,
    /// Exchange real x and y after rotation.
    pub swap_axes: bool,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            x_scale: 1.0,
            y_scale: 1.0,
            origin: Point::ORIGIN,
            axis1: Point::new(1.0, 0.0),
            swap_axes: false,
        }
    }
}

impl CalibrationParams {
    /// Axis angle in degrees, in `[0, 360)`. See [`angle_between`].
    #[must_use]
    pub fn angle(&self) -> f64 {
        angle_between(self.origin, self.axis1)
    }

    /// Checks that the scales are finite and positive and that both
    /// reference points are finite.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let scale_ok = |s: f64| s.is_finite() && s > 0.0;
        if !scale_ok(self.x_scale) || !scale_ok(self.y_scale) {
            return Err(CalibrationError::InvalidScale {
                x_scale: self.x_scale,
                y_scale: self.y_scale,
            });
        }
        for point in [self.origin, self.axis1] {
            if !point.is_finite() {
                return Err(CalibrationError::NonFinitePoint(point));
            }
        }
        Ok(())
    }

    /// Returns which parameter groups differ between `self` and `other`.
    #[must_use]
    pub fn diff(&self, other: &Self) -> CalibrationChange {
        let mut changed = CalibrationChange::empty();
        if self.x_scale != other.x_scale || self.y_scale != other.y_scale {
            changed |= CalibrationChange::SCALE;
        }
        if self.origin != other.origin || self.axis1 != other.axis1 {
            changed |= CalibrationChange::ORIGIN;
        }
        if self.swap_axes != other.swap_axes {
            changed |= CalibrationChange::SWAP_AXES;
        }
        changed
    }

    /// Builds the raw → real transform.
    ///
    /// Order of application: translate by `-origin`, rotate the axes by the
    /// axis angle, optionally mirror x and rotate the axes a further quarter
    /// turn (which exchanges x and y), then scale each axis.
    #[must_use]
    pub fn raw_to_real_transform(&self) -> Affine {
        // Rotation is taken from the unit direction rather than the angle so
        // that axis-aligned frames stay exact.
        let dir = self.axis1 - self.origin;
        let len = dir.hypot();
        let (cos, sin) = if len > 0.0 && len.is_finite() {
            (dir.x / len, dir.y / len)
        } else {
            (1.0, 0.0)
        };
        let rotate = Affine::new([cos, -sin, sin, cos, 0.0, 0.0]);
        let mut frame = rotate * Affine::translate(-self.origin.to_vec2());
        if self.swap_axes {
            frame = QUARTER_TURN * MIRROR_X * frame;
        }
        Affine::scale_non_uniform(self.x_scale, self.y_scale) * frame
    }

    /// Maps a raw point to real coordinates.
    #[must_use]
    pub fn raw_to_real(&self, raw: Point) -> Point {
        self.raw_to_real_transform() * raw
    }

    /// Maps a real point back to raw coordinates.
    #[must_use]
    pub fn real_to_raw(&self, real: Point) -> Point {
        self.raw_to_real_transform().inverse() * real
    }

    /// Scales a raw vector into real units, without translation or rotation.
    #[must_use]
    pub fn raw_length_to_real(&self, raw: Vec2) -> Vec2 {
        Vec2::new(raw.x * self.x_scale, raw.y * self.y_scale)
    }

    /// Scales a real vector back into raw units.
    #[must_use]
    pub fn real_length_to_raw(&self, real: Vec2) -> Vec2 {
        Vec2::new(real.x / self.x_scale, real.y / self.y_scale)
    }
}
