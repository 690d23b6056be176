// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kinemark_persist::FlatMap;
use kurbo::Point;

use crate::calibration::CoordinateCalibration;
use crate::error::CalibrationError;
use crate::params::CalibrationParams;

/// Keys written by [`CoordinateCalibration::save`].
pub mod keys {
    /// Raw x of the origin.
    pub const ORIGIN_X: &str = "origin_x";
    /// Raw y of the origin.
    pub const ORIGIN_Y: &str = "origin_y";
    /// Raw x of the x-axis reference point.
    pub const AXIS1_X: &str = "axis1_x";
    /// Raw y of the x-axis reference point.
    pub const AXIS1_Y: &str = "axis1_y";
    /// Axis swap flag.
    pub const SWAP_AXES: &str = "swap_axes";
    /// Scale along real x.
    pub const X_SCALE: &str = "x_scale";
    /// Scale along real y.
    pub const Y_SCALE: &str = "y_scale";
}

impl CalibrationParams {
    /// Writes every parameter into `map`.
    pub fn save(&self, map: &mut FlatMap) {
        map.insert(keys::ORIGIN_X, self.origin.x);
        map.insert(keys::ORIGIN_Y, self.origin.y);
        map.insert(keys::AXIS1_X, self.axis1.x);
        map.insert(keys::AXIS1_Y, self.axis1.y);
        map.insert(keys::SWAP_AXES, self.swap_axes);
        map.insert(keys::X_SCALE, self.x_scale);
        map.insert(keys::Y_SCALE, self.y_scale);
    }

    /// Returns a copy of `self` overridden by whatever keys `map` holds.
    ///
    /// Missing keys keep the value from `self`. The result is validated.
    pub fn restored_from(&self, map: &FlatMap) -> Result<Self, CalibrationError> {
        let params = Self {
            x_scale: map.get_f64(keys::X_SCALE)?.unwrap_or(self.x_scale),
            y_scale: map.get_f64(keys::Y_SCALE)?.unwrap_or(self.y_scale),
            origin: Point::new(
                map.get_f64(keys::ORIGIN_X)?.unwrap_or(self.origin.x),
                map.get_f64(keys::ORIGIN_Y)?.unwrap_or(self.origin.y),
            ),
            axis1: Point::new(
                map.get_f64(keys::AXIS1_X)?.unwrap_or(self.axis1.x),
                map.get_f64(keys::AXIS1_Y)?.unwrap_or(self.axis1.y),
            ),
            swap_axes: map.get_bool(keys::SWAP_AXES)?.unwrap_or(self.swap_axes),
        };
        params.validate()?;
        Ok(params)
    }
}

impl CoordinateCalibration {
    /// Writes the current parameters into `map`.
    pub fn save(&self, map: &mut FlatMap) {
        self.params().save(map);
    }

    /// Restores parameters from `map`.
    ///
    /// Missing keys keep their current value. On error nothing changes and no
    /// listener is called; otherwise listeners get one notification covering
    /// everything that changed.
    pub fn restore(&mut self, map: &FlatMap) -> Result<(), CalibrationError> {
        let params = self.params().restored_from(map)?;
        self.update(params)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use kinemark_persist::{FlatError, FlatMap};
    use kurbo::Point;

    use super::keys;
    use crate::{CalibrationChange, CalibrationError, CoordinateCalibration};

    #[test]
    fn save_then_restore_into_a_fresh_calibration() {
        let mut cal = CoordinateCalibration::new();
        cal.set_axes(Point::new(3.0, 4.0), Point::new(3.0, 9.0), true)
            .unwrap();
        cal.set_scale(0.1, 0.2).unwrap();

        let mut map = FlatMap::new();
        cal.save(&mut map);
        assert_eq!(map.len(), 7);

        let mut fresh = CoordinateCalibration::new();
        fresh.restore(&map).unwrap();
        assert_eq!(fresh.params(), cal.params());
        assert_eq!(fresh.angle(), 90.0);
    }

    #[test]
    fn missing_keys_keep_current_values() {
        let mut cal = CoordinateCalibration::new();
        cal.set_scale(5.0, 5.0).unwrap();

        let mut map = FlatMap::new();
        map.insert(keys::SWAP_AXES, true);
        cal.restore(&map).unwrap();

        assert!(cal.swap_axes());
        assert_eq!(cal.x_scale(), 5.0);
        assert_eq!(cal.origin(), Point::ORIGIN);
    }

    #[test]
    fn restore_notifies_once_with_all_changes() {
        let mut cal = CoordinateCalibration::new();
        let last = Rc::new(Cell::new(None));
        let count = Rc::new(Cell::new(0));
        let (sink, counter) = (last.clone(), count.clone());
        cal.subscribe(move |_, ev| {
            sink.set(Some(ev.changed));
            counter.set(counter.get() + 1);
        });

        let mut map = FlatMap::new();
        map.insert(keys::X_SCALE, 2.0);
        map.insert(keys::ORIGIN_X, 7.0);
        cal.restore(&map).unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(
            last.get(),
            Some(CalibrationChange::SCALE | CalibrationChange::ORIGIN)
        );
    }

    #[test]
    fn bad_input_leaves_state_untouched() {
        let mut cal = CoordinateCalibration::new();
        let before = cal.params();

        let mut wrong_type = FlatMap::new();
        wrong_type.insert(keys::X_SCALE, 2.0);
        wrong_type.insert(keys::SWAP_AXES, 1_i64);
        assert!(matches!(
            cal.restore(&wrong_type),
            Err(CalibrationError::Persist(FlatError::TypeMismatch { .. }))
        ));

        let mut zero_scale = FlatMap::new();
        zero_scale.insert(keys::Y_SCALE, 0.0);
        assert!(matches!(
            cal.restore(&zero_scale),
            Err(CalibrationError::InvalidScale { .. })
        ));

        assert_eq!(cal.params(), before);
    }
}
