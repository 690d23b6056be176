// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::RefCell;

use kinemark_calibration::CoordinateCalibration;
use kinemark_markers::{MarkerError, MarkerStore, SubscriptionId};
use kurbo::{Point, Vec2};

use crate::attach;
use crate::outcome::{Recalibrate, RecalibrationOutcome, SetterError, SkipReason};

/// Number of markers spanning the reference length.
pub const LENGTH_MARKER_COUNT: usize = 2;

#[derive(Debug)]
struct LengthState {
    calibration: Rc<RefCell<CoordinateCalibration>>,
    calibration_value: Option<f64>,
}

impl Recalibrate for LengthState {
    fn recalibrate(&self, markers: &MarkerStore) -> RecalibrationOutcome {
        let outcome = self.apply(markers);
        if let RecalibrationOutcome::Skipped(reason) = outcome {
            log::debug!("length calibration skipped: {reason:?}");
        }
        outcome
    }
}

impl LengthState {
    fn apply(&self, markers: &MarkerStore) -> RecalibrationOutcome {
        let [a, b] = markers.records() else {
            return RecalibrationOutcome::Skipped(SkipReason::MarkerCount {
                expected: LENGTH_MARKER_COUNT,
                found: markers.len(),
            });
        };
        let Some(value) = self.calibration_value else {
            return RecalibrationOutcome::Skipped(SkipReason::NoCalibrationValue);
        };
        let pixel_distance = a.position.distance(b.position);
        if !(pixel_distance > 0.0 && pixel_distance.is_finite()) {
            return RecalibrationOutcome::Skipped(SkipReason::DegenerateMarkers);
        }
        let factor = value / pixel_distance;
        let Ok(mut calibration) = self.calibration.try_borrow_mut() else {
            return RecalibrationOutcome::Skipped(SkipReason::CalibrationBusy);
        };
        match calibration.set_scale(factor, factor) {
            Ok(()) => {
                log::debug!("length calibration: {value} over {pixel_distance} raw units, scale {factor}");
                RecalibrationOutcome::Applied
            }
            Err(err) => {
                log::debug!("length calibration rejected: {err}");
                RecalibrationOutcome::Skipped(SkipReason::DegenerateMarkers)
            }
        }
    }
}

/// Keeps a calibration's scale in step with two "scale markers".
///
/// The user places two markers a known real distance apart (a ruler on the
/// lab bench, say) and enters that distance as the *calibration value*.
/// Whenever the markers move, are added or removed, the setter recomputes
/// `value / raw_distance` and applies it to both axes.
///
/// Recalibration is skipped, leaving the previous scale in place, while the
/// store does not hold exactly two markers, while no calibration value is
/// set, or when the markers coincide.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
/// use kurbo::Point;
/// use kinemark_calibration::CoordinateCalibration;
/// use kinemark_calibration_setters::LengthCalibrationSetter;
/// use kinemark_markers::MarkerStore;
///
/// let calibration = Rc::new(RefCell::new(CoordinateCalibration::new()));
/// let mut scale_markers = MarkerStore::new();
/// let setter = LengthCalibrationSetter::attach(&mut scale_markers, calibration.clone());
///
/// scale_markers.insert(0, Point::new(10.0, 10.0)).unwrap();
/// scale_markers.insert(1, Point::new(60.0, 10.0)).unwrap();
/// setter.set_calibration_value(100.0, &scale_markers).unwrap();
/// assert_eq!(calibration.borrow().x_scale(), 2.0);
///
/// // Dragging a marker rescales immediately.
/// scale_markers.set_position(1, Point::new(110.0, 10.0)).unwrap();
/// assert_eq!(calibration.borrow().y_scale(), 1.0);
///
/// setter.detach(&mut scale_markers);
/// ```
#[derive(Debug)]
pub struct LengthCalibrationSetter {
    state: Rc<RefCell<LengthState>>,
    subscription: SubscriptionId,
}

impl LengthCalibrationSetter {
    /// Subscribes to `markers` and recalibrates once from its current content.
    #[must_use]
    pub fn attach(
        markers: &mut MarkerStore,
        calibration: Rc<RefCell<CoordinateCalibration>>,
    ) -> Self {
        let state = Rc::new(RefCell::new(LengthState {
            calibration,
            calibration_value: None,
        }));
        let subscription = attach::subscribe(&state, markers);
        state.borrow().recalibrate(markers);
        Self {
            state,
            subscription,
        }
    }

    /// Unsubscribes from `markers`, which must be the store passed to
    /// [`attach`](Self::attach). Returns `false` if it was a different store.
    pub fn detach(self, markers: &mut MarkerStore) -> bool {
        markers.unsubscribe(self.subscription)
    }

    /// The calibration this setter writes to.
    #[must_use]
    pub fn calibration(&self) -> Rc<RefCell<CoordinateCalibration>> {
        self.state.borrow().calibration.clone()
    }

    /// The real-world length the two markers span, once set.
    #[must_use]
    pub fn calibration_value(&self) -> Option<f64> {
        self.state.borrow().calibration_value
    }

    /// The subscription held on the marker store.
    #[must_use]
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Sets the real-world length spanned by the markers and recalibrates
    /// against `markers`, the attached store.
    pub fn set_calibration_value(
        &self,
        value: f64,
        markers: &MarkerStore,
    ) -> Result<RecalibrationOutcome, SetterError> {
        if !(value.is_finite() && value > 0.0) {
            return Err(SetterError::InvalidCalibrationValue(value));
        }
        self.state.borrow_mut().calibration_value = Some(value);
        Ok(self.recalibrate(markers))
    }

    /// Recomputes the scale from `markers`, the attached store.
    pub fn recalibrate(&self, markers: &MarkerStore) -> RecalibrationOutcome {
        self.state.borrow().recalibrate(markers)
    }

    /// Places the two scale markers (ids 0 and 1) on a horizontal line
    /// centered on `center`, `2 * half_length` raw units apart.
    ///
    /// Only seeds an empty store; returns `false` if markers already exist.
    pub fn seed_markers(
        markers: &mut MarkerStore,
        center: Point,
        half_length: f64,
    ) -> Result<bool, MarkerError> {
        if !markers.is_empty() {
            return Ok(false);
        }
        let offset = Vec2::new(half_length, 0.0);
        markers.insert(0, center - offset)?;
        markers.insert(1, center + offset)?;
        Ok(true)
    }
}
