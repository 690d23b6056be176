// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::RefCell;

use kinemark_calibration::CoordinateCalibration;
use kinemark_markers::{MarkerError, MarkerStore, SubscriptionId};
use kurbo::{Point, Vec2};

use crate::attach;
use crate::outcome::{Recalibrate, RecalibrationOutcome, SkipReason};

/// Which reference markers an [`OriginCalibrationSetter`] expects.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisLayout {
    /// Marker 0 is the origin, marker 1 lies on the real x-axis.
    #[default]
    OriginAndXAxis,
    /// As [`OriginAndXAxis`](Self::OriginAndXAxis), plus marker 2 on the real
    /// y-axis. The third marker is a visual aid; it does not feed the
    /// calibration.
    OriginAndBothAxes,
}

impl AxisLayout {
    /// Number of markers the layout needs before it can recalibrate.
    #[must_use]
    pub const fn marker_count(self) -> usize {
        match self {
            Self::OriginAndXAxis => 2,
            Self::OriginAndBothAxes => 3,
        }
    }
}

#[derive(Debug)]
struct OriginState {
    calibration: Rc<RefCell<CoordinateCalibration>>,
    layout: AxisLayout,
    swap_axes: bool,
}

impl Recalibrate for OriginState {
    fn recalibrate(&self, markers: &MarkerStore) -> RecalibrationOutcome {
        let outcome = self.apply(markers);
        if let RecalibrationOutcome::Skipped(reason) = outcome {
            log::debug!("origin calibration skipped: {reason:?}");
        }
        outcome
    }
}

impl OriginState {
    fn apply(&self, markers: &MarkerStore) -> RecalibrationOutcome {
        let expected = self.layout.marker_count();
        let records = markers.records();
        if records.len() != expected {
            return RecalibrationOutcome::Skipped(SkipReason::MarkerCount {
                expected,
                found: records.len(),
            });
        }
        let origin = records[0].position;
        let axis1 = records[1].position;
        if origin == axis1 {
            return RecalibrationOutcome::Skipped(SkipReason::DegenerateMarkers);
        }
        let Ok(mut calibration) = self.calibration.try_borrow_mut() else {
            return RecalibrationOutcome::Skipped(SkipReason::CalibrationBusy);
        };
        match calibration.set_axes(origin, axis1, self.swap_axes) {
            Ok(()) => {
                log::debug!(
                    "origin calibration: origin {origin:?}, axis angle {}",
                    calibration.angle()
                );
                RecalibrationOutcome::Applied
            }
            Err(err) => {
                log::debug!("origin calibration rejected: {err}");
                RecalibrationOutcome::Skipped(SkipReason::DegenerateMarkers)
            }
        }
    }
}

/// Keeps a calibration's origin and axis orientation in step with a small
/// store of "origin markers".
///
/// Marker 0 (lowest id) is the origin and marker 1 points along the real
/// x-axis; the axis angle follows from the two. Whether real x and y are
/// exchanged is a user toggle set through
/// [`set_swap_axes`](Self::set_swap_axes), never inferred from geometry.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
/// use kurbo::Point;
/// use kinemark_calibration::CoordinateCalibration;
/// use kinemark_calibration_setters::{AxisLayout, OriginCalibrationSetter};
/// use kinemark_markers::MarkerStore;
///
/// let calibration = Rc::new(RefCell::new(CoordinateCalibration::new()));
/// let mut origin_markers = MarkerStore::new();
/// let setter = OriginCalibrationSetter::attach(
///     &mut origin_markers,
///     calibration.clone(),
///     AxisLayout::OriginAndXAxis,
/// );
///
/// origin_markers.insert(0, Point::new(100.0, 100.0)).unwrap();
/// origin_markers.insert(1, Point::new(100.0, 150.0)).unwrap();
///
/// let cal = calibration.borrow();
/// assert_eq!(cal.origin(), Point::new(100.0, 100.0));
/// assert_eq!(cal.angle(), 90.0);
/// drop(cal);
///
/// setter.detach(&mut origin_markers);
/// ```
#[derive(Debug)]
pub struct OriginCalibrationSetter {
    state: Rc<RefCell<OriginState>>,
    subscription: SubscriptionId,
}

impl OriginCalibrationSetter {
    /// Subscribes to `markers` and recalibrates once from its current content.
    ///
    /// The swap flag starts out as the calibration's current value.
    #[must_use]
    pub fn attach(
        markers: &mut MarkerStore,
        calibration: Rc<RefCell<CoordinateCalibration>>,
        layout: AxisLayout,
    ) -> Self {
        let swap_axes = calibration.borrow().swap_axes();
        let state = Rc::new(RefCell::new(OriginState {
            calibration,
            layout,
            swap_axes,
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

    /// The marker layout this setter expects.
    #[must_use]
    pub fn layout(&self) -> AxisLayout {
        self.state.borrow().layout
    }

    /// Whether real x and y are exchanged.
    #[must_use]
    pub fn swap_axes(&self) -> bool {
        self.state.borrow().swap_axes
    }

    /// The subscription held on the marker store.
    #[must_use]
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Sets the axis swap toggle and recalibrates against `markers`, the
    /// attached store.
    ///
    /// When the markers cannot define the axes yet, the toggle is still
    /// written to the calibration on its own.
    pub fn set_swap_axes(&self, swap_axes: bool, markers: &MarkerStore) -> RecalibrationOutcome {
        self.state.borrow_mut().swap_axes = swap_axes;
        let state = self.state.borrow();
        let outcome = state.recalibrate(markers);
        if let RecalibrationOutcome::Skipped(reason) = outcome
            && reason != SkipReason::CalibrationBusy
            && let Ok(mut calibration) = state.calibration.try_borrow_mut()
        {
            calibration.set_swap_axes(swap_axes);
        }
        outcome
    }

    /// Recomputes origin and angle from `markers`, the attached store.
    pub fn recalibrate(&self, markers: &MarkerStore) -> RecalibrationOutcome {
        self.state.borrow().recalibrate(markers)
    }

    /// Places the layout's markers around `center`: the origin (id 0) at
    /// `center`, the x-axis marker (id 1) `arm_length` to its right and, for
    /// [`AxisLayout::OriginAndBothAxes`], the y-axis marker (id 2)
    /// `arm_length` below it.
    ///
    /// Only seeds an empty store; returns `false` if markers already exist.
    pub fn seed_markers(
        markers: &mut MarkerStore,
        layout: AxisLayout,
        center: Point,
        arm_length: f64,
    ) -> Result<bool, MarkerError> {
        if !markers.is_empty() {
            return Ok(false);
        }
        markers.insert(0, center)?;
        markers.insert(1, center + Vec2::new(arm_length, 0.0))?;
        if layout == AxisLayout::OriginAndBothAxes {
            markers.insert(2, center + Vec2::new(0.0, arm_length))?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use kinemark_calibration::CoordinateCalibration;
    use kinemark_markers::MarkerStore;
    use kurbo::Point;

    use super::{AxisLayout, OriginCalibrationSetter};
    use crate::{RecalibrationOutcome, SkipReason};

    fn setup(
        layout: AxisLayout,
    ) -> (
        MarkerStore,
        Rc<RefCell<CoordinateCalibration>>,
        OriginCalibrationSetter,
    ) {
        let calibration = Rc::new(RefCell::new(CoordinateCalibration::new()));
        let mut markers = MarkerStore::new();
        let setter = OriginCalibrationSetter::attach(&mut markers, calibration.clone(), layout);
        (markers, calibration, setter)
    }

    #[test]
    fn two_point_layout_sets_origin_and_angle() {
        let (mut markers, calibration, _setter) = setup(AxisLayout::OriginAndXAxis);
        markers.insert(0, Point::new(10.0, 10.0)).unwrap();
        markers.insert(1, Point::new(20.0, 10.0)).unwrap();
        let cal = calibration.borrow();
        assert_eq!(cal.origin(), Point::new(10.0, 10.0));
        assert_eq!(cal.axis1(), Point::new(20.0, 10.0));
        assert_eq!(cal.angle(), 0.0);
    }

    #[test]
    fn three_point_layout_waits_for_the_third_marker() {
        let (mut markers, calibration, _setter) = setup(AxisLayout::OriginAndBothAxes);
        markers.insert(0, Point::new(5.0, 5.0)).unwrap();
        markers.insert(1, Point::new(5.0, 15.0)).unwrap();
        assert_eq!(calibration.borrow().origin(), Point::ORIGIN);

        markers.insert(2, Point::new(-5.0, 5.0)).unwrap();
        let cal = calibration.borrow();
        assert_eq!(cal.origin(), Point::new(5.0, 5.0));
        assert_eq!(cal.angle(), 90.0);
    }

    #[test]
    fn coincident_origin_and_axis_is_skipped() {
        let (mut markers, calibration, setter) = setup(AxisLayout::OriginAndXAxis);
        markers.insert(0, Point::new(3.0, 3.0)).unwrap();
        markers.insert(1, Point::new(3.0, 3.0)).unwrap();
        assert_eq!(
            setter.recalibrate(&markers),
            RecalibrationOutcome::Skipped(SkipReason::DegenerateMarkers)
        );
        assert_eq!(calibration.borrow().origin(), Point::ORIGIN);
    }

    #[test]
    fn swap_toggle_reaches_the_calibration_with_or_without_markers() {
        let (mut markers, calibration, setter) = setup(AxisLayout::OriginAndXAxis);
        assert_eq!(
            setter.set_swap_axes(true, &markers),
            RecalibrationOutcome::Skipped(SkipReason::MarkerCount {
                expected: 2,
                found: 0
            })
        );
        assert!(calibration.borrow().swap_axes());

        markers.insert(0, Point::ORIGIN).unwrap();
        markers.insert(1, Point::new(1.0, 0.0)).unwrap();
        assert!(calibration.borrow().swap_axes());

        assert_eq!(
            setter.set_swap_axes(false, &markers),
            RecalibrationOutcome::Applied
        );
        assert!(!calibration.borrow().swap_axes());
        assert!(!setter.swap_axes());
    }

    #[test]
    fn seeding_matches_the_layout() {
        let mut two = MarkerStore::new();
        assert_eq!(
            OriginCalibrationSetter::seed_markers(
                &mut two,
                AxisLayout::OriginAndXAxis,
                Point::new(50.0, 50.0),
                20.0
            ),
            Ok(true)
        );
        assert_eq!(two.len(), 2);

        let mut three = MarkerStore::new();
        OriginCalibrationSetter::seed_markers(
            &mut three,
            AxisLayout::OriginAndBothAxes,
            Point::new(50.0, 50.0),
            20.0,
        )
        .unwrap();
        assert_eq!(three.ids().collect::<alloc::vec::Vec<_>>(), [0, 1, 2]);
        assert_eq!(three.record_at(2).unwrap().position, Point::new(50.0, 70.0));

        assert_eq!(
            OriginCalibrationSetter::seed_markers(
                &mut three,
                AxisLayout::OriginAndBothAxes,
                Point::ORIGIN,
                1.0
            ),
            Ok(false)
        );
    }

    #[test]
    fn layout_marker_counts() {
        assert_eq!(AxisLayout::OriginAndXAxis.marker_count(), 2);
        assert_eq!(AxisLayout::OriginAndBothAxes.marker_count(), 3);
        assert_eq!(AxisLayout::default(), AxisLayout::OriginAndXAxis);
    }
}
