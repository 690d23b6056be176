// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kinemark_notify::{Listeners, SubscriptionId};
use kurbo::{Affine, Point, Vec2};

use crate::error::CalibrationError;
use crate::event::{CalibrationChange, CalibrationEvent};
use crate::params::CalibrationParams;

/// Live raw ↔ real coordinate mapping with change notification.
///
/// `CoordinateCalibration` owns a [`CalibrationParams`] value, caches the
/// forward and inverse transforms derived from it, and notifies subscribed
/// listeners synchronously whenever a setter changes any parameter.
///
/// Setters are validating: a rejected call leaves the calibration untouched.
/// A call that changes nothing does not notify.
pub struct CoordinateCalibration {
    params: CalibrationParams,
    raw_to_real: Affine,
    real_to_raw: Affine,
    listeners: Listeners<Self, CalibrationEvent>,
}

impl CoordinateCalibration {
    /// Creates an identity calibration: unit scales, origin at the raw origin,
    /// axis along raw +x, no swap.
    #[must_use]
    pub fn new() -> Self {
        let mut calibration = Self {
            params: CalibrationParams::default(),
            raw_to_real: Affine::IDENTITY,
            real_to_raw: Affine::IDENTITY,
            listeners: Listeners::new(),
        };
        calibration.rebuild_transforms();
        calibration
    }

    /// Creates a calibration from explicit parameters.
    pub fn with_params(params: CalibrationParams) -> Result<Self, CalibrationError> {
        params.validate()?;
        let mut calibration = Self::new();
        calibration.params = params;
        calibration.rebuild_transforms();
        Ok(calibration)
    }

    /// Returns a copy of the current parameters.
    #[must_use]
    pub fn params(&self) -> CalibrationParams {
        self.params
    }

    /// Real units per raw unit along the real x-axis.
    #[must_use]
    pub fn x_scale(&self) -> f64 {
        self.params.x_scale
    }

    /// Real units per raw unit along the real y-axis.
    #[must_use]
    pub fn y_scale(&self) -> f64 {
        self.params.y_scale
    }

    /// Raw point mapped to real `(0, 0)`.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.params.origin
    }

    /// Raw reference point on the positive real x-axis.
    #[must_use]
    pub fn axis1(&self) -> Point {
        self.params.axis1
    }

    /// Axis angle in degrees, in `[0, 360)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.params.angle()
    }

    /// Whether real x and y are exchanged.
    #[must_use]
    pub fn swap_axes(&self) -> bool {
        self.params.swap_axes
    }

    /// Sets both scale factors.
    pub fn set_scale(&mut self, x_scale: f64, y_scale: f64) -> Result<(), CalibrationError> {
        self.update(CalibrationParams {
            x_scale,
            y_scale,
            ..self.params
        })
    }

    /// Sets the origin and the x-axis reference point; the axis angle is
    /// derived from them.
    pub fn set_origin(&mut self, origin: Point, axis1: Point) -> Result<(), CalibrationError> {
        self.update(CalibrationParams {
            origin,
            axis1,
            ..self.params
        })
    }

    /// Sets whether real x and y are exchanged.
    pub fn set_swap_axes(&mut self, swap_axes: bool) {
        if self.params.swap_axes == swap_axes {
            return;
        }
        let previous = self.params;
        self.params.swap_axes = swap_axes;
        self.commit(previous, CalibrationChange::SWAP_AXES);
    }

    /// Sets origin, axis reference and swap flag together, with a single
    /// notification.
    pub fn set_axes(
        &mut self,
        origin: Point,
        axis1: Point,
        swap_axes: bool,
    ) -> Result<(), CalibrationError> {
        self.update(CalibrationParams {
            origin,
            axis1,
            swap_axes,
            ..self.params
        })
    }

    /// Replaces every parameter, with a single notification.
    pub fn set_params(&mut self, params: CalibrationParams) -> Result<(), CalibrationError> {
        self.update(params)
    }

    /// Maps a raw point to real coordinates.
    #[must_use]
    pub fn raw_to_real(&self, raw: Point) -> Point {
        self.raw_to_real * raw
    }

    /// Maps a real point back to raw coordinates.
    #[must_use]
    pub fn real_to_raw(&self, real: Point) -> Point {
        self.real_to_raw * real
    }

    /// Scales a raw vector into real units, without translation or rotation.
    #[must_use]
    pub fn raw_length_to_real(&self, raw: Vec2) -> Vec2 {
        self.params.raw_length_to_real(raw)
    }

    /// Scales a real vector back into raw units.
    #[must_use]
    pub fn real_length_to_raw(&self, real: Vec2) -> Vec2 {
        self.params.real_length_to_raw(real)
    }

    /// Real-space length of the raw segment `a..b`.
    ///
    /// Unlike [`raw_length_to_real`](Self::raw_length_to_real) this accounts
    /// for the axis frame, which matters when the scales differ.
    #[must_use]
    pub fn raw_distance_to_real(&self, a: Point, b: Point) -> f64 {
        self.raw_to_real(a).distance(self.raw_to_real(b))
    }

    /// Maps a real point computed under `previous` into the current frame.
    ///
    /// Listeners that cache real-space positions can use this with
    /// [`CalibrationEvent::previous`] to follow a recalibration.
    #[must_use]
    pub fn reproject(&self, previous: &CalibrationParams, real: Point) -> Point {
        self.raw_to_real(previous.real_to_raw(real))
    }

    /// The cached raw → real transform.
    #[must_use]
    pub fn raw_to_real_transform(&self) -> Affine {
        self.raw_to_real
    }

    /// The cached real → raw transform.
    #[must_use]
    pub fn real_to_raw_transform(&self) -> Affine {
        self.real_to_raw
    }

    /// Registers a listener called after every change.
    ///
    /// Listeners receive the calibration itself; they must not borrow it
    /// through any other path (for example a shared `RefCell`) while running.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Self, &CalibrationEvent) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Removes a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn update(&mut self, params: CalibrationParams) -> Result<(), CalibrationError> {
        params.validate()?;
        let changed = self.params.diff(&params);
        if changed.is_empty() {
            return Ok(());
        }
        let previous = self.params;
        self.params = params;
        self.commit(previous, changed);
        Ok(())
    }

    fn commit(&mut self, previous: CalibrationParams, changed: CalibrationChange) {
        self.rebuild_transforms();
        log::trace!("calibration changed: {changed:?} -> {:?}", self.params);
        let event = CalibrationEvent { changed, previous };
        let mut listeners = core::mem::take(&mut self.listeners);
        listeners.emit(self, &event);
        self.listeners = listeners;
    }

    fn rebuild_transforms(&mut self) {
        self.raw_to_real = self.params.raw_to_real_transform();
        // Validated scales are positive, so the transform is invertible.
        self.real_to_raw = self.raw_to_real.inverse();
    }
}

impl Default for CoordinateCalibration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CoordinateCalibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateCalibration")
            .field("params", &self.params)
            .field("angle", &self.params.angle())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
