// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinemark Calibration: raw ↔ real coordinate calibration.
//!
//! Positions tapped on a video frame arrive in *raw* coordinates (screen or
//! pixel space). Physics wants *real* coordinates: metres from a chosen
//! origin, along axes the student picked. [`CoordinateCalibration`] holds the
//! parameters linking the two and converts in both directions:
//!
//! - An **origin**: the raw point that becomes real `(0, 0)`.
//! - An **axis reference** (`axis1`): a raw point on the positive real
//!   x-axis. The axis angle is derived from it with [`angle_between`].
//! - An optional **axis swap**, for experiments where the interesting axis
//!   convention is mirrored relative to the camera.
//! - Independent **x/y scale** factors, in real units per raw unit.
//!
//! Every setter validates its input and notifies subscribed listeners
//! synchronously, so views and derived data can stay in step.
//!
//! ## Conventions
//!
//! `raw_to_real` applies, in order:
//! 1. translation by `-origin`;
//! 2. rotation of the axes by `+angle`, so `axis1` lands on the positive
//!    real x-axis (points themselves turn by `-angle`);
//! 3. if `swap_axes`, a mirror of x followed by a further quarter turn of the
//!    axes, which amounts to exchanging x and y;
//! 4. scaling of x by `x_scale` and y by `y_scale`.
//!
//! `real_to_raw` is the exact inverse.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use kinemark_calibration::CoordinateCalibration;
//!
//! let mut calibration = CoordinateCalibration::new();
//!
//! // Put the origin at pixel (100, 100) with the x-axis pointing along raw +y,
//! // and declare that one pixel is 5 mm.
//! calibration
//!     .set_origin(Point::new(100.0, 100.0), Point::new(100.0, 200.0))
//!     .unwrap();
//! calibration.set_scale(5.0, 5.0).unwrap();
//! assert_eq!(calibration.angle(), 90.0);
//!
//! let real = calibration.raw_to_real(Point::new(100.0, 110.0));
//! assert!((real.x - 50.0).abs() < 1e-9 && real.y.abs() < 1e-9);
//!
//! let raw = calibration.real_to_raw(real);
//! assert!((raw.y - 110.0).abs() < 1e-9);
//! ```
//!
//! ## Listening for changes
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//! use kinemark_calibration::{CalibrationChange, CoordinateCalibration};
//!
//! let mut calibration = CoordinateCalibration::new();
//! let stale = Rc::new(Cell::new(false));
//! let flag = stale.clone();
//! calibration.subscribe(move |_, event| {
//!     if event.changed.contains(CalibrationChange::SCALE) {
//!         flag.set(true);
//!     }
//! });
//!
//! calibration.set_scale(0.01, 0.01).unwrap();
//! assert!(stale.get());
//! ```
//!
//! ## Persistence
//!
//! [`CoordinateCalibration::save`] and [`CoordinateCalibration::restore`]
//! exchange state through a [`kinemark_persist::FlatMap`] using the names in
//! [`keys`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod calibration;
mod error;
mod event;
mod params;
mod persist;

pub use calibration::CoordinateCalibration;
pub use error::CalibrationError;
pub use event::{CalibrationChange, CalibrationEvent};
pub use params::{CalibrationParams, angle_between};
pub use persist::keys;

pub use kinemark_notify::SubscriptionId;
