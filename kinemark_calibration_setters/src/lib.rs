// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinemark Calibration Setters: derive a calibration from reference markers.
//!
//! Rather than typing numbers, users calibrate by dragging a few dedicated
//! markers on the video frame. Each setter here watches one such
//! [`MarkerStore`](kinemark_markers::MarkerStore) and pushes derived values into
//! a shared [`CoordinateCalibration`](kinemark_calibration::CoordinateCalibration)
//! every time the markers are added, removed or moved:
//!
//! - [`LengthCalibrationSetter`]: two markers spanning a known real length set
//!   an isotropic scale.
//! - [`OriginCalibrationSetter`]: an origin marker and an x-axis marker (plus
//!   an optional y-axis marker) set the origin and axis angle.
//!
//! Selection changes never trigger a recalibration. When the markers cannot
//! define a value (wrong count, coincident points, no reference length yet)
//! the calibration keeps its previous parameters; calling `recalibrate`
//! directly reports why as a [`SkipReason`].
//!
//! ## Wiring
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use kurbo::Point;
//! use kinemark_calibration::CoordinateCalibration;
//! use kinemark_calibration_setters::{
//!     AxisLayout, LengthCalibrationSetter, OriginCalibrationSetter,
//! };
//! use kinemark_markers::MarkerStore;
//!
//! let calibration = Rc::new(RefCell::new(CoordinateCalibration::new()));
//!
//! let mut scale_markers = MarkerStore::new();
//! let length = LengthCalibrationSetter::attach(&mut scale_markers, calibration.clone());
//! LengthCalibrationSetter::seed_markers(&mut scale_markers, Point::new(200.0, 300.0), 50.0)
//!     .unwrap();
//! length.set_calibration_value(1.0, &scale_markers).unwrap();
//!
//! let mut origin_markers = MarkerStore::new();
//! let _origin = OriginCalibrationSetter::attach(
//!     &mut origin_markers,
//!     calibration.clone(),
//!     AxisLayout::OriginAndXAxis,
//! );
//! OriginCalibrationSetter::seed_markers(
//!     &mut origin_markers,
//!     AxisLayout::OriginAndXAxis,
//!     Point::new(100.0, 100.0),
//!     40.0,
//! )
//! .unwrap();
//!
//! // 100 raw units are one real unit, measured from (100, 100).
//! let real = calibration.borrow().raw_to_real(Point::new(200.0, 100.0));
//! assert!((real.x - 1.0).abs() < 1e-12);
//! assert!(real.y.abs() < 1e-12);
//! ```
//!
//! Setters keep their state behind a weak reference in the store's listener,
//! so dropping a setter without [`detach`](LengthCalibrationSetter::detach)
//! leaves an inert listener behind rather than a dangling one.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attach;
mod length;
mod origin;
mod outcome;

pub use length::{LENGTH_MARKER_COUNT, LengthCalibrationSetter};
pub use origin::{AxisLayout, OriginCalibrationSetter};
pub use outcome::{RecalibrationOutcome, SetterError, SkipReason};
