// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kinemark_persist::FlatError;
use kurbo::Point;

/// Errors reported by [`CoordinateCalibration`](crate::CoordinateCalibration).
///
/// A rejected call never mutates the calibration and never notifies.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// A scale factor was zero, negative, NaN or infinite.
    #[error("scale factors must be finite and positive, got ({x_scale}, {y_scale})")]
    InvalidScale {
        /// Proposed x scale.
        x_scale: f64,
        /// Proposed y scale.
        y_scale: f64,
    },
    /// A reference point had a NaN or infinite coordinate.
    #[error("reference point {0:?} is not finite")]
    NonFinitePoint(Point),
    /// Saved state could not be read.
    #[error(transparent)]
    Persist(#[from] FlatError),
}
