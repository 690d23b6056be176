// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kinemark_markers::MarkerStore;

/// Result of one recalibration attempt.
///
/// Skips are normal while the user is still placing markers; the calibration
/// simply keeps its previous parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecalibrationOutcome {
    /// Derived parameters were pushed into the calibration.
    Applied,
    /// Nothing was pushed.
    Skipped(SkipReason),
}

impl RecalibrationOutcome {
    /// Returns `true` for [`RecalibrationOutcome::Applied`].
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why a recalibration left the calibration untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The store does not hold exactly the number of markers required.
    MarkerCount {
        /// Markers the setter needs.
        expected: usize,
        /// Markers currently stored.
        found: usize,
    },
    /// No real-world reference length has been set yet.
    NoCalibrationValue,
    /// The reference markers coincide, or the derived values are not finite.
    DegenerateMarkers,
    /// The calibration was already borrowed, which happens when a
    /// recalibration is triggered from inside a calibration listener.
    CalibrationBusy,
}

/// Errors reported by the calibration setters.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum SetterError {
    /// The real-world reference length must be finite and positive.
    #[error("calibration value must be finite and positive, got {0}")]
    InvalidCalibrationValue(f64),
}

/// Derives calibration parameters from the setter's marker store.
pub(crate) trait Recalibrate {
    fn recalibrate(&self, markers: &MarkerStore) -> RecalibrationOutcome;
}
