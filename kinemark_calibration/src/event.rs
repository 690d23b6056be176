// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::params::CalibrationParams;

bitflags::bitflags! {
    /// Parameter groups touched by a calibration change.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CalibrationChange: u8 {
        /// `x_scale` and/or `y_scale`.
        const SCALE     = 0b0000_0001;
        /// `origin` and/or `axis1`, and with them the axis angle.
        const ORIGIN    = 0b0000_0010;
        /// The axis swap flag.
        const SWAP_AXES = 0b0000_0100;
    }
}

/// Notification sent to calibration listeners after a change.
///
/// Listeners read the new state from the calibration they are handed;
/// `previous` is the state just before the change, which lets consumers
/// that cache real-space values reproject them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationEvent {
    /// Which parameter groups changed. Never empty.
    pub changed: CalibrationChange,
    /// Parameters in effect before the change.
    pub previous: CalibrationParams,
}
