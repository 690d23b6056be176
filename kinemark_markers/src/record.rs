// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Frame or run identifier a marker belongs to.
pub type MarkerId = i64;

/// A tagged position for one frame or run.
///
/// The coordinate space of `position` is decided by whoever owns the store:
/// tagging stores usually hold real-world positions, calibration stores hold
/// raw ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerRecord {
    /// Unique key within a store; also the sort key.
    pub id: MarkerId,
    /// Tagged position.
    pub position: Point,
}

impl MarkerRecord {
    /// Creates a record.
    #[must_use]
    pub const fn new(id: MarkerId, position: Point) -> Self {
        Self { id, position }
    }
}
