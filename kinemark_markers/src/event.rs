// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::record::MarkerRecord;

/// Change notification emitted by a [`MarkerStore`](crate::MarkerStore).
///
/// Indices refer to the store *after* the mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerEvent {
    /// A record was inserted at `index`.
    Added {
        /// Position of the new record.
        index: usize,
    },
    /// The record formerly at `index` was removed.
    Removed {
        /// Position the record occupied.
        index: usize,
        /// The removed record.
        record: MarkerRecord,
    },
    /// `count` records starting at `index` changed position.
    Changed {
        /// First changed record.
        index: usize,
        /// Number of consecutive records that changed.
        count: usize,
    },
    /// The whole content was replaced or cleared.
    AllChanged,
    /// The selection moved to `index`, or was cleared.
    Selected {
        /// Newly selected record, if any.
        index: Option<usize>,
    },
}

impl MarkerEvent {
    /// Returns `true` for events that change which records exist or where
    /// they are, as opposed to selection changes.
    #[must_use]
    pub fn affects_content(&self) -> bool {
        !matches!(self, Self::Selected { .. })
    }
}
