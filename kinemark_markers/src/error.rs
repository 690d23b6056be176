// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kinemark_persist::FlatError;

use crate::record::MarkerId;

/// Errors reported by [`MarkerStore`](crate::MarkerStore).
///
/// A call that returns an error has not mutated the store or notified
/// anyone.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    /// A record with this id is already stored.
    #[error("marker id {0} is already present")]
    DuplicateId(MarkerId),
    /// No record has this id.
    #[error("no marker with id {0}")]
    UnknownId(MarkerId),
    /// An index was not smaller than the number of records.
    #[error("marker index {index} out of range for {len} markers")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of records at the time of the call.
        len: usize,
    },
    /// Saved state could not be read.
    #[error(transparent)]
    Persist(#[from] FlatError),
}
