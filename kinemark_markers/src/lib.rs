// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinemark Markers: ordered marker stores with change notification.
//!
//! A *marker* is a tagged position for one video frame or experiment run,
//! keyed by an integer id. [`MarkerStore`] keeps markers sorted by strictly
//! increasing id, tracks an optional selected marker, and tells subscribed
//! listeners about every change through a single [`MarkerEvent`] enum:
//!
//! - [`MarkerEvent::Added`] after an insert,
//! - [`MarkerEvent::Removed`] after a removal (carrying the removed record),
//! - [`MarkerEvent::Changed`] after a position edit,
//! - [`MarkerEvent::AllChanged`] after a clear or restore,
//! - [`MarkerEvent::Selected`] after a selection change.
//!
//! Every event carries the index *after* the mutation and is delivered
//! synchronously, in subscription order, before the mutating call returns.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use kurbo::Point;
//! use kinemark_markers::{MarkerError, MarkerEvent, MarkerStore};
//!
//! let mut store = MarkerStore::new();
//! let events = Rc::new(RefCell::new(Vec::new()));
//! let sink = events.clone();
//! store.subscribe(move |_, event| sink.borrow_mut().push(*event));
//!
//! for id in [1, 3, 5] {
//!     store.insert(id, Point::new(id as f64, 0.0)).unwrap();
//! }
//!
//! // Ids are unique: a second marker for frame 3 is rejected.
//! assert_eq!(
//!     store.insert(3, Point::new(9.0, 9.0)),
//!     Err(MarkerError::DuplicateId(3))
//! );
//! assert_eq!(store.len(), 3);
//!
//! // Frame 4 slots in before frame 5.
//! assert_eq!(store.insert(4, Point::new(1.0, 1.0)), Ok(2));
//! assert_eq!(events.borrow().last(), Some(&MarkerEvent::Added { index: 2 }));
//! ```
//!
//! Indices are contract-checked: removing, editing or selecting past the end
//! is reported as [`MarkerError::IndexOutOfRange`] and changes nothing.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod event;
mod persist;
mod record;
mod store;

pub use error::MarkerError;
pub use event::MarkerEvent;
pub use persist::keys;
pub use record::{MarkerId, MarkerRecord};
pub use store::MarkerStore;

pub use kinemark_notify::SubscriptionId;
