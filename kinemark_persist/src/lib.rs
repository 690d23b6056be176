// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinemark Persist: flat key/value maps of primitive fields.
//!
//! Kinemark models do not own a file format. Instead each model can write its
//! state into a [`FlatMap`], a string-keyed map of [`FlatValue`] primitives
//! (booleans, integers, floats and arrays of those), and read it back later.
//! How the map is stored (an app bundle, JSON, a database row) is up to the
//! caller.
//!
//! Readers are expected to be tolerant: a missing key means "keep whatever is
//! there now", while a key holding the wrong kind of value is an error. The
//! typed getters on [`FlatMap`] encode that policy by returning
//! `Result<Option<_>, FlatError>`.
//!
//! ```rust
//! use kinemark_persist::{FlatError, FlatKind, FlatMap};
//!
//! let mut map = FlatMap::new();
//! map.insert("x_scale", 2.5);
//! map.insert("ids", vec![1_i64, 2, 3]);
//! map.insert("swap_axes", true);
//!
//! assert_eq!(map.get_f64("x_scale"), Ok(Some(2.5)));
//! assert_eq!(map.get_f64("y_scale"), Ok(None));
//! assert_eq!(map.get_i64_array("ids"), Ok(Some(&[1_i64, 2, 3][..])));
//! assert!(matches!(
//!     map.get_f64("swap_axes"),
//!     Err(FlatError::TypeMismatch { expected: FlatKind::Float, found: FlatKind::Bool, .. })
//! ));
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize` and `Deserialize` for [`FlatMap`] and
//!   [`FlatValue`]. A map serializes as a plain object keyed by field name.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod map;
mod value;

pub use map::{FlatError, FlatMap};
pub use value::{FlatKind, FlatValue};
