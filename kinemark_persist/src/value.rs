// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

/// A primitive value stored in a [`FlatMap`](crate::FlatMap).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlatValue {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// An array of signed integers, such as marker ids.
    IntArray(Vec<i64>),
    /// An array of floats, such as one coordinate of every marker.
    FloatArray(Vec<f64>),
}

impl FlatValue {
    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> FlatKind {
        match self {
            Self::Bool(_) => FlatKind::Bool,
            Self::Int(_) => FlatKind::Int,
            Self::Float(_) => FlatKind::Float,
            Self::IntArray(_) => FlatKind::IntArray,
            Self::FloatArray(_) => FlatKind::FloatArray,
        }
    }
}

/// The kind of a [`FlatValue`], without its payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FlatKind {
    /// [`FlatValue::Bool`].
    Bool,
    /// [`FlatValue::Int`].
    Int,
    /// [`FlatValue::Float`].
    Float,
    /// [`FlatValue::IntArray`].
    IntArray,
    /// [`FlatValue::FloatArray`].
    FloatArray,
}

impl fmt::Display for FlatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::IntArray => "int array",
            Self::FloatArray => "float array",
        })
    }
}

impl From<bool> for FlatValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FlatValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FlatValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<i64>> for FlatValue {
    fn from(value: Vec<i64>) -> Self {
        Self::IntArray(value)
    }
}

impl From<Vec<f64>> for FlatValue {
    fn from(value: Vec<f64>) -> Self {
        Self::FloatArray(value)
    }
}
