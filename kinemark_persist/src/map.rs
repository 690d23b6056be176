// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::value::{FlatKind, FlatValue};

/// Error produced while reading typed values out of a [`FlatMap`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlatError {
    /// The key exists but holds a different kind of value.
    #[error("key `{key}` holds a {found} value, expected {expected}")]
    TypeMismatch {
        /// The key that was read.
        key: String,
        /// The kind the reader asked for.
        expected: FlatKind,
        /// The kind actually stored.
        found: FlatKind,
    },
    /// Parallel arrays disagree in length.
    #[error("array `{key}` has {found} entries, expected {expected}")]
    LengthMismatch {
        /// The array whose length is off.
        key: String,
        /// The length of the reference array.
        expected: usize,
        /// The length of `key`.
        found: usize,
    },
}

impl FlatError {
    fn mismatch(key: &str, expected: FlatKind, found: &FlatValue) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected,
            found: found.kind(),
        }
    }
}

/// A string-keyed map of primitive values.
///
/// Keys are kept sorted so that iteration (and any serialized form) is
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FlatMap {
    entries: BTreeMap<String, FlatValue>,
}

impl FlatMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FlatValue>) -> Option<FlatValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<FlatValue> {
        self.entries.remove(key)
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reads a boolean.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, FlatError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(FlatValue::Bool(v)) => Ok(Some(*v)),
            Some(other) => Err(FlatError::mismatch(key, FlatKind::Bool, other)),
        }
    }

    /// Reads an integer.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, FlatError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(FlatValue::Int(v)) => Ok(Some(*v)),
            Some(other) => Err(FlatError::mismatch(key, FlatKind::Int, other)),
        }
    }

    /// Reads a float. Integers are widened, since hand-edited or foreign data
    /// often writes whole numbers without a fractional part.
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, FlatError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(FlatValue::Float(v)) => Ok(Some(*v)),
            Some(FlatValue::Int(v)) => Ok(Some(*v as f64)),
            Some(other) => Err(FlatError::mismatch(key, FlatKind::Float, other)),
        }
    }

    /// Reads an integer array.
    pub fn get_i64_array(&self, key: &str) -> Result<Option<&[i64]>, FlatError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(FlatValue::IntArray(v)) => Ok(Some(v)),
            Some(other) => Err(FlatError::mismatch(key, FlatKind::IntArray, other)),
        }
    }

    /// Reads a float array.
    pub fn get_f64_array(&self, key: &str) -> Result<Option<&[f64]>, FlatError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(FlatValue::FloatArray(v)) => Ok(Some(v)),
            Some(other) => Err(FlatError::mismatch(key, FlatKind::FloatArray, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{FlatError, FlatMap};
    use crate::{FlatKind, FlatValue};

    #[test]
    fn missing_keys_read_as_none() {
        let map = FlatMap::new();
        assert_eq!(map.get_bool("a"), Ok(None));
        assert_eq!(map.get_i64("a"), Ok(None));
        assert_eq!(map.get_f64("a"), Ok(None));
        assert_eq!(map.get_i64_array("a"), Ok(None));
        assert_eq!(map.get_f64_array("a"), Ok(None));
    }

    #[test]
    fn floats_accept_integers_but_not_the_reverse() {
        let mut map = FlatMap::new();
        map.insert("whole", 3_i64);
        map.insert("frac", 0.5);
        assert_eq!(map.get_f64("whole"), Ok(Some(3.0)));
        assert_eq!(
            map.get_i64("frac"),
            Err(FlatError::TypeMismatch {
                key: "frac".into(),
                expected: FlatKind::Int,
                found: FlatKind::Float,
            })
        );
    }

    #[test]
    fn insert_replaces_and_iterates_sorted() {
        let mut map = FlatMap::new();
        assert_eq!(map.insert("b", true), None);
        map.insert("a", vec![1.0, 2.0]);
        assert_eq!(map.insert("b", false), Some(FlatValue::Bool(true)));

        let keys: vec::Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(map.len(), 2);

        assert!(map.remove("a").is_some());
        assert!(!map.contains_key("a"));
    }

    #[test]
    fn error_messages_name_the_key() {
        let mut map = FlatMap::new();
        map.insert("ids", vec![1.0_f64]);
        let err = map.get_i64_array("ids").unwrap_err();
        assert_eq!(
            alloc::format!("{err}"),
            "key `ids` holds a float array value, expected int array"
        );
    }
}
