// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;
use alloc::vec::Vec;

use kinemark_persist::{FlatError, FlatMap};
use kurbo::{Point, Vec2};

use crate::error::MarkerError;
use crate::record::MarkerRecord;
use crate::store::MarkerStore;

/// Keys written by [`MarkerStore::save`].
pub mod keys {
    /// Int array of marker ids.
    pub const IDS: &str = "ids";
    /// Float array of x coordinates, parallel to [`IDS`].
    pub const X: &str = "x";
    /// Float array of y coordinates, parallel to [`IDS`].
    pub const Y: &str = "y";
    /// Selected index, `-1` for none.
    pub const SELECTED: &str = "selected";
    /// Advisory x bound; absent when no bounds are set.
    pub const MAX_RANGE_X: &str = "max_range_x";
    /// Advisory y bound; absent when no bounds are set.
    pub const MAX_RANGE_Y: &str = "max_range_y";
}

impl MarkerStore {
    /// Writes records, selection and bounds into `map`.
    pub fn save(&self, map: &mut FlatMap) {
        map.insert(keys::IDS, self.ids().collect::<Vec<_>>());
        map.insert(keys::X, self.iter().map(|r| r.position.x).collect::<Vec<_>>());
        map.insert(keys::Y, self.iter().map(|r| r.position.y).collect::<Vec<_>>());
        let selected = self
            .selected()
            .and_then(|idx| i64::try_from(idx).ok())
            .unwrap_or(-1);
        map.insert(keys::SELECTED, selected);
        match self.max_range() {
            Some(range) => {
                map.insert(keys::MAX_RANGE_X, range.x);
                map.insert(keys::MAX_RANGE_Y, range.y);
            }
            None => {
                map.remove(keys::MAX_RANGE_X);
                map.remove(keys::MAX_RANGE_Y);
            }
        }
    }

    /// Replaces the store's state with what `map` holds.
    ///
    /// - The `ids`, `x` and `y` arrays travel together: if `ids` is missing
    ///   the current records are kept; if it is present, `x` and `y` must be
    ///   present with the same length.
    /// - Ids need not be sorted. Repeated ids keep their first occurrence.
    /// - A missing `selected` keeps the currently selected marker if its id
    ///   survives the restore, and clears the selection otherwise. A negative
    ///   or out-of-range `selected` clears it.
    /// - Missing bounds keep the current bounds.
    ///
    /// On error nothing changes. Otherwise listeners receive one
    /// [`MarkerEvent::AllChanged`](crate::MarkerEvent::AllChanged).
    pub fn restore(&mut self, map: &FlatMap) -> Result<(), MarkerError> {
        let records = match map.get_i64_array(keys::IDS)? {
            None => self.records().to_vec(),
            Some(ids) => {
                let xs = parallel(map, keys::X, ids.len())?;
                let ys = parallel(map, keys::Y, ids.len())?;
                let mut records: Vec<MarkerRecord> = Vec::with_capacity(ids.len());
                for ((&id, &x), &y) in ids.iter().zip(xs).zip(ys) {
                    match records.binary_search_by_key(&id, |r| r.id) {
                        Ok(_) => log::warn!("restore: skipping repeated marker id {id}"),
                        Err(at) => records.insert(at, MarkerRecord::new(id, Point::new(x, y))),
                    }
                }
                records
            }
        };

        let replaced = map.contains_key(keys::IDS);
        let selected = match map.get_i64(keys::SELECTED)? {
            // The old index means nothing in a new record list; follow the id.
            None if replaced => self
                .selected_record()
                .and_then(|current| records.binary_search_by_key(&current.id, |r| r.id).ok()),
            None => self.selected(),
            Some(raw) => usize::try_from(raw).ok(),
        };

        let range_x = map.get_f64(keys::MAX_RANGE_X)?;
        let range_y = map.get_f64(keys::MAX_RANGE_Y)?;
        let max_range = match (range_x, range_y, self.max_range()) {
            (None, None, current) => current,
            (x, y, current) => {
                let current = current.unwrap_or(Vec2::ZERO);
                Some(Vec2::new(x.unwrap_or(current.x), y.unwrap_or(current.y)))
            }
        };

        self.set_max_range(max_range);
        self.replace_all(records, selected);
        Ok(())
    }
}

fn parallel<'a>(map: &'a FlatMap, key: &str, expected: usize) -> Result<&'a [f64], FlatError> {
    let values = map.get_f64_array(key)?.unwrap_or(&[]);
    if values.len() == expected {
        Ok(values)
    } else {
        Err(FlatError::LengthMismatch {
            key: key.to_string(),
            expected,
            found: values.len(),
        })
    }
}
