// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;
use core::ops::ControlFlow;

use kinemark_notify::{Listeners, SubscriptionId};
use kurbo::{Point, Vec2};

use crate::error::MarkerError;
use crate::event::MarkerEvent;
use crate::record::{MarkerId, MarkerRecord};

/// An ordered collection of [`MarkerRecord`]s with unique, strictly
/// increasing ids.
///
/// Every successful mutation emits exactly one [`MarkerEvent`] to the
/// subscribed listeners before returning. Listeners get a shared reference to
/// the store, already in its post-mutation state.
///
/// Indices are only stable between mutations. Consumers that need to hold on
/// to a marker should keep its id and look it up with
/// [`MarkerStore::find_by_id`].
pub struct MarkerStore {
    records: Vec<MarkerRecord>,
    selected: Option<usize>,
    max_range: Option<Vec2>,
    listeners: Listeners<Self, MarkerEvent>,
}

impl MarkerStore {
    /// Creates an empty store with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            selected: None,
            max_range: None,
            listeners: Listeners::new(),
        }
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all records in id order.
    #[must_use]
    pub fn records(&self) -> &[MarkerRecord] {
        &self.records
    }

    /// Iterates over the records in id order.
    pub fn iter(&self) -> core::slice::Iter<'_, MarkerRecord> {
        self.records.iter()
    }

    /// Iterates over the ids in increasing order.
    pub fn ids(&self) -> impl Iterator<Item = MarkerId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    /// Returns the record at `index`.
    #[must_use]
    pub fn record_at(&self, index: usize) -> Option<&MarkerRecord> {
        self.records.get(index)
    }

    /// Returns the index of the record with `id`.
    #[must_use]
    pub fn find_by_id(&self, id: MarkerId) -> Option<usize> {
        self.records.binary_search_by_key(&id, |r| r.id).ok()
    }

    /// Returns the record with `id`.
    #[must_use]
    pub fn record_by_id(&self, id: MarkerId) -> Option<&MarkerRecord> {
        self.find_by_id(id).map(|idx| &self.records[idx])
    }

    /// Returns the selected index, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the selected record, if any.
    #[must_use]
    pub fn selected_record(&self) -> Option<&MarkerRecord> {
        self.selected.map(|idx| &self.records[idx])
    }

    /// Advisory layout bounds for consumers. Never enforced on positions.
    #[must_use]
    pub fn max_range(&self) -> Option<Vec2> {
        self.max_range
    }

    /// Sets the advisory layout bounds. Does not notify.
    pub fn set_max_range(&mut self, max_range: Option<Vec2>) {
        self.max_range = max_range;
    }

    /// Inserts `record` at its sorted position and returns that index.
    ///
    /// If a record with the same id exists, returns
    /// [`MarkerError::DuplicateId`] and leaves the store unchanged. A selected
    /// record stays selected; its index shifts if needed.
    pub fn add(&mut self, record: MarkerRecord) -> Result<usize, MarkerError> {
        let index = match self.records.binary_search_by_key(&record.id, |r| r.id) {
            Ok(_) => return Err(MarkerError::DuplicateId(record.id)),
            Err(index) => index,
        };
        self.records.insert(index, record);
        if let Some(selected) = self.selected.as_mut()
            && *selected >= index
        {
            *selected += 1;
        }
        self.emit(MarkerEvent::Added { index });
        Ok(index)
    }

    /// Shorthand for `add(MarkerRecord::new(id, position))`.
    pub fn insert(&mut self, id: MarkerId, position: Point) -> Result<usize, MarkerError> {
        self.add(MarkerRecord::new(id, position))
    }

    /// Removes and returns the record at `index`.
    ///
    /// If that record was selected the selection is cleared; a selection
    /// after it shifts down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<MarkerRecord, MarkerError> {
        self.check_index(index)?;
        let record = self.records.remove(index);
        self.selected = match self.selected {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
        self.emit(MarkerEvent::Removed { index, record });
        Ok(record)
    }

    /// Removes and returns the record with `id`.
    pub fn remove_by_id(&mut self, id: MarkerId) -> Result<MarkerRecord, MarkerError> {
        let index = self.find_by_id(id).ok_or(MarkerError::UnknownId(id))?;
        self.remove_at(index)
    }

    /// Moves the record at `index` to `position`.
    pub fn set_position(&mut self, index: usize, position: Point) -> Result<(), MarkerError> {
        self.check_index(index)?;
        self.records[index].position = position;
        self.emit(MarkerEvent::Changed { index, count: 1 });
        Ok(())
    }

    /// Selects the record at `index`, or clears the selection with `None`.
    ///
    /// Always notifies, even if the selection does not move.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), MarkerError> {
        if let Some(index) = index {
            self.check_index(index)?;
        }
        self.selected = index;
        self.emit(MarkerEvent::Selected { index });
        Ok(())
    }

    /// Removes every record and clears the selection.
    pub fn clear(&mut self) {
        self.records.clear();
        self.selected = None;
        self.emit(MarkerEvent::AllChanged);
    }

    /// Registers a listener called after every mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Self, &MarkerEvent) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Registers a listener called after every mutation until it returns
    /// [`ControlFlow::Break`].
    pub fn subscribe_until<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Self, &MarkerEvent) -> ControlFlow<()> + 'static,
    {
        self.listeners.subscribe_until(listener)
    }

    /// Removes a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replaces content and selection in one step, then emits `AllChanged`.
    ///
    /// `records` must already be sorted by strictly increasing id.
    pub(crate) fn replace_all(&mut self, records: Vec<MarkerRecord>, selected: Option<usize>) {
        debug_assert!(
            records.windows(2).all(|w| w[0].id < w[1].id),
            "replacement records must be sorted by unique id"
        );
        self.records = records;
        self.selected = selected.filter(|idx| *idx < self.records.len());
        self.emit(MarkerEvent::AllChanged);
    }

    fn check_index(&self, index: usize) -> Result<(), MarkerError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(MarkerError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    fn emit(&mut self, event: MarkerEvent) {
        log::trace!("marker store event: {event:?}");
        let mut listeners = core::mem::take(&mut self.listeners);
        listeners.emit(self, &event);
        self.listeners = listeners;
    }
}

impl Default for MarkerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MarkerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerStore")
            .field("records", &self.records)
            .field("selected", &self.selected)
            .field("max_range", &self.max_range)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a MarkerStore {
    type Item = &'a MarkerRecord;
    type IntoIter = core::slice::Iter<'a, MarkerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
