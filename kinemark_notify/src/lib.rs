// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinemark Notify: an ordered listener registry with subscription handles.
//!
//! Models in Kinemark (marker stores, coordinate calibrations) broadcast
//! change events to any number of dependents. [`Listeners`] is the small
//! registry they share:
//!
//! - Listeners are boxed `FnMut(&S, &E)` closures, where `S` is the emitting
//!   model and `E` its event type.
//! - [`Listeners::subscribe`] returns a [`SubscriptionId`]; passing it to
//!   [`Listeners::unsubscribe`] is the only way to deregister.
//! - Listeners are invoked in registration order. Subscribing the same
//!   closure twice registers it twice.
//! - [`Listeners::subscribe_until`] registers a listener that removes itself
//!   by returning [`ControlFlow::Break`](core::ops::ControlFlow::Break).
//!
//! Listeners only ever see a shared reference to the source, so a listener
//! cannot mutate the model that is notifying it. The emitting model moves the
//! registry out of itself for the duration of the call so that it can lend
//! `&self` to every listener:
//!
//! ```rust
//! use kinemark_notify::Listeners;
//!
//! #[derive(Default)]
//! struct Counter {
//!     value: u32,
//!     listeners: Listeners<Counter, u32>,
//! }
//!
//! impl Counter {
//!     fn bump(&mut self) {
//!         self.value += 1;
//!         let mut listeners = core::mem::take(&mut self.listeners);
//!         listeners.emit(self, &self.value);
//!         self.listeners = listeners;
//!     }
//! }
//!
//! let seen = std::rc::Rc::new(std::cell::Cell::new(0));
//! let mut counter = Counter::default();
//! let sink = seen.clone();
//! let id = counter.listeners.subscribe(move |c: &Counter, v: &u32| {
//!     assert_eq!(c.value, *v);
//!     sink.set(*v);
//! });
//!
//! counter.bump();
//! assert_eq!(seen.get(), 1);
//!
//! assert!(counter.listeners.unsubscribe(id));
//! counter.bump();
//! assert_eq!(seen.get(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;
use core::ops::ControlFlow;

use smallvec::SmallVec;

/// Handle returned by [`Listeners::subscribe`].
///
/// Ids are unique within one registry for its whole lifetime; they are never
/// reused after an unsubscribe.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw value of this id.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubscriptionId").field(&self.0).finish()
    }
}

/// A boxed listener callback receiving the emitting source and the event.
pub type Listener<S, E> = Box<dyn FnMut(&S, &E)>;

/// A boxed listener that asks to be removed by returning
/// [`ControlFlow::Break`].
pub type PruningListener<S, E> = Box<dyn FnMut(&S, &E) -> ControlFlow<()>>;

enum Callback<S: ?Sized, E> {
    Always(Listener<S, E>),
    Pruning(PruningListener<S, E>),
}

/// Ordered registry of listeners for events of type `E` emitted by `S`.
pub struct Listeners<S: ?Sized, E> {
    // Most models have one or two dependents (a painter and a graph, or a
    // single calibration setter).
    entries: SmallVec<[(SubscriptionId, Callback<S, E>); 2]>,
    next_id: u64,
}

impl<S: ?Sized, E> Listeners<S, E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Registers `listener` after all existing listeners.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&S, &E) + 'static,
    {
        self.push(Callback::Always(Box::new(listener)))
    }

    /// Registers `listener` after all existing listeners; it stays registered
    /// until it returns [`ControlFlow::Break`] or is unsubscribed.
    ///
    /// Use this for listeners that hold weak references to their owner, so
    /// that a dropped owner does not leave an entry behind.
    pub fn subscribe_until<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&S, &E) -> ControlFlow<()> + 'static,
    {
        self.push(Callback::Pruning(Box::new(listener)))
    }

    fn push(&mut self, callback: Callback<S, E>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Removes the listener registered under `id`.
    ///
    /// Returns `false` if `id` is unknown or was already removed. The relative
    /// order of the remaining listeners is preserved.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(idx) => {
                drop(self.entries.remove(idx));
                true
            }
            None => false,
        }
    }

    /// Returns `true` if a listener is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Calls every listener, in registration order, with `source` and `event`.
    ///
    /// Listeners registered with [`subscribe_until`](Self::subscribe_until)
    /// that return [`ControlFlow::Break`] are removed afterwards.
    pub fn emit(&mut self, source: &S, event: &E) {
        self.entries.retain(|(_, callback)| match callback {
            Callback::Always(listener) => {
                listener(source, event);
                true
            }
            Callback::Pruning(listener) => listener(source, event).is_continue(),
        });
    }
}

impl<S: ?Sized, E> Default for Listeners<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, E> fmt::Debug for Listeners<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: SmallVec<[SubscriptionId; 2]> = self.entries.iter().map(|(id, _)| *id).collect();
        f.debug_struct("Listeners")
            .field("subscriptions", &ids)
            .field("next_id", &self.next_id)
            .finish()
    }
}
