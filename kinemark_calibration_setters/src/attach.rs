// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::RefCell;
use core::ops::ControlFlow;

use kinemark_markers::{MarkerStore, SubscriptionId};

use crate::outcome::Recalibrate;

/// Subscribes `state` to content changes of `markers`.
///
/// The listener holds only a weak reference. Once the setter is dropped, the
/// next event of any kind unregisters it.
pub(crate) fn subscribe<S>(state: &Rc<RefCell<S>>, markers: &mut MarkerStore) -> SubscriptionId
where
    S: Recalibrate + 'static,
{
    let weak = Rc::downgrade(state);
    markers.subscribe_until(move |markers, event| {
        let Some(state) = weak.upgrade() else {
            return ControlFlow::Break(());
        };
        if event.affects_content() {
            state.borrow().recalibrate(markers);
        }
        ControlFlow::Continue(())
    })
}
