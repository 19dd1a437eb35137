// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Which collection(s) a subscriber watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Projects,
    Transactions,
    All,
}

impl Scope {
    fn covers(self, event: Scope) -> bool {
        self == Scope::All || event == Scope::All || self == event
    }
}

struct Entry {
    id: u64,
    scope: Scope,
    callback: Arc<dyn Fn() + Send + Sync>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Fan-out point for "something changed" signals. Callbacks carry no
/// payload: a notification means "data may have changed, refetch", never a
/// diff. Rapid successive changes may each fire; subscribers coalesce.
#[derive(Clone, Default)]
pub struct ChangeBus {
    registry: Arc<Mutex<Registry>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        ChangeBus::default()
    }

    /// Register a callback for changes within `scope`. The returned handle
    /// owns the registration: dropping it (or calling `cancel`) removes the
    /// callback. Any number of subscriptions may be active at once.
    pub fn subscribe<F>(&self, scope: Scope, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut reg = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = reg.next_id;
        reg.next_id += 1;
        reg.entries.push(Entry {
            id,
            scope,
            callback: Arc::new(callback),
        });
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Invoke every subscriber covering `event`. Callbacks run outside the
    /// registry lock and must not re-enter the database connection.
    pub fn notify(&self, event: Scope) {
        let callbacks: Vec<Arc<dyn Fn() + Send + Sync>> = {
            let reg = self
                .registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            reg.entries
                .iter()
                .filter(|e| e.scope.covers(event))
                .map(|e| e.callback.clone())
                .collect()
        };
        for cb in callbacks {
            cb();
        }
    }
}

/// Handle for one registered callback; scoped-resource style, released on
/// drop so a torn-down view can never be called back.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut reg) = registry.lock() {
                reg.entries.retain(|e| e.id != self.id);
            }
        }
    }
}
