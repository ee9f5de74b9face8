//! Change notification for the layout model and the selection tracker.
//!
//! Observers register a callback and get back a [`Subscription`] handle.
//! Dropping the handle (or calling [`Subscription::unsubscribe`]) removes
//! the callback. Callbacks run synchronously on the mutating thread, after
//! the mutation is visible, and outside the registry lock so they may
//! subscribe or unsubscribe themselves.

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::model::selection::SelectionRange;

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A new structural description was published.
    LayoutReplaced,
    /// The structural description was dropped; the model is unloaded.
    LayoutCleared,
    /// The selected byte range was replaced.
    SelectionChanged(SelectionRange),
    /// The host page granularity changed.
    PageSizeChanged(u64),
}

type Callback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Callback)>,
}

/// Callback registry owned by each notifying component.
#[derive(Default)]
pub struct ChangeNotifier {
    registry: Arc<Mutex<Registry>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to run after every change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(callback)));

        Subscription {
            registry: Arc::downgrade(&self.registry),
            id: Some(id),
        }
    }

    /// Deliver `event` to every registered callback, in registration order.
    pub fn notify(&self, event: ChangeEvent) {
        let listeners: Vec<Callback> = self
            .registry
            .lock()
            .listeners
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();

        for cb in listeners {
            cb(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle to a registered callback.
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: Option<u64>,
}

impl Subscription {
    /// Remove the callback now.
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    /// Keep the callback registered for as long as the notifier lives.
    pub fn detach(mut self) {
        self.id = None;
    }

    fn remove(&mut self) {
        let Some(id) = self.id.take() else { return };
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().listeners.retain(|(i, _)| *i != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
