use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::StatusEvent;

/// Callback invoked for every published event
pub type Callback = Arc<dyn Fn(&StatusEvent) + Send + Sync>;

/// Ordered, append-only list of event callbacks
///
/// Clones share the same list. Callbacks run on a snapshot taken at publish time, so a
/// callback may subscribe further callbacks without deadlocking; those see the next
/// event onward.
#[derive(Clone, Default)]
pub struct Subscribers {
    callbacks: Arc<Mutex<Vec<Callback>>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&StatusEvent) + Send + Sync + 'static,
    {
        self.callbacks.lock().push(Arc::new(callback));
    }

    /// Deliver an event to every callback in subscription order
    pub fn publish(&self, event: &StatusEvent) {
        let snapshot: Vec<Callback> = self.callbacks.lock().clone();
        for callback in snapshot {
            callback(event);
        }
    }

    pub fn clear(&self) {
        self.callbacks.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.len())
            .finish()
    }
}
