//! Single-value reactive cells.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    sender: watch::Sender<Arc<T>>,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T> Shared<T> {
    fn remove(&self, id: u64) {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

/// A reactive cell holding one value.
///
/// Values are replaced whole; readers always observe either the previous or
/// the new value. Listeners run synchronously on the thread that calls
/// [`set`](Self::set), after the new value is visible to [`get`](Self::get).
pub struct Container<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Send + Sync + 'static> Container<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self {
            shared: Arc::new(Shared {
                sender,
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> Arc<T> {
        self.shared.sender.borrow().clone()
    }

    /// Replaces the value and notifies every listener.
    pub fn set(&self, value: T) {
        let value = Arc::new(value);
        self.shared.sender.send_replace(value.clone());

        // Snapshot so listeners may unsubscribe while being notified.
        let listeners: Vec<Listener<T>> = self
            .shared
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(value.as_ref());
        }
    }

    /// Registers a listener called with each replacement value.
    ///
    /// The listener stays registered until the returned guard is dropped or
    /// [`Subscription::unsubscribe`] is called.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(listener)));

        let shared: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.remove(id);
            }
        })
    }

    /// Async receiver that observes the latest value.
    pub fn watch(&self) -> watch::Receiver<Arc<T>> {
        self.shared.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl<T: Default + Send + Sync + 'static> Default for Container<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Guard returned by [`Container::subscribe`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Removes the listener now.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
