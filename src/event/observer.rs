use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

type Handler<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_key: u64,
    entries: Vec<(u64, Handler<T>)>,
}

/// Single typed event stream
///
/// Handlers run synchronously in subscription order and receive the
/// payload by shared reference. A panicking handler is logged and skipped,
/// the rest of the stream still runs.
pub struct Observer<T> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> Observer<T> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners {
                next_key: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a handler; it stays registered until the returned
    /// subscription is unsubscribed or dropped
    #[must_use = "dropping the subscription unsubscribes the handler"]
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let handler: Handler<T> = Rc::new(handler);
        let key = {
            let mut listeners = self.listeners.borrow_mut();
            let key = listeners.next_key;
            listeners.next_key += 1;
            listeners.entries.push((key, handler));
            key
        };

        let weak: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.listeners);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    listeners.borrow_mut().entries.retain(|(k, _)| *k != key);
                }
            })),
        }
    }

    pub fn emit(&self, payload: T) {
        // Snapshot so handlers may (un)subscribe while we iterate
        let handlers: Vec<Handler<T>> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            let result = panic::catch_unwind(AssertUnwindSafe(|| handler(&payload)));
            if result.is_err() {
                log::error!(
                    "event handler for {} panicked, continuing with remaining handlers",
                    std::any::type_name::<T>()
                );
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

impl<T: 'static> Default for Observer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field(
                "handlers",
                &format!("<{} handlers>", self.listeners.borrow().entries.len()),
            )
            .finish()
    }
}

/// Handle to a registered handler
///
/// `unsubscribe` is idempotent. Dropping the handle unsubscribes as well.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
