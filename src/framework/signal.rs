//! # Signals & Subscriptions
//!
//! A [`Signal<E>`] is a single-threaded list of callbacks. Emitting a signal calls every
//! live callback in registration order with a reference to the event.
//!
//! Callbacks are stored as `Weak` references. The strong reference lives in the
//! [`Subscription`] returned by [`Signal::subscribe`], so dropping the subscription is all it
//! takes to disconnect. Dead entries are pruned on the next emit or subscribe.
//!
//! Emitting never holds a borrow while callbacks run, which means a callback may subscribe,
//! emit, or mutate the object that owns the signal.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<E> = Rc<dyn Fn(&E)>;
type CallbackWeak<E> = Weak<dyn Fn(&E)>;

/// A list of callbacks invoked with `&E` on every [`emit`](Signal::emit).
///
/// Cloning a `Signal` yields a handle to the **same** callback list.
pub struct Signal<E> {
    slots: Rc<RefCell<Vec<CallbackWeak<E>>>>,
}

impl<E> Clone for Signal<E> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E: 'static> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("live_subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<E: 'static> Signal<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback`. It stays connected for as long as the returned
    /// [`Subscription`] is alive.
    #[must_use = "dropping the Subscription disconnects the callback immediately"]
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: CallbackRc<E> = Rc::new(callback);
        let mut slots = self.slots.borrow_mut();
        slots.retain(|w| w.strong_count() > 0);
        slots.push(Rc::downgrade(&strong));
        drop(slots);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Calls every live callback with `event`, in registration order.
    pub fn emit(&self, event: &E) {
        let callbacks: Vec<CallbackRc<E>> = {
            let mut slots = self.slots.borrow_mut();
            slots.retain(|w| w.strong_count() > 0);
            slots.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in &callbacks {
            callback(event);
        }
    }

    /// Number of callbacks whose [`Subscription`] is still alive.
    pub fn subscriber_count(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Forgets every registered callback, even those whose subscription is still held.
    pub fn disconnect_all(&self) {
        self.slots.borrow_mut().clear();
    }
}

/// RAII guard for a callback registered on a [`Signal`].
///
/// Dropping it drops the only strong reference to the callback, so the signal's weak entry
/// no longer upgrades.
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
