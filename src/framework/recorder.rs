//! # Event Recorder
//!
//! Utilities for observing a list in tests and demos.
//!
//! [`EventRecorder::attach`] subscribes to any [`ListModel`] and keeps every
//! [`ModelEvent`] it sees, in order, until you [`take`](EventRecorder::take) them.
//!
//! ```rust,ignore
//! let recorder = EventRecorder::attach(&list);
//! list.append(record);
//! assert_eq!(
//!     recorder.take(),
//!     vec![ModelEvent::RowsInserted(0..1), ModelEvent::CountChanged(1)]
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::framework::list::ModelEvent;
use crate::framework::model::ListModel;
use crate::framework::signal::Subscription;

/// Records the events of one list for as long as it is alive.
#[derive(Debug)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<ModelEvent>>>,
    _subscription: Subscription,
}

impl EventRecorder {
    pub fn attach<L: ListModel + ?Sized>(model: &L) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let subscription = model.subscribe(Box::new(move |event: &ModelEvent| {
            sink.borrow_mut().push(event.clone());
        }));
        Self {
            events,
            _subscription: subscription,
        }
    }

    /// Returns and forgets everything recorded so far.
    pub fn take(&self) -> Vec<ModelEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Number of `DataChanged` events recorded so far.
    pub fn data_changes(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, ModelEvent::DataChanged { .. }))
            .count()
    }
}
