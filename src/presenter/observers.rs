//! Change notification for the view layer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::sync::watch;

/// Returned by [`Presenter::on_change`](super::Presenter::on_change).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Callbacks plus a revision counter bumped on every notification.
///
/// The revision is also published on a watch channel so async views can
/// await the next change.
pub(crate) struct Observers {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(ObserverId, Rc<dyn Fn()>)>>,
    revision: watch::Sender<u64>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            next_id: Cell::new(0),
            callbacks: RefCell::new(Vec::new()),
            revision,
        }
    }

    pub(crate) fn subscribe(&self, callback: impl Fn() + 'static) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.callbacks.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    pub(crate) fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
        // Callbacks may subscribe or dispatch re-entrantly.
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    pub(crate) fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub(crate) fn changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_bumps_revision_and_calls_subscribers() {
        let observers = Observers::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        observers.subscribe(move || seen.set(seen.get() + 1));

        observers.notify();
        observers.notify();

        assert_eq!(calls.get(), 2);
        assert_eq!(observers.revision(), 2);
    }

    #[test]
    fn unsubscribe_stops_calls() {
        let observers = Observers::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let id = observers.subscribe(move || seen.set(seen.get() + 1));

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify();

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn watch_receiver_sees_latest_revision() {
        let observers = Observers::new();
        let mut changes = observers.changes();
        observers.notify();
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), 1);
    }
}
