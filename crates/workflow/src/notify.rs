//! Change notification hook for the excluded UI layer.
//!
//! The original application pushed state through reactive subjects; here the
//! UI subscribes a callback instead. Events are fired after a mutation has
//! been persisted, and correctness never depends on any subscriber reacting.

use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

/// A state change another layer may want to re-render on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    CollectionChanged { id: Uuid },
    PointsChanged { user_id: Uuid },
    VoucherIssued { number: String },
}

type Listener = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Registry of change listeners.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Mutex<Vec<Listener>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener invoked on every subsequent event.
    pub fn subscribe(&self, listener: Listener) {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.push(listener);
    }

    /// Delivers an event to every listener, in subscription order.
    pub fn emit(&self, event: &ChangeEvent) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_subscribers_receive_events() {
        let notifier = ChangeNotifier::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = seen.clone();
        notifier.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let id = Uuid::new_v4();
        notifier.emit(&ChangeEvent::CollectionChanged { id });
        notifier.emit(&ChangeEvent::PointsChanged { user_id: id });

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emit_without_subscribers_is_a_no_op() {
        let notifier = ChangeNotifier::new();
        notifier.emit(&ChangeEvent::VoucherIssued {
            number: "RH-00000000-0000".to_string(),
        });
    }
}
