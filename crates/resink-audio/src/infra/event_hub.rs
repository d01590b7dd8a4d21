//! Broadcast fan-out for worker notifications.

use tokio::sync::broadcast;

use crate::config::engine::Event;

/// Fan-out hub for [`Event`] notifications.
///
/// Emission never blocks the worker thread: with no live subscribers the
/// event is dropped, and a subscriber that falls behind the channel
/// capacity observes a lag marker rather than stalling the emitter.
pub(crate) struct EventHub {
    tx: broadcast::Sender<Event>,
}

impl EventHub {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub(crate) fn emit(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
