//! Exclusive owner of the current sink instance.

use tracing::trace;

use crate::config::engine::Event;
use crate::error::SinkError;
use crate::infra::event_hub::EventHub;
use crate::sink::{AudioSink, SinkFactory, SinkId};

/// Holds at most one live sink.
///
/// Only the owning worker's run-loop thread touches the slot, and at most
/// one `replace` is ever in flight; both follow from single-consumer FIFO
/// task execution, so the slot carries no synchronization of its own.
/// Destruction here is plain `drop` plus a notification; it never blocks
/// and never reaches back into any task queue.
pub(crate) struct SinkSlot {
    current: Option<Box<dyn AudioSink>>,
}

impl SinkSlot {
    pub(crate) fn new() -> Self {
        Self { current: None }
    }

    /// Destroys the held sink (if any), then constructs and stores a new
    /// one, emitting `SinkDestroyed`/`SinkCreated` around the swap.
    ///
    /// On construction failure the slot stays empty and the error is
    /// returned; the caller reports it and the next tick tries again.
    pub(crate) fn replace(
        &mut self,
        factory: &mut dyn SinkFactory,
        events: &EventHub,
    ) -> Result<SinkId, SinkError> {
        self.clear(events);
        let sink = factory.create()?;
        let sink_id = sink.id();
        self.current = Some(sink);
        events.emit(Event::SinkCreated { sink_id });
        trace!(%sink_id, "sink stored in slot");
        Ok(sink_id)
    }

    /// Destroys the held sink, if any. Clearing an empty slot is a no-op
    /// and emits nothing.
    pub(crate) fn clear(&mut self, events: &EventHub) {
        let Some(sink) = self.current.take() else {
            return;
        };
        let sink_id = sink.id();
        drop(sink);
        events.emit(Event::SinkDestroyed { sink_id });
        trace!(%sink_id, "sink destroyed");
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
