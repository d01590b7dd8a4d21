//! Sink worker state machine and its periodic tick source.
//!
//! # Role
//!
//! The worker is the run-loop state for one dedicated thread. It owns the
//! sink slot exclusively and reacts to three tasks: arming the ticker,
//! replacing the sink on a tick, and tearing itself down on a shutdown
//! request.
//!
//! # Design Notes
//!
//! - Ticks and teardown share one FIFO queue, so their relative order is
//!   exactly their post order and neither can overlap the other. A
//!   replacement in flight always finishes before a queued teardown runs.
//! - Teardown is state-gated and exactly-once; a tick dequeued after
//!   teardown began is dropped instead of touching the cleared slot.
//! - Handlers never pump the queue. Teardown releases the sink and lets
//!   the loop exit; it does not wait on anything that would require
//!   processing further tasks.

pub(crate) mod handlers;
pub(crate) mod messages;
pub(crate) mod ticker;

use std::sync::Arc;

use tracing::info;

use crate::config::engine::{Event, WorkerLifecycle};
use crate::infra::event_hub::EventHub;
use crate::sink::SinkFactory;
use crate::slot::SinkSlot;
use crate::worker::ticker::Ticker;

pub(crate) struct SinkWorker {
    slot: SinkSlot,
    factory: Box<dyn SinkFactory>,
    events: Arc<EventHub>,
    lifecycle: WorkerLifecycle,
    ticker: Option<Ticker>,
}

impl SinkWorker {
    pub(crate) fn new(factory: Box<dyn SinkFactory>, events: Arc<EventHub>) -> Self {
        Self {
            slot: SinkSlot::new(),
            factory,
            events,
            lifecycle: WorkerLifecycle::Created,
            ticker: None,
        }
    }

    /// Exactly-once teardown: stop tick posting, release the sink, report.
    ///
    /// Runs from the shutdown handler in the normal flow, and from `Drop`
    /// as a backstop when the loop exits without one (mailbox closed,
    /// handler panic), so the slot is always released and
    /// `WorkerDestroyed` still fires exactly once.
    pub(crate) fn ensure_teardown(&mut self) {
        if self.lifecycle == WorkerLifecycle::Destroyed {
            return;
        }
        self.lifecycle = WorkerLifecycle::Destroying;
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.slot.clear(&self.events);
        self.lifecycle = WorkerLifecycle::Destroyed;
        self.events.emit(Event::WorkerDestroyed);
        info!("sink worker destroyed");
    }
}

impl Drop for SinkWorker {
    fn drop(&mut self) {
        self.ensure_teardown();
    }
}
