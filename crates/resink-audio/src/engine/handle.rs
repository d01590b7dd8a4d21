use std::sync::Arc;
use std::thread::JoinHandle;

use resink_runtime::run_loop::LoopHandle;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::engine::Event;
use crate::error::EngineError;
use crate::infra::event_hub::EventHub;
use crate::worker::SinkWorker;
use crate::worker::messages::ShutdownMessage;

/// Owning controller-side handle to one sink worker.
///
/// The handle is move-only and the only way to reach the worker: stop
/// requests and notifications flow through it, and the worker's internal
/// state is never touched directly. Dropping the handle posts a
/// best-effort shutdown so an abandoned worker still winds down.
pub struct EngineHandle {
    worker: LoopHandle<SinkWorker>,
    events: Arc<EventHub>,
    join: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub(crate) fn new(
        worker: LoopHandle<SinkWorker>,
        events: Arc<EventHub>,
        join: JoinHandle<()>,
    ) -> Self {
        Self {
            worker,
            events,
            join: Some(join),
        }
    }

    /// Subscribes to worker notifications.
    ///
    /// Events arrive from the worker thread; consumers marshal them onto
    /// their own threads as needed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Posts a teardown request and returns immediately.
    ///
    /// Idempotent: once the worker is past Running the request is a
    /// no-op. [`EngineError::QueueClosed`] reports a post that arrived
    /// after the queue was torn down — the worker is already gone, so the
    /// caller may treat it as success.
    pub fn request_stop(&self) -> Result<(), EngineError> {
        self.worker
            .post(ShutdownMessage)
            .map_err(|_| EngineError::QueueClosed)
    }

    /// Blocks until the worker thread has fully exited. Idempotent.
    pub fn join(&mut self) -> Result<(), EngineError> {
        let Some(join) = self.join.take() else {
            return Ok(());
        };
        join.join().map_err(|_| EngineError::WorkerPanicked)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        if self.join.is_none() {
            return;
        }
        // Post destroy, then release: the worker finishes teardown on its
        // own thread and nobody waits on it here.
        if self.request_stop().is_ok() {
            debug!("shutdown posted from handle drop");
        }
    }
}
