use resink_runtime::run_loop::{Handler, LoopContext};
use tracing::{debug, trace, warn};

use crate::config::engine::{Event, WorkerLifecycle};
use crate::worker::SinkWorker;
use crate::worker::messages::TickMessage;

impl Handler<TickMessage> for SinkWorker {
    fn handle(&mut self, _message: TickMessage, _ctx: &mut LoopContext<Self>) {
        if self.lifecycle != WorkerLifecycle::Running {
            // One tick can already sit in the queue when cancellation
            // begins; the slot is never touched outside Running.
            debug!(state = ?self.lifecycle, "tick dropped");
            return;
        }
        trace!("sink replacement begin");
        match self.slot.replace(self.factory.as_mut(), &self.events) {
            Ok(sink_id) => trace!(%sink_id, "sink replacement end"),
            Err(error) => {
                warn!(%error, "sink creation failed, slot left empty");
                self.events.emit(Event::SinkCreateFailed {
                    message: error.to_string(),
                });
            }
        }
    }
}
