use resink_runtime::run_loop::{Handler, LoopContext};
use tracing::debug;

use crate::config::engine::WorkerLifecycle;
use crate::worker::SinkWorker;
use crate::worker::messages::ArmTickerMessage;

impl Handler<ArmTickerMessage> for SinkWorker {
    fn handle(&mut self, message: ArmTickerMessage, _ctx: &mut LoopContext<Self>) {
        match self.lifecycle {
            WorkerLifecycle::Created => {
                self.ticker = Some(message.ticker);
                self.lifecycle = WorkerLifecycle::Running;
                debug!("ticker armed, worker running");
            }
            state => {
                // Dropping the message cancels the orphaned ticker.
                debug!(?state, "arm request ignored");
            }
        }
    }
}
