use resink_runtime::run_loop::{Handler, LoopContext};
use tracing::debug;

use crate::config::engine::WorkerLifecycle;
use crate::worker::SinkWorker;
use crate::worker::messages::ShutdownMessage;

impl Handler<ShutdownMessage> for SinkWorker {
    fn handle(&mut self, _message: ShutdownMessage, ctx: &mut LoopContext<Self>) {
        if self.lifecycle == WorkerLifecycle::Destroyed {
            debug!("duplicate shutdown request ignored");
        } else {
            self.ensure_teardown();
        }
        ctx.request_exit();
    }
}
