use resink_runtime::run_loop::Message;

use crate::worker::ticker::Ticker;

/// Installs the periodic tick source and moves the worker to Running.
pub(crate) struct ArmTickerMessage {
    pub(crate) ticker: Ticker,
}

impl Message for ArmTickerMessage {
    type Response = ();
}

/// Requests one sink replacement cycle.
pub(crate) struct TickMessage;

impl Message for TickMessage {
    type Response = ();
}

/// Requests worker teardown. Idempotent; later requests are no-ops.
pub(crate) struct ShutdownMessage;

impl Message for ShutdownMessage {
    type Response = ();
}
