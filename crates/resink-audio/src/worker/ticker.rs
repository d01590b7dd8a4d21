use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Sender;
use resink_runtime::run_loop::LoopHandle;
use tracing::{debug, trace};

use crate::worker::SinkWorker;
use crate::worker::messages::TickMessage;

/// Periodic tick source for one sink worker.
///
/// Runs on its own named thread and posts [`TickMessage`] into the
/// worker's task queue at a fixed cadence. [`Ticker::cancel`] is
/// synchronous: once it returns, no further tick is posted, though one may
/// already sit in the queue ahead of the caller — the worker's state
/// gating rejects it.
pub(crate) struct Ticker {
    armed: Arc<AtomicBool>,
    stop_tx: Sender<()>,
    join: Option<JoinHandle<()>>,
}

impl Ticker {
    pub(crate) fn start(worker: LoopHandle<SinkWorker>, interval: Duration) -> io::Result<Self> {
        let armed = Arc::new(AtomicBool::new(true));
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let armed_for_thread = Arc::clone(&armed);
        let join = std::thread::Builder::new()
            .name("resink-ticker".to_string())
            .spawn(move || {
                let ticks = crossbeam_channel::tick(interval);
                loop {
                    crossbeam_channel::select_biased! {
                        recv(stop_rx) -> _ => break,
                        recv(ticks) -> _ => {
                            if !armed_for_thread.load(Ordering::Acquire) {
                                break;
                            }
                            if worker.post(TickMessage).is_err() {
                                debug!("worker queue closed, ticker exiting");
                                break;
                            }
                            trace!("tick posted");
                        }
                    }
                }
            })?;
        Ok(Self {
            armed,
            stop_tx,
            join: Some(join),
        })
    }

    /// Stops tick posting and waits for the ticker thread to exit.
    ///
    /// Posting into the queue never blocks, so the ticker thread always
    /// reaches the stop signal promptly and this join stays short.
    pub(crate) fn cancel(&mut self) {
        self.armed.store(false, Ordering::Release);
        let _ = self.stop_tx.try_send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
