use std::sync::Arc;

use resink_runtime::run_loop::spawn_loop_named;

use crate::config::engine::EngineConfig;
use crate::engine::handle::EngineHandle;
use crate::error::EngineError;
use crate::infra::event_hub::EventHub;
use crate::sink::SinkFactory;
use crate::worker::SinkWorker;
use crate::worker::messages::{ArmTickerMessage, ShutdownMessage};
use crate::worker::ticker::Ticker;

pub(crate) fn start_engine(factory: Box<dyn SinkFactory>) -> Result<EngineHandle, EngineError> {
    start_engine_with_config(factory, EngineConfig::default())
}

pub(crate) fn start_engine_with_config(
    factory: Box<dyn SinkFactory>,
    config: EngineConfig,
) -> Result<EngineHandle, EngineError> {
    let events = Arc::new(EventHub::new(config.event_capacity));
    let worker = SinkWorker::new(factory, Arc::clone(&events));
    let (worker_ref, join) = spawn_loop_named(worker, "resink-sink-worker")
        .map_err(|source| EngineError::SpawnWorker { source })?;

    let ticker = Ticker::start(worker_ref.clone(), config.tick_interval)
        .map_err(|source| EngineError::SpawnTicker { source })?;

    if let Err(error) = worker_ref.call(ArmTickerMessage { ticker }, config.command_timeout) {
        // Arming failed; wind the already-running worker thread down.
        let _ = worker_ref.post(ShutdownMessage);
        return Err(EngineError::from_call_error(
            "arm_ticker",
            config.command_timeout,
            error,
        ));
    }

    Ok(EngineHandle::new(worker_ref, events, join))
}
