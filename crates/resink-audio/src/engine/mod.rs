mod handle;
mod startup;

pub use handle::EngineHandle;

/// Spawns the sink worker thread with default configuration.
pub fn start_engine(
    factory: Box<dyn crate::sink::SinkFactory>,
) -> Result<EngineHandle, crate::error::EngineError> {
    startup::start_engine(factory)
}

pub fn start_engine_with_config(
    factory: Box<dyn crate::sink::SinkFactory>,
    config: crate::config::engine::EngineConfig,
) -> Result<EngineHandle, crate::error::EngineError> {
    startup::start_engine_with_config(factory, config)
}
