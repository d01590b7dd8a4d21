//! Typed error enums for the engine surface and sink construction.
//!
//! [`EngineError`] is the top-level public error type for controller-facing
//! APIs. Sink construction failures are represented by [`SinkError`] and
//! surface to consumers as [`Event::SinkCreateFailed`] notifications, never
//! as unwinding across the worker thread boundary.
//!
//! [`Event::SinkCreateFailed`]: crate::config::engine::Event::SinkCreateFailed

use thiserror::Error;

use resink_runtime::run_loop::CallError;

/// Errors produced while constructing a sink instance.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// Sink backend refused to construct a new instance.
    #[error("sink creation failed: {message}")]
    CreateFailed {
        /// Backend-provided failure description.
        message: String,
    },
}

/// Errors produced by the controller-facing engine surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Worker thread could not be spawned.
    #[error("failed to spawn sink worker: {source}")]
    SpawnWorker {
        /// I/O error returned by thread spawn.
        #[source]
        source: std::io::Error,
    },
    /// Ticker thread could not be spawned.
    #[error("failed to spawn sink ticker: {source}")]
    SpawnTicker {
        /// I/O error returned by thread spawn.
        #[source]
        source: std::io::Error,
    },
    /// A post arrived after the worker's task queue was torn down. The
    /// task was dropped; the worker is already gone.
    #[error("worker task queue is closed")]
    QueueClosed,
    /// Worker command response timed out.
    #[error("worker command '{operation}' timed out after {timeout_ms}ms")]
    CommandTimedOut {
        /// Operation name used for the command.
        operation: &'static str,
        /// Timeout budget used while waiting for completion.
        timeout_ms: u128,
    },
    /// Worker exited before command completion.
    #[error("worker exited while handling '{operation}'")]
    WorkerExited {
        /// Operation name used for the command.
        operation: &'static str,
    },
    /// Worker thread panicked.
    #[error("sink worker thread panicked")]
    WorkerPanicked,
}

impl EngineError {
    pub(crate) fn from_call_error(
        operation: &'static str,
        timeout: std::time::Duration,
        err: CallError,
    ) -> Self {
        match err {
            CallError::LoopClosed => Self::QueueClosed,
            CallError::LoopExited => Self::WorkerExited { operation },
            CallError::Timeout => Self::CommandTimedOut {
                operation,
                timeout_ms: timeout.as_millis(),
            },
        }
    }
}
