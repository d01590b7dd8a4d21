#![deny(clippy::wildcard_imports)]

//! Lifecycle coordination for a periodically recreated audio sink.
//!
//! A dedicated worker thread owns one sink slot and replaces the sink at a
//! fixed cadence; a controller thread may request teardown of the whole
//! worker at any moment, including while a replacement is in flight. Both
//! paths go through one single-consumer FIFO task queue, so a replacement
//! always completes before a queued teardown runs and a teardown that ran
//! guarantees no later tick touches the cleared slot. No locks guard the
//! slot; exclusivity falls out of the queue discipline.
//!
//! ```no_run
//! use resink_audio::sink::NullSink;
//! use resink_audio::{Event, start_engine};
//!
//! let mut handle = start_engine(Box::new(NullSink::open)).expect("start worker");
//! let mut events = handle.subscribe();
//! handle.request_stop().expect("request stop");
//! handle.join().expect("worker exited");
//! while let Ok(event) = events.try_recv() {
//!     if event == Event::WorkerDestroyed {
//!         break;
//!     }
//! }
//! ```

pub mod config;
mod engine;
pub mod error;
mod infra;
pub mod sink;
mod slot;
mod worker;

pub use config::engine::{EngineConfig, Event, WorkerLifecycle};
pub use engine::{EngineHandle, start_engine, start_engine_with_config};

#[cfg(test)]
mod tests;
