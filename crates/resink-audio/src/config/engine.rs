use std::time::Duration;

use crate::sink::SinkId;

/// Lifecycle states of the sink worker.
///
/// Transitions only ever move forward: `Created` → `Running` when the
/// ticker is armed, `Running` → `Destroying` when a teardown request is
/// executed, `Destroying` → `Destroyed` once the slot is cleared.
/// `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerLifecycle {
    Created,
    Running,
    Destroying,
    Destroyed,
}

/// Notifications emitted by the sink worker.
///
/// All variants are emitted from the worker thread; consumers must not
/// assume a delivery thread and marshal events themselves if they need to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new sink was constructed and stored in the slot.
    SinkCreated { sink_id: SinkId },
    /// A sink was destroyed, either during replacement or at teardown.
    SinkDestroyed { sink_id: SinkId },
    /// Sink construction failed; the slot is empty until the next tick.
    SinkCreateFailed { message: String },
    /// The worker finished teardown. Fires exactly once per worker.
    WorkerDestroyed,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cadence of sink replacement ticks.
    pub tick_interval: Duration,
    /// Timeout budget for controller-to-worker commands.
    pub command_timeout: Duration,
    /// Capacity of the notification broadcast channel.
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(8),
            command_timeout: Duration::from_secs(5),
            event_capacity: 256,
        }
    }
}
