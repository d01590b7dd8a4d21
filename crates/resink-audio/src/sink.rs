//! Sink instances and the factories that construct them.
//!
//! A sink models the recreated audio-output handle. The crate never touches
//! audio hardware itself; callers supply a [`SinkFactory`] for whatever
//! backend they drive, and [`NullSink`] covers demos and tests.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::SinkError;

/// Process-unique identity of one sink instance.
///
/// Identities are never reused, so a destroy notification can always be
/// paired with the create notification for the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

impl SinkId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink-{}", self.0)
    }
}

/// A live audio-output handle.
///
/// Dropping the value releases the sink; a sink is destroyed at most once
/// and never referenced afterwards, which ownership enforces on its own.
pub trait AudioSink: Send {
    fn id(&self) -> SinkId;
}

/// Constructs sink instances on the worker thread.
///
/// Construction failure is recoverable: the worker reports it and retries
/// on the next tick, so factories should return an error rather than
/// panic when the backend is unavailable.
pub trait SinkFactory: Send {
    fn create(&mut self) -> Result<Box<dyn AudioSink>, SinkError>;
}

impl<F> SinkFactory for F
where
    F: FnMut() -> Result<Box<dyn AudioSink>, SinkError> + Send,
{
    fn create(&mut self) -> Result<Box<dyn AudioSink>, SinkError> {
        self()
    }
}

/// Sink with no hardware backing.
pub struct NullSink {
    id: SinkId,
}

impl NullSink {
    /// Constructs a fresh null sink. Usable directly as a factory:
    /// `start_engine(Box::new(NullSink::open))`.
    pub fn open() -> Result<Box<dyn AudioSink>, SinkError> {
        let id = SinkId::next();
        debug!(%id, "null sink opened");
        Ok(Box::new(Self { id }))
    }
}

impl AudioSink for NullSink {
    fn id(&self) -> SinkId {
        self.id
    }
}

impl Drop for NullSink {
    fn drop(&mut self) {
        debug!(id = %self.id, "null sink closed");
    }
}
