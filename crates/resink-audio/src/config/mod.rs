//! Runtime configuration and event models.
//!
//! User-facing settings and the notification payload types emitted by the
//! sink worker.

/// Engine state, event, and timing configuration models.
pub mod engine;
