//! Observability model.
//!
//! The crate uses `tracing` for logs/events. Library code emits events and
//! never installs a global subscriber; binaries and tests own one-time
//! `tracing_subscriber` initialization at process boundaries.

pub(crate) mod events;
pub(crate) mod fields;
