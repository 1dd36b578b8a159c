//! Counter facade consumed by the table.
//!
//! The metrics transport lives with the caller; the table only needs a
//! concurrency-safe way to bump named counters.

/// Counter published when two live instances claim the same host address.
pub const ADDRESS_COLLISIONS: &str = "AddressCollisions";

/// Narrow seam to the caller's metrics client.
pub trait MetricsReporter: Send + Sync {
    fn increment_counter(&self, name: &str);
}

/// Reporter that drops every counter, for callers without a metrics
/// pipeline and for tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMetrics;

impl MetricsReporter for NoopMetrics {
    fn increment_counter(&self, _name: &str) {}
}
