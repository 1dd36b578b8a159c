//! Canonical structured event names used across the routing table.

// Collision reporting. The name is part of the operator contract.
pub const COLLISION_DETECTED: &str = "collision-detected-with-endpoint";

// Mutation lifecycle events.
pub const ROUTES_SET: &str = "routes_set";
pub const ROUTES_REMOVED: &str = "routes_removed";
pub const ENDPOINT_ADDED: &str = "endpoint_added";
pub const ENDPOINT_REMOVED: &str = "endpoint_removed";
pub const TABLE_SWAPPED: &str = "table_swapped";

// Admission events for stale observations.
pub const ROUTE_UPDATE_SKIPPED: &str = "route_update_skipped";
pub const ENDPOINT_UPDATE_SKIPPED: &str = "endpoint_update_skipped";
