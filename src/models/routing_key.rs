//! Routing key identifying one routable unit of an application.

use serde::{Deserialize, Serialize};

/// `(process_guid, container_port)` pair grouping the routes and endpoints
/// that belong to one routable unit.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct RoutingKey {
    pub process_guid: String,
    pub container_port: u32,
}

impl RoutingKey {
    pub fn new(process_guid: impl Into<String>, container_port: u32) -> Self {
        Self {
            process_guid: process_guid.into(),
            container_port,
        }
    }
}
