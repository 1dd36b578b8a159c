//! Actual-state instance update consumed by the table.

use serde::{Deserialize, Serialize};

use crate::models::endpoint::Endpoint;
use crate::models::modification_tag::ModificationTag;
use crate::models::routing_key::RoutingKey;

/// One observed live (or draining) instance of a process.
///
/// An instance can expose several container ports; each mapping addresses
/// the routing key with the matching container port.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActualRoutingInfo {
    pub process_guid: String,
    pub instance_guid: String,
    /// Zero-based replica index.
    pub index: u32,
    pub domain: String,
    pub host: String,
    pub container_ip: String,
    pub ports: Vec<PortMapping>,
    pub evacuating: bool,
    pub modification_tag: ModificationTag,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PortMapping {
    pub host_port: u32,
    pub container_port: u32,
}

impl ActualRoutingInfo {
    /// Projects the instance into one endpoint per exposed container port.
    pub(crate) fn endpoints(&self) -> Vec<(RoutingKey, Endpoint)> {
        self.ports
            .iter()
            .map(|mapping| {
                (
                    RoutingKey::new(&self.process_guid, mapping.container_port),
                    Endpoint {
                        instance_guid: self.instance_guid.clone(),
                        index: self.index,
                        host: self.host.clone(),
                        container_ip: self.container_ip.clone(),
                        port: mapping.host_port,
                        container_port: mapping.container_port,
                        evacuating: self.evacuating,
                        modification_tag: self.modification_tag.clone(),
                    },
                )
            })
            .collect()
    }
}
