//! Desired-state route update consumed by the table.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::modification_tag::ModificationTag;
use crate::models::route::{InternalRoute, Route};
use crate::models::routing_key::RoutingKey;

/// One observed desired-state snapshot for a process.
///
/// Route groups on distinct container ports address distinct routing keys;
/// groups sharing a port merge into one key's route sets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DesiredRoutingInfo {
    pub process_guid: String,
    pub domain: String,
    pub log_guid: String,
    pub route_groups: Vec<RouteGroup>,
    pub modification_tag: ModificationTag,
}

/// Hostnames declared against one container port.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RouteGroup {
    pub container_port: u32,
    pub hostnames: Vec<String>,
    pub internal_hostnames: Vec<String>,
    pub route_service_url: Option<String>,
    pub isolation_segment: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct RouteSets {
    pub(crate) http: HashSet<Route>,
    pub(crate) internal: HashSet<InternalRoute>,
}

impl DesiredRoutingInfo {
    /// Projects the declared route groups into per-key route sets.
    pub(crate) fn route_sets(&self) -> HashMap<RoutingKey, RouteSets> {
        let mut sets: HashMap<RoutingKey, RouteSets> = HashMap::new();
        for group in &self.route_groups {
            let slot = sets
                .entry(RoutingKey::new(&self.process_guid, group.container_port))
                .or_default();
            for hostname in &group.hostnames {
                slot.http.insert(Route {
                    hostname: hostname.clone(),
                    log_guid: self.log_guid.clone(),
                    route_service_url: group.route_service_url.clone(),
                    isolation_segment: group.isolation_segment.clone(),
                });
            }
            for hostname in &group.internal_hostnames {
                slot.internal.insert(InternalRoute {
                    hostname: hostname.clone(),
                    log_guid: self.log_guid.clone(),
                });
            }
        }
        sets
    }
}
