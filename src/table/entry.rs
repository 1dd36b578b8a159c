//! Per-key route/endpoint ownership and the diff that drives emission.

use std::collections::{HashMap, HashSet};

use crate::emitting::message_builder::MessageBuilder;
use crate::emitting::registry_message::MessagesToEmit;
use crate::models::endpoint::{Endpoint, EndpointKey};
use crate::models::modification_tag::ModificationTag;
use crate::models::route::{InternalRoute, Route};

/// Everything the table knows about one routing key.
///
/// The endpoint map is keyed by `(instance_guid, evacuating)`, so a running
/// endpoint and its draining shadow occupy separate slots while still
/// counting as one instance for emission purposes.
#[derive(Clone, Debug, Default)]
pub(crate) struct RouteEntry {
    pub(crate) domain: String,
    pub(crate) http_routes: HashSet<Route>,
    pub(crate) internal_routes: HashSet<InternalRoute>,
    pub(crate) endpoints: HashMap<EndpointKey, Endpoint>,
    pub(crate) modification_tag: ModificationTag,
}

impl RouteEntry {
    pub(crate) fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.http_routes.is_empty() && self.internal_routes.is_empty() && self.endpoints.is_empty()
    }

    pub(crate) fn has_instance(&self, instance_guid: &str) -> bool {
        self.endpoints
            .values()
            .any(|endpoint| endpoint.instance_guid == instance_guid)
    }

    /// One endpoint per instance guid, preferring the running endpoint over
    /// its evacuating shadow so hand-off twins never emit twice.
    pub(crate) fn representative_endpoints(&self) -> Vec<&Endpoint> {
        let mut by_guid: HashMap<&str, &Endpoint> = HashMap::new();
        for endpoint in self.endpoints.values() {
            by_guid
                .entry(endpoint.instance_guid.as_str())
                .and_modify(|slot| {
                    if slot.evacuating && !endpoint.evacuating {
                        *slot = endpoint;
                    }
                })
                .or_insert(endpoint);
        }
        by_guid.into_values().collect()
    }

    /// Folds another entry's declared routes into this one. Used to carry
    /// stale-domain routes across a snapshot swap; endpoints are never
    /// carried because actual state is authoritative.
    pub(crate) fn carry_routes_from(&mut self, other: &RouteEntry) {
        self.http_routes.extend(other.http_routes.iter().cloned());
        self.internal_routes
            .extend(other.internal_routes.iter().cloned());
    }
}

/// Computes the messages that take one key's state from `before` to `after`.
///
/// An endpoint whose instance appears on one side only moves over the full
/// route set of that side; an instance present on both sides moves only
/// over the added or removed routes. This keeps twin transitions silent and
/// avoids double-emitting when a route and an endpoint change together.
pub(crate) fn emit_diff(
    before: &RouteEntry,
    after: &RouteEntry,
    builder: &MessageBuilder,
) -> MessagesToEmit {
    let added_http: Vec<&Route> = after.http_routes.difference(&before.http_routes).collect();
    let removed_http: Vec<&Route> = before.http_routes.difference(&after.http_routes).collect();
    let added_internal: Vec<&InternalRoute> = after
        .internal_routes
        .difference(&before.internal_routes)
        .collect();
    let removed_internal: Vec<&InternalRoute> = before
        .internal_routes
        .difference(&after.internal_routes)
        .collect();

    let mut messages = MessagesToEmit::default();

    for endpoint in after.representative_endpoints() {
        let newly_backing = !before.has_instance(&endpoint.instance_guid);
        let http: Vec<&Route> = if newly_backing {
            after.http_routes.iter().collect()
        } else {
            added_http.clone()
        };
        for route in http {
            messages
                .registration_messages
                .push(builder.registry_message(endpoint, route));
        }

        let internal: Vec<&InternalRoute> = if newly_backing {
            after.internal_routes.iter().collect()
        } else {
            added_internal.clone()
        };
        for route in internal {
            messages
                .internal_registration_messages
                .push(builder.internal_message(endpoint, route));
        }
    }

    for endpoint in before.representative_endpoints() {
        let fully_drained = !after.has_instance(&endpoint.instance_guid);
        let http: Vec<&Route> = if fully_drained {
            before.http_routes.iter().collect()
        } else {
            removed_http.clone()
        };
        for route in http {
            messages
                .unregistration_messages
                .push(builder.registry_message(endpoint, route));
        }

        let internal: Vec<&InternalRoute> = if fully_drained {
            before.internal_routes.iter().collect()
        } else {
            removed_internal.clone()
        };
        for route in internal {
            messages
                .internal_unregistration_messages
                .push(builder.internal_message(endpoint, route));
        }
    }

    messages
}
