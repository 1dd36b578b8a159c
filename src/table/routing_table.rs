//! Routing-table storage owner and public operation surface.

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::emitting::message_builder::{AddressMode, MessageBuilder};
use crate::emitting::registry_message::MessagesToEmit;
use crate::emitting::routing_events::RoutingEvents;
use crate::metrics::{MetricsReporter, ADDRESS_COLLISIONS};
use crate::models::actual::ActualRoutingInfo;
use crate::models::desired::DesiredRoutingInfo;
use crate::models::domain::DomainSet;
use crate::models::endpoint::Address;
use crate::models::modification_tag::ModificationTag;
use crate::models::routing_key::RoutingKey;
use crate::observability::{events, fields};
use crate::table::address_map::AddressMap;
use crate::table::entry::{emit_diff, RouteEntry};

const COMPONENT: &str = "routing_table";

/// Reconciles desired routes and live endpoints into registration and
/// unregistration messages for downstream publishers.
///
/// The table performs no I/O and never fails outward: stale tags, unknown
/// endpoints and route removals for absent keys all degrade to an empty
/// emit set. Mutators take `&mut self` and readers take `&self`; a caller
/// sharing the table across tasks wraps it in its own `RwLock` and holds
/// the write half across a full mutation.
pub struct RoutingTable {
    entries: HashMap<RoutingKey, RouteEntry>,
    addresses: AddressMap,
    builder: MessageBuilder,
    metrics: Arc<dyn MetricsReporter>,
}

impl RoutingTable {
    /// Creates an empty table. The address mode is fixed for the table's
    /// lifetime; internal messages always use container addressing.
    pub fn new(mode: AddressMode, metrics: Arc<dyn MetricsReporter>) -> Self {
        Self {
            entries: HashMap::new(),
            addresses: AddressMap::default(),
            builder: MessageBuilder::new(mode),
            metrics,
        }
    }

    /// Applies a desired-state update.
    ///
    /// `before` is the previously observed snapshot, when one exists; keys
    /// it declared that `after` no longer declares lose their routes. Each
    /// touched entry is tag-gated: an equal tag is an idempotent
    /// re-delivery, an older same-epoch tag is ignored.
    pub fn set_routes(
        &mut self,
        before: Option<&DesiredRoutingInfo>,
        after: &DesiredRoutingInfo,
    ) -> (RoutingEvents, MessagesToEmit) {
        let mut routing_events = RoutingEvents::default();
        let mut messages = MessagesToEmit::default();

        let after_sets = after.route_sets();
        for (key, sets) in &after_sets {
            let current = self
                .entries
                .get(key)
                .cloned()
                .unwrap_or_else(|| RouteEntry::new(&after.domain));
            if !current.modification_tag.admits(&after.modification_tag) {
                debug!(
                    event = events::ROUTE_UPDATE_SKIPPED,
                    component = COMPONENT,
                    process_guid = %key.process_guid,
                    container_port = key.container_port,
                    reason = fields::REASON_STALE_TAG,
                    "ignored stale desired-route update"
                );
                continue;
            }

            let mut updated = current.clone();
            updated.domain = after.domain.clone();
            updated.http_routes = sets.http.clone();
            updated.internal_routes = sets.internal.clone();
            updated.modification_tag = after.modification_tag.clone();

            let delta = emit_diff(&current, &updated, &self.builder);
            routing_events.record(key, &delta);
            messages.merge(delta);
            self.store(key.clone(), updated);
        }

        if let Some(before) = before {
            for key in before.route_sets().keys() {
                if after_sets.contains_key(key) {
                    continue;
                }
                let delta = self.clear_routes(key, &after.modification_tag);
                routing_events.record(key, &delta);
                messages.merge(delta);
            }
        }

        debug!(
            event = events::ROUTES_SET,
            component = COMPONENT,
            process_guid = %after.process_guid,
            registrations = messages.registration_messages.len(),
            unregistrations = messages.unregistration_messages.len(),
            "applied desired-route update"
        );
        (routing_events, messages)
    }

    /// Clears the declared routes of every key the update addresses.
    /// Endpoints are retained; entries left with neither routes nor
    /// endpoints are dropped.
    pub fn remove_routes(&mut self, info: &DesiredRoutingInfo) -> (RoutingEvents, MessagesToEmit) {
        let mut routing_events = RoutingEvents::default();
        let mut messages = MessagesToEmit::default();

        for key in info.route_sets().keys() {
            let delta = self.clear_routes(key, &info.modification_tag);
            routing_events.record(key, &delta);
            messages.merge(delta);
        }

        debug!(
            event = events::ROUTES_REMOVED,
            component = COMPONENT,
            process_guid = %info.process_guid,
            unregistrations = messages.unregistration_messages.len(),
            "removed desired routes"
        );
        (routing_events, messages)
    }

    /// Upserts the instance's endpoints, one per exposed container port.
    ///
    /// A genuinely new instance registers over the key's full route set. An
    /// upsert of a known endpoint, and the arrival of a running or
    /// evacuating twin for an instance already backing the key, stay
    /// silent.
    pub fn add_endpoint(&mut self, actual: &ActualRoutingInfo) -> (RoutingEvents, MessagesToEmit) {
        let mut routing_events = RoutingEvents::default();
        let mut messages = MessagesToEmit::default();

        for (key, endpoint) in actual.endpoints() {
            let current = self
                .entries
                .get(&key)
                .cloned()
                .unwrap_or_else(|| RouteEntry::new(&actual.domain));
            if let Some(existing) = current.endpoints.get(&endpoint.key()) {
                if !existing
                    .modification_tag
                    .admits(&endpoint.modification_tag)
                {
                    debug!(
                        event = events::ENDPOINT_UPDATE_SKIPPED,
                        component = COMPONENT,
                        instance_guid = %endpoint.instance_guid,
                        reason = fields::REASON_STALE_TAG,
                        "ignored stale endpoint upsert"
                    );
                    continue;
                }
            }

            if let Some(holder) = self.addresses.record(&endpoint) {
                self.report_collision(&endpoint.address(), &holder, &endpoint.instance_guid);
            }

            let mut updated = current.clone();
            updated.domain = actual.domain.clone();
            updated.endpoints.insert(endpoint.key(), endpoint);

            let delta = emit_diff(&current, &updated, &self.builder);
            routing_events.record(&key, &delta);
            messages.merge(delta);
            self.entries.insert(key, updated);
        }

        debug!(
            event = events::ENDPOINT_ADDED,
            component = COMPONENT,
            instance_guid = %actual.instance_guid,
            evacuating = actual.evacuating,
            registrations = messages.registration_messages.len(),
            "processed endpoint upsert"
        );
        (routing_events, messages)
    }

    /// Removes the instance's endpoints.
    ///
    /// When the removed endpoint leaves a running or evacuating twin behind
    /// the key stays backed and nothing is emitted; otherwise the instance
    /// unregisters over the key's full route set. Removing an endpoint the
    /// table never saw emits nothing, though its address claim is still
    /// checked so a lingering collision gets reported.
    pub fn remove_endpoint(
        &mut self,
        actual: &ActualRoutingInfo,
    ) -> (RoutingEvents, MessagesToEmit) {
        let mut routing_events = RoutingEvents::default();
        let mut messages = MessagesToEmit::default();

        for (key, endpoint) in actual.endpoints() {
            if let Some(holder) = self.addresses.release(&endpoint) {
                self.report_collision(&endpoint.address(), &holder, &endpoint.instance_guid);
            }

            let Some(current) = self.entries.get(&key) else {
                continue;
            };
            let Some(existing) = current.endpoints.get(&endpoint.key()) else {
                continue;
            };
            if !existing
                .modification_tag
                .admits(&endpoint.modification_tag)
            {
                debug!(
                    event = events::ENDPOINT_UPDATE_SKIPPED,
                    component = COMPONENT,
                    instance_guid = %endpoint.instance_guid,
                    reason = fields::REASON_STALE_TAG,
                    "ignored stale endpoint removal"
                );
                continue;
            }

            let current = current.clone();
            let mut updated = current.clone();
            updated.endpoints.remove(&endpoint.key());

            let delta = emit_diff(&current, &updated, &self.builder);
            routing_events.record(&key, &delta);
            messages.merge(delta);
            self.store(key, updated);
        }

        debug!(
            event = events::ENDPOINT_REMOVED,
            component = COMPONENT,
            instance_guid = %actual.instance_guid,
            evacuating = actual.evacuating,
            unregistrations = messages.unregistration_messages.len(),
            "processed endpoint removal"
        );
        (routing_events, messages)
    }

    /// Reconciles against a freshly built snapshot table.
    ///
    /// Keys present in both tables diff route-by-route and
    /// endpoint-by-endpoint; when the old entry's domain is not fresh its
    /// declared routes are carried into the snapshot instead of
    /// unregistering, so a later fresh swap can retire them. Keys missing
    /// from the snapshot unregister in full regardless of freshness, and
    /// the collision index is rebuilt from the snapshot's endpoints.
    pub fn swap(
        &mut self,
        new_table: RoutingTable,
        fresh_domains: &DomainSet,
    ) -> (RoutingEvents, MessagesToEmit) {
        let mut routing_events = RoutingEvents::default();
        let mut messages = MessagesToEmit::default();

        let mut incoming = new_table.entries;
        let previous = mem::take(&mut self.entries);

        for (key, old_entry) in &previous {
            match incoming.get(key) {
                Some(new_entry) => {
                    let mut target = new_entry.clone();
                    if !fresh_domains.contains(&old_entry.domain) {
                        target.carry_routes_from(old_entry);
                    }
                    let delta = emit_diff(old_entry, &target, &self.builder);
                    routing_events.record(key, &delta);
                    messages.merge(delta);
                    incoming.insert(key.clone(), target);
                }
                None => {
                    let drained = RouteEntry::new(&old_entry.domain);
                    let delta = emit_diff(old_entry, &drained, &self.builder);
                    routing_events.record(key, &delta);
                    messages.merge(delta);
                }
            }
        }

        for (key, new_entry) in &incoming {
            if previous.contains_key(key) {
                continue;
            }
            let appeared = RouteEntry::new(&new_entry.domain);
            let delta = emit_diff(&appeared, new_entry, &self.builder);
            routing_events.record(key, &delta);
            messages.merge(delta);
        }

        self.addresses =
            AddressMap::rebuild(incoming.values().flat_map(|entry| entry.endpoints.values()));
        self.entries = incoming;

        debug!(
            event = events::TABLE_SWAPPED,
            component = COMPONENT,
            keys = self.entries.len(),
            registrations = messages.registration_messages.len(),
            unregistrations = messages.unregistration_messages.len(),
            "swapped in snapshot table"
        );
        (routing_events, messages)
    }

    /// Full registration product of the current state, for periodic
    /// resyncs. Never produces unregistrations.
    pub fn routing_events(&self) -> (RoutingEvents, MessagesToEmit) {
        let mut routing_events = RoutingEvents::default();
        let mut messages = MessagesToEmit::default();

        for (key, entry) in &self.entries {
            let unbacked = RouteEntry::new(&entry.domain);
            let delta = emit_diff(&unbacked, entry, &self.builder);
            routing_events.record(key, &delta);
            messages.merge(delta);
        }

        (routing_events, messages)
    }

    /// True when any routing key the instance backs has external routes.
    pub fn has_external_routes(&self, actual: &ActualRoutingInfo) -> bool {
        actual.endpoints().iter().any(|(key, _)| {
            self.entries
                .get(key)
                .is_some_and(|entry| !entry.http_routes.is_empty())
        })
    }

    /// Total number of (external route × endpoint) pairs in the table.
    pub fn http_associations_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.http_routes.len() * entry.endpoints.len())
            .sum()
    }

    /// Total number of (internal route × endpoint) pairs in the table.
    pub fn internal_associations_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.internal_routes.len() * entry.endpoints.len())
            .sum()
    }

    /// Clears a key's declared routes under the tag gate. Shared by route
    /// removal and by desired updates that drop a key.
    fn clear_routes(&mut self, key: &RoutingKey, tag: &ModificationTag) -> MessagesToEmit {
        let Some(current) = self.entries.get(key).cloned() else {
            return MessagesToEmit::default();
        };
        if !current.modification_tag.admits(tag) {
            debug!(
                event = events::ROUTE_UPDATE_SKIPPED,
                component = COMPONENT,
                process_guid = %key.process_guid,
                container_port = key.container_port,
                reason = fields::REASON_STALE_TAG,
                "ignored stale route removal"
            );
            return MessagesToEmit::default();
        }

        let mut updated = current.clone();
        updated.http_routes.clear();
        updated.internal_routes.clear();
        updated.modification_tag = tag.clone();

        let delta = emit_diff(&current, &updated, &self.builder);
        self.store(key.clone(), updated);
        delta
    }

    /// Entries with neither routes nor endpoints leave the table.
    fn store(&mut self, key: RoutingKey, entry: RouteEntry) {
        if entry.is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, entry);
        }
    }

    fn report_collision(&self, address: &Address, holder_guid: &str, claimant_guid: &str) {
        warn!(
            event = events::COLLISION_DETECTED,
            component = COMPONENT,
            Address = %fields::format_address(address),
            instance_guid_a = %holder_guid,
            instance_guid_b = %claimant_guid,
            "two live instances claim the same host address"
        );
        self.metrics.increment_counter(ADDRESS_COLLISIONS);
    }
}
