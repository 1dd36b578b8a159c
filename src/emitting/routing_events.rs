//! Structured per-key change log returned alongside emit messages.

use crate::emitting::registry_message::MessagesToEmit;
use crate::models::routing_key::RoutingKey;

/// Summary of what one operation changed for one routing key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoutingEvent {
    pub key: RoutingKey,
    pub registrations: usize,
    pub unregistrations: usize,
    pub internal_registrations: usize,
    pub internal_unregistrations: usize,
}

/// Change log for one table operation; keys that produced no messages are
/// not recorded.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoutingEvents {
    pub events: Vec<RoutingEvent>,
}

impl RoutingEvents {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn record(&mut self, key: &RoutingKey, delta: &MessagesToEmit) {
        if delta.is_empty() {
            return;
        }
        self.events.push(RoutingEvent {
            key: key.clone(),
            registrations: delta.registration_messages.len(),
            unregistrations: delta.unregistration_messages.len(),
            internal_registrations: delta.internal_registration_messages.len(),
            internal_unregistrations: delta.internal_unregistration_messages.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::RoutingEvents;
    use crate::emitting::message_builder::{AddressMode, MessageBuilder};
    use crate::emitting::registry_message::MessagesToEmit;
    use crate::models::endpoint::Endpoint;
    use crate::models::modification_tag::ModificationTag;
    use crate::models::route::Route;
    use crate::models::routing_key::RoutingKey;

    #[test]
    fn silent_keys_are_not_recorded() {
        let mut events = RoutingEvents::default();

        events.record(&RoutingKey::new("app-1", 8080), &MessagesToEmit::default());

        assert!(events.is_empty());
    }

    #[test]
    fn recorded_event_counts_each_message_list() {
        let builder = MessageBuilder::new(AddressMode::Host);
        let endpoint = Endpoint {
            instance_guid: "ig-1".to_string(),
            index: 0,
            host: "1.1.1.1".to_string(),
            container_ip: "1.2.3.4".to_string(),
            port: 11,
            container_port: 8080,
            evacuating: false,
            modification_tag: ModificationTag::new("abc", 1),
        };
        let route = Route {
            hostname: "foo.example.com".to_string(),
            log_guid: "log-1".to_string(),
            route_service_url: None,
            isolation_segment: None,
        };

        let delta = MessagesToEmit {
            registration_messages: vec![builder.registry_message(&endpoint, &route)],
            ..Default::default()
        };
        let mut events = RoutingEvents::default();
        events.record(&RoutingKey::new("app-1", 8080), &delta);

        assert_eq!(events.events.len(), 1);
        assert_eq!(events.events[0].registrations, 1);
        assert_eq!(events.events[0].unregistrations, 0);
    }
}
