//! Address-mode seam for external message construction.

use crate::emitting::registry_message::RegistryMessage;
use crate::models::endpoint::Endpoint;
use crate::models::route::{InternalRoute, Route};

/// How external registrations address a backend. Chosen when the table is
/// built and fixed for its lifetime.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AddressMode {
    /// Host IP and host-side port, for the external HTTP edge router.
    #[default]
    Host,
    /// Container IP and container port, for routers co-located on the
    /// container network.
    Container,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct MessageBuilder {
    mode: AddressMode,
}

impl MessageBuilder {
    pub(crate) fn new(mode: AddressMode) -> Self {
        Self { mode }
    }

    pub(crate) fn registry_message(&self, endpoint: &Endpoint, route: &Route) -> RegistryMessage {
        let (host, port) = match self.mode {
            AddressMode::Host => (endpoint.host.clone(), endpoint.port),
            AddressMode::Container => (endpoint.container_ip.clone(), endpoint.container_port),
        };

        RegistryMessage {
            uris: vec![route.hostname.clone()],
            host,
            port: Some(port),
            app: route.log_guid.clone(),
            isolation_segment: route.isolation_segment.clone(),
            route_service_url: route.route_service_url.clone(),
            server_cert_domain_san: Some(endpoint.instance_guid.clone()),
            private_instance_id: Some(endpoint.instance_guid.clone()),
            private_instance_index: endpoint.index.to_string(),
            tags: RegistryMessage::component_tags(),
        }
    }

    /// Internal messages always address the container network, whatever the
    /// external mode is.
    pub(crate) fn internal_message(
        &self,
        endpoint: &Endpoint,
        route: &InternalRoute,
    ) -> RegistryMessage {
        RegistryMessage {
            uris: route.uris_for_index(endpoint.index),
            host: endpoint.container_ip.clone(),
            port: None,
            app: route.log_guid.clone(),
            isolation_segment: None,
            route_service_url: None,
            server_cert_domain_san: None,
            private_instance_id: None,
            private_instance_index: endpoint.index.to_string(),
            tags: RegistryMessage::component_tags(),
        }
    }
}
