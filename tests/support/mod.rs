#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use route_table::{
    ActualRoutingInfo, AddressMode, DesiredRoutingInfo, DomainSet, MessagesToEmit,
    MetricsReporter, ModificationTag, NoopMetrics, PortMapping, RegistryMessage, RouteGroup,
    RoutingKey, RoutingTable,
};

pub const PROCESS_GUID: &str = "some-process-guid";
pub const CONTAINER_PORT: u32 = 8080;
pub const LOG_GUID: &str = "some-log-guid";
pub const DOMAIN: &str = "domain";

pub const HOSTNAME_1: &str = "foo.example.com";
pub const HOSTNAME_2: &str = "bar.example.com";
pub const HOSTNAME_3: &str = "baz.example.com";
pub const INTERNAL_HOSTNAME_1: &str = "internal-1";
pub const INTERNAL_HOSTNAME_2: &str = "internal-2";

pub fn older_tag() -> ModificationTag {
    ModificationTag::new("abc", 0)
}

pub fn current_tag() -> ModificationTag {
    ModificationTag::new("abc", 1)
}

pub fn bumped_tag() -> ModificationTag {
    ModificationTag::new("abc", 2)
}

pub fn newer_tag() -> ModificationTag {
    ModificationTag::new("def", 0)
}

pub fn routing_key() -> RoutingKey {
    RoutingKey::new(PROCESS_GUID, CONTAINER_PORT)
}

pub fn fresh_domains() -> DomainSet {
    [DOMAIN].into_iter().collect()
}

pub fn no_fresh_domains() -> DomainSet {
    DomainSet::new()
}

#[derive(Clone, Copy)]
pub struct EndpointFixture {
    pub instance_guid: &'static str,
    pub index: u32,
    pub host: &'static str,
    pub container_ip: &'static str,
    pub port: u32,
    pub evacuating: bool,
}

pub fn endpoint1() -> EndpointFixture {
    EndpointFixture {
        instance_guid: "ig-1",
        index: 0,
        host: "1.1.1.1",
        container_ip: "1.2.3.4",
        port: 11,
        evacuating: false,
    }
}

pub fn endpoint2() -> EndpointFixture {
    EndpointFixture {
        instance_guid: "ig-2",
        index: 1,
        host: "2.2.2.2",
        container_ip: "2.3.4.5",
        port: 22,
        evacuating: false,
    }
}

pub fn endpoint3() -> EndpointFixture {
    EndpointFixture {
        instance_guid: "ig-3",
        index: 2,
        host: "3.3.3.3",
        container_ip: "3.4.5.6",
        port: 33,
        evacuating: false,
    }
}

pub fn collision_endpoint() -> EndpointFixture {
    EndpointFixture {
        instance_guid: "ig-4",
        index: 3,
        host: "1.1.1.1",
        container_ip: "1.2.3.4",
        port: 11,
        evacuating: false,
    }
}

pub fn replacement_endpoint() -> EndpointFixture {
    EndpointFixture {
        instance_guid: "ig-5",
        index: 0,
        host: "5.5.5.5",
        container_ip: "4.5.6.7",
        port: 55,
        evacuating: false,
    }
}

pub fn evacuating1() -> EndpointFixture {
    EndpointFixture {
        evacuating: true,
        ..endpoint1()
    }
}

impl EndpointFixture {
    pub fn actual(&self) -> ActualRoutingInfo {
        self.actual_with_tag(current_tag())
    }

    pub fn actual_with_tag(&self, tag: ModificationTag) -> ActualRoutingInfo {
        self.actual_with_ports_and_tag(
            vec![PortMapping {
                host_port: self.port,
                container_port: CONTAINER_PORT,
            }],
            tag,
        )
    }

    pub fn actual_with_ports_and_tag(
        &self,
        ports: Vec<PortMapping>,
        tag: ModificationTag,
    ) -> ActualRoutingInfo {
        ActualRoutingInfo {
            process_guid: PROCESS_GUID.to_string(),
            instance_guid: self.instance_guid.to_string(),
            index: self.index,
            domain: DOMAIN.to_string(),
            host: self.host.to_string(),
            container_ip: self.container_ip.to_string(),
            ports,
            evacuating: self.evacuating,
            modification_tag: tag,
        }
    }

    pub fn registration(&self, hostname: &str) -> RegistryMessage {
        self.registration_with(hostname, None, None)
    }

    pub fn registration_with(
        &self,
        hostname: &str,
        route_service_url: Option<&str>,
        isolation_segment: Option<&str>,
    ) -> RegistryMessage {
        RegistryMessage {
            uris: vec![hostname.to_string()],
            host: self.host.to_string(),
            port: Some(self.port),
            app: LOG_GUID.to_string(),
            isolation_segment: isolation_segment.map(str::to_string),
            route_service_url: route_service_url.map(str::to_string),
            server_cert_domain_san: Some(self.instance_guid.to_string()),
            private_instance_id: Some(self.instance_guid.to_string()),
            private_instance_index: self.index.to_string(),
            tags: RegistryMessage::component_tags(),
        }
    }

    pub fn internal_registration(&self, hostname: &str) -> RegistryMessage {
        RegistryMessage {
            uris: vec![hostname.to_string(), format!("{}.{}", self.index, hostname)],
            host: self.container_ip.to_string(),
            port: None,
            app: LOG_GUID.to_string(),
            isolation_segment: None,
            route_service_url: None,
            server_cert_domain_san: None,
            private_instance_id: None,
            private_instance_index: self.index.to_string(),
            tags: RegistryMessage::component_tags(),
        }
    }
}

pub fn desired(
    hostnames: &[&str],
    internal_hostnames: &[&str],
    tag: ModificationTag,
) -> DesiredRoutingInfo {
    desired_with(hostnames, internal_hostnames, None, None, tag)
}

pub fn desired_with(
    hostnames: &[&str],
    internal_hostnames: &[&str],
    route_service_url: Option<&str>,
    isolation_segment: Option<&str>,
    tag: ModificationTag,
) -> DesiredRoutingInfo {
    DesiredRoutingInfo {
        process_guid: PROCESS_GUID.to_string(),
        domain: DOMAIN.to_string(),
        log_guid: LOG_GUID.to_string(),
        route_groups: vec![RouteGroup {
            container_port: CONTAINER_PORT,
            hostnames: hostnames.iter().map(ToString::to_string).collect(),
            internal_hostnames: internal_hostnames.iter().map(ToString::to_string).collect(),
            route_service_url: route_service_url.map(str::to_string),
            isolation_segment: isolation_segment.map(str::to_string),
        }],
        modification_tag: tag,
    }
}

#[derive(Default)]
pub struct CountingMetrics {
    counters: Mutex<Vec<String>>,
}

impl MetricsReporter for CountingMetrics {
    fn increment_counter(&self, name: &str) {
        self.counters
            .lock()
            .expect("counter lock should not be poisoned")
            .push(name.to_string());
    }
}

impl CountingMetrics {
    pub fn count(&self, name: &str) -> usize {
        self.counters
            .lock()
            .expect("counter lock should not be poisoned")
            .iter()
            .filter(|counter| counter.as_str() == name)
            .count()
    }
}

/// One-time subscriber setup; the library itself never installs one.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn new_table() -> RoutingTable {
    RoutingTable::new(AddressMode::Host, Arc::new(NoopMetrics))
}

pub fn new_table_with_metrics(metrics: Arc<CountingMetrics>) -> RoutingTable {
    RoutingTable::new(AddressMode::Host, metrics)
}

/// Table holding hostnames 1 and 2, internal hostname 1, and endpoints 1
/// and 2, installed through a fresh swap.
pub fn populated_table() -> RoutingTable {
    let mut table = new_table();
    let mut snapshot = new_table();
    snapshot.set_routes(
        None,
        &desired(
            &[HOSTNAME_1, HOSTNAME_2],
            &[INTERNAL_HOSTNAME_1],
            current_tag(),
        ),
    );
    snapshot.add_endpoint(&endpoint1().actual());
    snapshot.add_endpoint(&endpoint2().actual());
    table.swap(snapshot, &fresh_domains());
    table
}

pub fn assert_messages_match(actual: &MessagesToEmit, expected: &MessagesToEmit) {
    assert_multiset(
        "registration messages",
        &actual.registration_messages,
        &expected.registration_messages,
    );
    assert_multiset(
        "unregistration messages",
        &actual.unregistration_messages,
        &expected.unregistration_messages,
    );
    assert_multiset(
        "internal registration messages",
        &actual.internal_registration_messages,
        &expected.internal_registration_messages,
    );
    assert_multiset(
        "internal unregistration messages",
        &actual.internal_unregistration_messages,
        &expected.internal_unregistration_messages,
    );
}

fn assert_multiset(list: &str, actual: &[RegistryMessage], expected: &[RegistryMessage]) {
    let mut actual_rendered: Vec<String> = actual.iter().map(render).collect();
    let mut expected_rendered: Vec<String> = expected.iter().map(render).collect();
    actual_rendered.sort();
    expected_rendered.sort();
    assert_eq!(actual_rendered, expected_rendered, "{list} mismatch");
}

fn render(message: &RegistryMessage) -> String {
    serde_json::to_string(message).expect("registry message should serialize")
}
