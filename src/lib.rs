/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! # route-table
//!
//! `route-table` is the reconciliation core of a route emitter for a
//! container platform. It folds two independently observed streams, the
//! declared routes of an application (desired state) and its live instance
//! endpoints (actual state), into the registration and unregistration
//! messages an HTTP edge router and an internal DNS registrar consume.
//!
//! The table performs no I/O and is agnostic to the wire encoding of its
//! messages; publishing, batching and configuration belong to the
//! surrounding process.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use route_table::{
//!     ActualRoutingInfo, AddressMode, DesiredRoutingInfo, ModificationTag, NoopMetrics,
//!     PortMapping, RouteGroup, RoutingTable,
//! };
//!
//! let mut table = RoutingTable::new(AddressMode::Host, Arc::new(NoopMetrics));
//!
//! let desired = DesiredRoutingInfo {
//!     process_guid: "app-1".to_string(),
//!     domain: "apps".to_string(),
//!     log_guid: "log-1".to_string(),
//!     route_groups: vec![RouteGroup {
//!         container_port: 8080,
//!         hostnames: vec!["foo.example.com".to_string()],
//!         ..Default::default()
//!     }],
//!     modification_tag: ModificationTag::new("abc", 1),
//! };
//! let (_, messages) = table.set_routes(None, &desired);
//! assert!(messages.is_empty()); // no endpoints yet
//!
//! let actual = ActualRoutingInfo {
//!     process_guid: "app-1".to_string(),
//!     instance_guid: "ig-1".to_string(),
//!     index: 0,
//!     domain: "apps".to_string(),
//!     host: "10.0.16.4".to_string(),
//!     container_ip: "172.16.0.2".to_string(),
//!     ports: vec![PortMapping {
//!         host_port: 61001,
//!         container_port: 8080,
//!     }],
//!     evacuating: false,
//!     modification_tag: ModificationTag::new("abc", 1),
//! };
//! let (_, messages) = table.add_endpoint(&actual);
//! assert_eq!(messages.registration_messages.len(), 1);
//! assert_eq!(messages.registration_messages[0].uris, vec!["foo.example.com"]);
//! assert_eq!(messages.registration_messages[0].host, "10.0.16.4");
//! ```
//!
//! ## Internal architecture map
//!
//! - Models: routing keys, modification tags, endpoints, declared routes
//! - Table: key→entry map, per-key diff, address collision index
//! - Emitting: registry messages, address-mode builder seam, change log
//! - Observability: canonical event names and field helpers
//! - Metrics: narrow counter facade owned by the caller
//!
//! ## Concurrency model
//!
//! Every operation is synchronous and completes before returning. Mutators
//! take `&mut self`; callers sharing a table across tasks serialize writers
//! with their own lock and may run readers under its read half.
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events. Library code emits events and
//! does not initialize a global subscriber; binaries and tests own one-time
//! `tracing_subscriber` initialization at process boundaries.

mod emitting;
mod metrics;
mod models;
mod observability;
mod table;

pub use emitting::message_builder::AddressMode;
pub use emitting::registry_message::{MessagesToEmit, RegistryMessage, ROUTE_EMITTER_COMPONENT};
pub use emitting::routing_events::{RoutingEvent, RoutingEvents};
pub use metrics::{MetricsReporter, NoopMetrics, ADDRESS_COLLISIONS};
pub use models::actual::{ActualRoutingInfo, PortMapping};
pub use models::desired::{DesiredRoutingInfo, RouteGroup};
pub use models::domain::DomainSet;
pub use models::endpoint::{Address, Endpoint};
pub use models::modification_tag::ModificationTag;
pub use models::route::{InternalRoute, Route};
pub use models::routing_key::RoutingKey;
pub use table::routing_table::RoutingTable;
