/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
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

//! Registry emit message and the per-operation message bundle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Component tag stamped on every emitted message.
pub const ROUTE_EMITTER_COMPONENT: &str = "route-emitter";

/// One registration or unregistration handed to a downstream publisher.
///
/// External messages carry the backend address plus the identity fields the
/// edge router keys on. Internal messages carry the container IP, the
/// hostname/indexed-hostname URI pair, and no port or certificate fields.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RegistryMessage {
    pub uris: Vec<String>,
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    pub app: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isolation_segment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_cert_domain_san: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_instance_id: Option<String>,
    pub private_instance_index: String,
    pub tags: BTreeMap<String, String>,
}

impl RegistryMessage {
    /// The tag set stamped on every message: `{"component": "route-emitter"}`.
    pub fn component_tags() -> BTreeMap<String, String> {
        BTreeMap::from([("component".to_string(), ROUTE_EMITTER_COMPONENT.to_string())])
    }
}

/// Bundle of messages produced by one table operation.
///
/// List order is not contractual; consumers treat each list as a multiset.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MessagesToEmit {
    pub registration_messages: Vec<RegistryMessage>,
    pub unregistration_messages: Vec<RegistryMessage>,
    pub internal_registration_messages: Vec<RegistryMessage>,
    pub internal_unregistration_messages: Vec<RegistryMessage>,
}

impl MessagesToEmit {
    pub fn is_empty(&self) -> bool {
        self.registration_messages.is_empty()
            && self.unregistration_messages.is_empty()
            && self.internal_registration_messages.is_empty()
            && self.internal_unregistration_messages.is_empty()
    }

    pub(crate) fn merge(&mut self, other: MessagesToEmit) {
        self.registration_messages.extend(other.registration_messages);
        self.unregistration_messages
            .extend(other.unregistration_messages);
        self.internal_registration_messages
            .extend(other.internal_registration_messages);
        self.internal_unregistration_messages
            .extend(other.internal_unregistration_messages);
    }
}
