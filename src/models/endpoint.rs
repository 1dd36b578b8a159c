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

//! Live instance endpoint backing a routing key.

use serde::{Deserialize, Serialize};

use crate::models::modification_tag::ModificationTag;

/// One live backend for a routing key.
///
/// Two endpoints are the same instance iff their `instance_guid` matches.
/// An endpoint with `evacuating` set is a draining shadow of its instance,
/// kept alongside the running one during a graceful hand-off.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub instance_guid: String,
    /// Zero-based replica index of the instance.
    pub index: u32,
    pub host: String,
    pub container_ip: String,
    pub port: u32,
    pub container_port: u32,
    pub evacuating: bool,
    pub modification_tag: ModificationTag,
}

impl Endpoint {
    /// Identity inside an entry's endpoint map. The evacuating flag is part
    /// of the key so a running endpoint and its shadow can coexist.
    pub(crate) fn key(&self) -> EndpointKey {
        EndpointKey {
            instance_guid: self.instance_guid.clone(),
            evacuating: self.evacuating,
        }
    }

    /// Externally visible `(host, port)` claim used for collision tracking.
    pub(crate) fn address(&self) -> Address {
        Address {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct EndpointKey {
    pub(crate) instance_guid: String,
    pub(crate) evacuating: bool,
}

/// Host-side address claim of an endpoint. Serialized field names match the
/// collision record consumed by operators downstream.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Address {
    #[serde(rename = "Host")]
    pub host: String,
    #[serde(rename = "Port")]
    pub port: u32,
}
