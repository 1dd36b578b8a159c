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

//! Declared route identities.

use serde::{Deserialize, Serialize};

/// External HTTP route served by the edge router.
///
/// Equality spans every field: the downstream router keys registrations on
/// the service URL and isolation segment as well as the hostname, so a
/// change to either is a new route identity (remove old, add new) rather
/// than an attribute update.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub hostname: String,
    pub log_guid: String,
    pub route_service_url: Option<String>,
    pub isolation_segment: Option<String>,
}

/// Internal DNS route served by the platform name service.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct InternalRoute {
    pub hostname: String,
    pub log_guid: String,
}

impl InternalRoute {
    /// The pair of names published for one backend: the bare hostname plus
    /// the replica-indexed `<index>.<hostname>` variant.
    pub(crate) fn uris_for_index(&self, index: u32) -> Vec<String> {
        vec![self.hostname.clone(), format!("{}.{}", index, self.hostname)]
    }
}
