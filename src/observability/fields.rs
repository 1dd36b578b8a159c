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

//! Canonical structured field values and value-format helpers.

use crate::models::endpoint::Address;

pub const REASON_STALE_TAG: &str = "stale_modification_tag";

/// Renders an address claim the way the collision record expects it,
/// e.g. `{"Host":"1.1.1.1","Port":11}`.
pub fn format_address(address: &Address) -> String {
    serde_json::to_string(address).unwrap_or_else(|_| String::from("{}"))
}
