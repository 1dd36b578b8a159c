//! Secondary index from `(host, port)` to the instance claiming it.

use std::collections::HashMap;

use crate::models::endpoint::{Address, Endpoint};

/// Tracks which live instance last claimed each host address.
///
/// The map reports collisions, it never rejects: the caller inserts the
/// colliding endpoint anyway and the claim moves to the newcomer.
#[derive(Clone, Debug, Default)]
pub(crate) struct AddressMap {
    claims: HashMap<Address, String>,
}

impl AddressMap {
    /// Claims an address for the endpoint's instance. Returns the guid of a
    /// different instance previously holding the claim, if any.
    pub(crate) fn record(&mut self, endpoint: &Endpoint) -> Option<String> {
        let previous = self
            .claims
            .insert(endpoint.address(), endpoint.instance_guid.clone());
        previous.filter(|guid| *guid != endpoint.instance_guid)
    }

    /// Releases the endpoint's claim. When a different instance holds the
    /// address its guid is returned and the claim is left in place; that
    /// mismatch is the remove-side collision the caller reports.
    pub(crate) fn release(&mut self, endpoint: &Endpoint) -> Option<String> {
        let address = endpoint.address();
        match self.claims.get(&address) {
            Some(guid) if *guid == endpoint.instance_guid => {
                self.claims.remove(&address);
                None
            }
            Some(guid) => Some(guid.clone()),
            None => None,
        }
    }

    /// Rebuilds the index from scratch, as after a snapshot swap.
    pub(crate) fn rebuild<'a>(endpoints: impl Iterator<Item = &'a Endpoint>) -> Self {
        let mut map = Self::default();
        for endpoint in endpoints {
            map.claims
                .insert(endpoint.address(), endpoint.instance_guid.clone());
        }
        map
    }
}
