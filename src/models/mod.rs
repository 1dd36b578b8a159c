//! Identifier and value types shared across the routing table.
//!
//! These types carry no behavior beyond identity and projection: routing
//! keys group routable units, modification tags order observations, and the
//! desired/actual input records project into the per-key route and endpoint
//! sets the table owns.

pub(crate) mod actual;
pub(crate) mod desired;
pub(crate) mod domain;
pub(crate) mod endpoint;
pub(crate) mod modification_tag;
pub(crate) mod route;
pub(crate) mod routing_key;
