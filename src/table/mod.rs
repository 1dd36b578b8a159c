//! Table layer.
//!
//! Owns the key→entry map, the per-key diff that drives emission, and the
//! address index used for collision detection. Every endpoint mutation
//! updates the entry map and the address index inside the same operation.

pub(crate) mod address_map;
pub(crate) mod entry;
pub(crate) mod routing_table;
