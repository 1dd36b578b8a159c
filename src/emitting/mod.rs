//! Emission layer.
//!
//! Converts entry diffs into the registration and unregistration messages
//! handed to the publisher collaborators. The builder seam owns the choice
//! between host and container addressing; message shape stays wire-agnostic
//! beyond serde field names.

pub(crate) mod message_builder;
pub(crate) mod registry_message;
pub(crate) mod routing_events;
