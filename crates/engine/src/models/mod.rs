//! Domain record types.
//!
//! These are the persisted record shapes plus the input/patch types used by
//! the registry and lifecycle operations. Wire names are camelCase to match
//! the persisted record shapes.

pub mod client;
pub mod delivery;

pub use client::{Address, Client, ClientPatch, ClientSummary, NewClient};
pub use delivery::{
    Delivery, DeliveryDetail, DeliveryPatch, DeliveryWithClient, LineItem, NewDelivery,
};
