//! Core types for Dispatch.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod period;
pub mod principal;
pub mod status;

pub use id::*;
pub use period::ReportPeriod;
pub use principal::{Principal, Role};
pub use status::{DeliveryStatus, InvalidStatus};
