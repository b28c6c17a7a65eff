//! Dispatch Core - Shared types library.
//!
//! This crate provides common types used across all Dispatch components:
//! - `engine` - Delivery lifecycle and reporting engine
//! - `cli` - Command-line tools for seeding and report inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access. This keeps
//! it lightweight and allows it to be used anywhere, including transport
//! layers that sit in front of the engine.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs plus status, role, and
//!   report-period enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
