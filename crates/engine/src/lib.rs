//! Dispatch Engine - delivery lifecycle and reporting core.
//!
//! This crate implements the stateful heart of Dispatch: the client
//! registry, the delivery lifecycle store, and the read-only report engine,
//! all over a shared insertion-ordered record store.
//!
//! # Architecture
//!
//! - [`store`] - in-memory record store standing in for the external
//!   persistence engine (atomic per-record CRUD plus collection scans)
//! - [`clients`] - client registry with existence lookups
//! - [`deliveries`] - delivery lifecycle: create/update/delete, flat-enum
//!   status transitions, filtered listing, search
//! - [`reports`] - statistics, period/client reports, rolling-window
//!   performance reports
//! - [`filter`] - substring search predicate shared by both search surfaces
//! - [`auth`] - declarative operation -> policy table for callers that sit
//!   in front of the engine
//!
//! Transport, credential verification, and durable persistence are external
//! collaborators; the engine consumes an already-authenticated
//! [`dispatch_core::Principal`] and stamps its id onto mutations.
//!
//! # Example
//!
//! ```
//! use dispatch_core::{Principal, PrincipalId, Role};
//! use dispatch_engine::clients::ClientRegistry;
//! use dispatch_engine::deliveries::DeliveryStore;
//! use dispatch_engine::models::{NewClient, NewDelivery};
//! use dispatch_engine::reports::ReportEngine;
//! use dispatch_engine::store::MemoryStore;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), dispatch_engine::error::EngineError> {
//! let store = MemoryStore::new();
//! let registry = ClientRegistry::new(store.clone());
//! let deliveries = DeliveryStore::new(store.clone());
//! let reports = ReportEngine::new(store);
//!
//! let principal = Principal::new(PrincipalId::generate(), Role::Operator);
//! let client = registry.create(NewClient {
//!     name: "Acme".to_owned(),
//!     ..NewClient::default()
//! })?;
//!
//! deliveries.create(
//!     NewDelivery {
//!         client: client.id,
//!         scheduled_date: chrono::Utc::now(),
//!         driver: None,
//!         status: None,
//!         total_value: Decimal::new(200, 1),
//!         line_items: vec![],
//!         notes: None,
//!     },
//!     &principal,
//! )?;
//!
//! let stats = reports.statistics(None, None)?;
//! assert_eq!(stats.total_count, 1);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod clients;
pub mod deliveries;
pub mod error;
pub mod filter;
pub mod models;
pub mod reports;
pub mod store;

pub use auth::{AccessPolicy, AuthorizationGate, Operation};
pub use clients::ClientRegistry;
pub use deliveries::{DeliveryFilters, DeliveryStore};
pub use error::{EngineError, Result};
pub use filter::SearchFilter;
pub use reports::ReportEngine;
pub use store::MemoryStore;
