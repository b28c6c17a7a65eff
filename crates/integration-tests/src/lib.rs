//! Integration tests for Dispatch.
//!
//! These tests exercise the engine end to end through its public API: the
//! client registry, the delivery lifecycle store, the report engine, and
//! the authorization gate, all sharing one record store the way a deployed
//! instance would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dispatch-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `lifecycle` - delivery creation, mutation, and status transitions
//! - `reports` - aggregation invariants across the reporting surface
//! - `authorization` - policy table evaluation in front of mutations

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use dispatch_core::{ClientId, Principal, PrincipalId, Role};
use dispatch_engine::clients::ClientRegistry;
use dispatch_engine::deliveries::DeliveryStore;
use dispatch_engine::models::{Client, DeliveryWithClient, LineItem, NewClient, NewDelivery};
use dispatch_engine::reports::ReportEngine;
use dispatch_engine::store::MemoryStore;

/// A fully wired engine over one shared store, plus a default principal.
pub struct TestContext {
    pub registry: ClientRegistry,
    pub deliveries: DeliveryStore,
    pub reports: ReportEngine,
    pub principal: Principal,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Wire every component over a fresh shared store.
    #[must_use]
    pub fn new() -> Self {
        let store = MemoryStore::new();
        Self {
            registry: ClientRegistry::new(store.clone()),
            deliveries: DeliveryStore::new(store.clone()),
            reports: ReportEngine::new(store),
            principal: Principal::new(PrincipalId::generate(), Role::Operator),
        }
    }

    /// Register a client with just a name.
    pub fn create_client(&self, name: &str) -> Client {
        self.registry
            .create(NewClient {
                name: name.to_owned(),
                ..NewClient::default()
            })
            .unwrap()
    }

    /// Create a delivery scheduled on the given day of 2024-01.
    pub fn create_delivery(
        &self,
        client: ClientId,
        day: u32,
        total_value: Decimal,
    ) -> DeliveryWithClient {
        self.deliveries
            .create(
                NewDelivery {
                    client,
                    scheduled_date: date(day),
                    driver: None,
                    status: None,
                    total_value,
                    line_items: vec![LineItem {
                        name: "Widget".to_owned(),
                        quantity: 1,
                        unit_price: total_value,
                    }],
                    notes: None,
                },
                &self.principal,
            )
            .unwrap()
    }
}

/// Noon UTC on the given day of 2024-01.
#[must_use]
pub fn date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}
