//! Seed an in-memory demo dataset and print reports.
//!
//! The dataset is random but shaped like production traffic: a handful of
//! clients, deliveries spread over the last few months with mixed statuses,
//! and one or two line items each. Useful for eyeballing report output
//! without a persistence layer behind the engine.

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use tracing::info;

use dispatch_core::{DeliveryStatus, Principal, PrincipalId, ReportPeriod, Role};
use dispatch_engine::clients::ClientRegistry;
use dispatch_engine::deliveries::DeliveryStore;
use dispatch_engine::models::{LineItem, NewClient, NewDelivery};
use dispatch_engine::reports::ReportEngine;
use dispatch_engine::store::MemoryStore;

use crate::config::DemoConfig;

const COMPANY_NAMES: &[&str] = &[
    "Acme Freight",
    "Globex Logistics",
    "Initech Supply",
    "Umbrella Wholesale",
    "Stark Distribution",
    "Wayne Imports",
    "Tyrell Parts",
    "Wonka Goods",
];

const PRODUCT_NAMES: &[&str] = &["Widget", "Gearbox", "Pallet", "Crate", "Drum", "Spool"];

const DRIVER_NAMES: &[&str] = &["Dana", "Marcos", "Lee", "Priya"];

/// Seed and print dashboard statistics.
///
/// # Errors
///
/// Returns an error if seeding or report generation fails.
pub fn stats(
    clients: Option<usize>,
    deliveries: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = seed(clients, deliveries)?;
    let reports = ReportEngine::new(store);

    let statistics = reports.statistics(None, None)?;
    print_json(&serde_json::to_string_pretty(&statistics)?);
    Ok(())
}

/// Seed and print a rolling-window performance report.
///
/// # Errors
///
/// Returns an error for an unknown period literal or if seeding fails.
pub fn performance(
    clients: Option<usize>,
    deliveries: Option<usize>,
    period: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let period: ReportPeriod = period.parse()?;
    let store = seed(clients, deliveries)?;
    let reports = ReportEngine::new(store);

    let report = reports.performance_report(period)?;
    print_json(&serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Build a seeded store. Flags win over env-configured sizes.
fn seed(
    clients: Option<usize>,
    deliveries: Option<usize>,
) -> Result<MemoryStore, Box<dyn std::error::Error>> {
    let config = DemoConfig::from_env()?;
    let client_count = clients.unwrap_or(config.clients);
    let delivery_count = deliveries.unwrap_or(config.deliveries);

    let store = MemoryStore::new();
    let registry = ClientRegistry::new(store.clone());
    let delivery_store = DeliveryStore::new(store.clone());
    let principal = Principal::new(PrincipalId::generate(), Role::Operator);

    let mut rng = rand::rng();

    let mut client_ids = Vec::with_capacity(client_count);
    for i in 0..client_count {
        let name = COMPANY_NAMES
            .get(i % COMPANY_NAMES.len())
            .copied()
            .unwrap_or("Client");
        let name = if i < COMPANY_NAMES.len() {
            name.to_owned()
        } else {
            format!("{name} {}", i / COMPANY_NAMES.len() + 1)
        };
        let client = registry.create(NewClient {
            name,
            phone: Some(format!("555-{:04}", rng.random_range(0..10_000))),
            ..NewClient::default()
        })?;
        client_ids.push(client.id);
    }

    let statuses = DeliveryStatus::ALL;
    for _ in 0..delivery_count {
        let Some(&client) = client_ids.choose(&mut rng) else {
            break;
        };
        let items: Vec<LineItem> = (0..rng.random_range(1..=2))
            .map(|_| LineItem {
                name: (*PRODUCT_NAMES.choose(&mut rng).unwrap_or(&"Widget")).to_owned(),
                quantity: rng.random_range(1..=12),
                unit_price: Decimal::new(rng.random_range(100..20_000), 2),
            })
            .collect();
        // Stored total is deliberately independent of the line items.
        let total_value = Decimal::new(rng.random_range(1_000..500_000), 2);

        let created = delivery_store.create(
            NewDelivery {
                client,
                scheduled_date: Utc::now() - Duration::days(rng.random_range(0..180)),
                driver: DRIVER_NAMES.choose(&mut rng).map(|d| (*d).to_owned()),
                status: None,
                total_value,
                line_items: items,
                notes: None,
            },
            &principal,
        )?;

        if let Some(&status) = statuses.choose(&mut rng)
            && status != DeliveryStatus::Scheduled
        {
            delivery_store.transition_status(created.delivery.id, status.as_str(), &principal)?;
        }
    }

    info!(
        clients = client_count,
        deliveries = delivery_count,
        "demo dataset seeded"
    );
    Ok(store)
}

#[allow(clippy::print_stdout)]
fn print_json(json: &str) {
    println!("{json}");
}
