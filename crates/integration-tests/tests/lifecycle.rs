//! End-to-end delivery lifecycle tests.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use rust_decimal::Decimal;

use dispatch_core::{ClientId, DeliveryStatus};
use dispatch_engine::EngineError;
use dispatch_engine::deliveries::DeliveryFilters;
use dispatch_engine::models::{DeliveryPatch, LineItem, NewDelivery};
use dispatch_integration_tests::{TestContext, date};

#[test]
fn create_against_unknown_client_persists_nothing() {
    let ctx = TestContext::new();

    let err = ctx
        .deliveries
        .create(
            NewDelivery {
                client: ClientId::generate(),
                scheduled_date: date(10),
                driver: None,
                status: None,
                total_value: Decimal::TEN,
                line_items: vec![],
                notes: None,
            },
            &ctx.principal,
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "client not found");
    assert!(ctx.deliveries.list(&DeliveryFilters::default()).unwrap().is_empty());
}

#[test]
fn stored_total_value_is_never_recomputed() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");

    // 20.0 happens to equal 2 x 10.0; the coincidence must not matter.
    let created = ctx
        .deliveries
        .create(
            NewDelivery {
                client: acme.id,
                scheduled_date: date(10),
                driver: None,
                status: None,
                total_value: Decimal::new(200, 1),
                line_items: vec![LineItem {
                    name: "Widget".to_owned(),
                    quantity: 2,
                    unit_price: Decimal::new(100, 1),
                }],
                notes: None,
            },
            &ctx.principal,
        )
        .unwrap();
    assert_eq!(created.delivery.total_value, Decimal::new(200, 1));

    // Changing the unit price afterward leaves the total untouched.
    let updated = ctx
        .deliveries
        .update(
            created.delivery.id,
            DeliveryPatch {
                line_items: Some(vec![LineItem {
                    name: "Widget".to_owned(),
                    quantity: 2,
                    unit_price: Decimal::new(375, 1),
                }]),
                ..DeliveryPatch::default()
            },
            &ctx.principal,
        )
        .unwrap();
    assert_eq!(updated.delivery.total_value, Decimal::new(200, 1));
}

#[test]
fn any_status_may_move_to_any_other_status() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    let id = ctx.create_delivery(acme.id, 10, Decimal::TEN).delivery.id;

    for (literal, expected) in [
        ("delivered", DeliveryStatus::Delivered),
        ("scheduled", DeliveryStatus::Scheduled),
        ("canceled", DeliveryStatus::Canceled),
        ("in_transit", DeliveryStatus::InTransit),
    ] {
        let updated = ctx
            .deliveries
            .transition_status(id, literal, &ctx.principal)
            .unwrap();
        assert_eq!(updated.delivery.status, expected);
    }
}

#[test]
fn invalid_status_literal_leaves_record_unchanged() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    let id = ctx.create_delivery(acme.id, 10, Decimal::TEN).delivery.id;

    ctx.deliveries
        .transition_status(id, "delivered", &ctx.principal)
        .unwrap();

    let err = ctx
        .deliveries
        .transition_status(id, "unknown", &ctx.principal)
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let detail = ctx.deliveries.get(id).unwrap();
    assert_eq!(detail.delivery.status, DeliveryStatus::Delivered);
}

#[test]
fn omitted_status_defaults_to_scheduled_end_to_end() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");

    let created = ctx
        .deliveries
        .create(
            NewDelivery {
                client: acme.id,
                scheduled_date: Utc::now(),
                driver: None,
                status: None,
                total_value: Decimal::new(500, 1),
                line_items: vec![],
                notes: None,
            },
            &ctx.principal,
        )
        .unwrap();
    assert_eq!(created.delivery.status, DeliveryStatus::Scheduled);

    let delivered = ctx
        .deliveries
        .list(&DeliveryFilters {
            status: Some(DeliveryStatus::Delivered),
            ..DeliveryFilters::default()
        })
        .unwrap();
    assert!(delivered.is_empty());

    let report = ctx
        .reports
        .performance_report(dispatch_core::ReportPeriod::Month)
        .unwrap();
    assert_eq!(report.total_count, 1);
    assert_eq!(report.per_status_counts.scheduled, 1);
}

#[test]
fn deleting_a_referenced_client_leaves_the_delivery_intact() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    let id = ctx.create_delivery(acme.id, 10, Decimal::TEN).delivery.id;

    ctx.registry.delete(acme.id).unwrap();

    // Delivery untouched; joins go stale instead of failing.
    let detail = ctx.deliveries.get(id).unwrap();
    assert_eq!(detail.delivery.client, acme.id);
    assert!(detail.client.is_none());

    let listed = ctx.deliveries.list(&DeliveryFilters::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed.first().unwrap().client.is_none());
}

#[test]
fn audit_stamps_follow_the_acting_principal() {
    let ctx = TestContext::new();
    let other = dispatch_core::Principal::new(
        dispatch_core::PrincipalId::generate(),
        dispatch_core::Role::Manager,
    );
    let acme = ctx.create_client("Acme");
    let id = ctx.create_delivery(acme.id, 10, Decimal::TEN).delivery.id;

    let updated = ctx
        .deliveries
        .transition_status(id, "in_transit", &other)
        .unwrap();
    assert_eq!(updated.delivery.created_by, ctx.principal.id);
    assert_eq!(updated.delivery.updated_by, other.id);
}
