//! End-to-end reporting tests.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use dispatch_core::ClientId;
use dispatch_engine::EngineError;
use dispatch_engine::reports::CLIENT_NOT_FOUND;
use dispatch_integration_tests::{TestContext, date};

#[test]
fn per_status_counts_always_sum_to_total() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    let globex = ctx.create_client("Globex");

    let statuses = ["scheduled", "in_transit", "delivered", "canceled", "delivered"];
    for (i, status) in statuses.iter().enumerate() {
        let day = u32::try_from(i).unwrap() + 1;
        let client = if i % 2 == 0 { acme.id } else { globex.id };
        let created = ctx.create_delivery(client, day, Decimal::new(100 * (i as i64 + 1), 1));
        ctx.deliveries
            .transition_status(created.delivery.id, status, &ctx.principal)
            .unwrap();
    }

    // Unbounded and windowed alike.
    for (from, to) in [
        (None, None),
        (Some(date(1)), Some(date(3))),
        (Some(date(4)), None),
        (None, Some(date(2))),
    ] {
        let stats = ctx.reports.statistics(from, to).unwrap();
        let sum: u64 = stats.per_status.iter().map(|s| s.count).sum();
        assert_eq!(sum, stats.total_count);
        assert_eq!(stats.per_status.len(), 4);
    }
}

#[test]
fn statistics_total_value_sums_stored_totals() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    ctx.create_delivery(acme.id, 1, Decimal::new(1050, 2));
    ctx.create_delivery(acme.id, 2, Decimal::new(950, 2));

    let stats = ctx.reports.statistics(None, None).unwrap();
    assert_eq!(stats.total_value, Decimal::new(2000, 2));
    assert_eq!(stats.per_client.len(), 1);
    assert_eq!(stats.per_client.first().unwrap().count, 2);
}

#[test]
fn stale_reference_surfaces_sentinel_not_error() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    let globex = ctx.create_client("Globex");
    ctx.create_delivery(acme.id, 1, Decimal::new(300, 0));
    ctx.create_delivery(globex.id, 2, Decimal::new(100, 0));

    ctx.registry.delete(acme.id).unwrap();

    let stats = ctx.reports.statistics(None, None).unwrap();
    let names: Vec<&str> = stats
        .per_client
        .iter()
        .map(|c| c.client_name.as_str())
        .collect();
    // Ranked by value sum; the deleted client still ranks, under the
    // sentinel name.
    assert_eq!(names, [CLIENT_NOT_FOUND, "Globex"]);
}

#[test]
fn client_report_for_missing_client_is_not_found_not_empty() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    ctx.create_delivery(acme.id, 1, Decimal::ONE);

    let err = ctx
        .reports
        .client_report(ClientId::generate(), None, None)
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));

    // Deleting the client makes its own report unavailable too.
    ctx.registry.delete(acme.id).unwrap();
    assert!(matches!(
        ctx.reports.client_report(acme.id, None, None),
        Err(EngineError::NotFound(_))
    ));
}

#[test]
fn period_report_covers_only_the_window() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    ctx.create_delivery(acme.id, 1, Decimal::new(10, 0));
    ctx.create_delivery(acme.id, 15, Decimal::new(20, 0));
    ctx.create_delivery(acme.id, 30, Decimal::new(40, 0));

    let report = ctx
        .reports
        .period_report(Some(date(10)), Some(date(20)))
        .unwrap();
    assert_eq!(report.total_count, 1);
    assert_eq!(report.total_value, Decimal::new(20, 0));
    assert_eq!(
        report
            .deliveries
            .first()
            .unwrap()
            .client_name
            .as_deref(),
        Some("Acme")
    );

    assert!(matches!(
        ctx.reports.period_report(Some(date(10)), None),
        Err(EngineError::Validation(_))
    ));
}

#[test]
fn statistics_serialize_with_camel_case_wire_names() {
    let ctx = TestContext::new();
    let acme = ctx.create_client("Acme");
    ctx.create_delivery(acme.id, 1, Decimal::new(10, 0));

    let stats = ctx.reports.statistics(None, None).unwrap();
    let json = serde_json::to_value(&stats).unwrap();

    assert_eq!(json["totalCount"], 1);
    assert!(json["perStatus"].is_array());
    assert_eq!(json["perClient"][0]["clientName"], "Acme");
    assert!(json["perClient"][0]["valueSum"].is_string());
}

#[test]
fn search_term_is_mandatory_on_both_surfaces() {
    let ctx = TestContext::new();
    ctx.create_client("Acme");

    assert!(matches!(
        ctx.registry.search(None),
        Err(EngineError::Validation(_))
    ));
    assert!(matches!(
        ctx.registry.search(Some("")),
        Err(EngineError::Validation(_))
    ));
    assert!(matches!(
        ctx.deliveries.search(Some("  ")),
        Err(EngineError::Validation(_))
    ));
}
