//! Policy table evaluation in front of the engine.
//!
//! The gate sits where a transport layer would call it: resolve the
//! principal first, then invoke the operation with the principal it hands
//! back.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use dispatch_core::{Principal, PrincipalId, Role};
use dispatch_engine::auth::{AccessPolicy, AuthorizationGate, Operation};
use dispatch_engine::EngineError;
use dispatch_integration_tests::TestContext;

#[test]
fn every_authenticated_role_may_drive_the_delivery_lifecycle() {
    let ctx = TestContext::new();
    let gate = AuthorizationGate;
    let acme = ctx.create_client("Acme");

    for role in [Role::Admin, Role::Manager, Role::Operator] {
        let caller = Principal::new(PrincipalId::generate(), role);

        let granted = gate
            .authorize(Some(&caller), Operation::DeliveryCreate)
            .unwrap();
        let created = ctx.create_delivery(acme.id, 10, Decimal::TEN);

        let granted = gate
            .authorize(Some(granted), Operation::DeliveryTransition)
            .unwrap();
        let updated = ctx
            .deliveries
            .transition_status(created.delivery.id, "canceled", granted)
            .unwrap();
        assert_eq!(updated.delivery.updated_by, caller.id);
    }
}

#[test]
fn unauthenticated_callers_are_stopped_before_any_operation() {
    let gate = AuthorizationGate;
    for operation in [
        Operation::ClientCreate,
        Operation::DeliveryDelete,
        Operation::Reports,
        Operation::UserManagement,
    ] {
        assert!(matches!(
            gate.authorize(None, operation),
            Err(EngineError::Unauthenticated)
        ));
    }
}

#[test]
fn only_user_management_demands_a_role() {
    let operations = [
        Operation::ClientCreate,
        Operation::ClientRead,
        Operation::ClientUpdate,
        Operation::ClientDelete,
        Operation::ClientSearch,
        Operation::DeliveryCreate,
        Operation::DeliveryRead,
        Operation::DeliveryUpdate,
        Operation::DeliveryDelete,
        Operation::DeliveryTransition,
        Operation::DeliverySearch,
        Operation::Reports,
        Operation::UserManagement,
    ];

    for operation in operations {
        let expected = if operation == Operation::UserManagement {
            AccessPolicy::RequireRole(Role::Admin)
        } else {
            AccessPolicy::AuthenticatedOnly
        };
        assert_eq!(operation.policy(), expected);
    }
}

#[test]
fn non_admin_is_forbidden_from_user_management_only() {
    let gate = AuthorizationGate;
    let operator = Principal::new(PrincipalId::generate(), Role::Operator);

    assert!(matches!(
        gate.authorize(Some(&operator), Operation::UserManagement),
        Err(EngineError::Unauthorized(_))
    ));
    assert!(gate
        .authorize(Some(&operator), Operation::ClientDelete)
        .is_ok());
}
