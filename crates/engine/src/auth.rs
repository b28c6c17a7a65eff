//! Authorization gate.
//!
//! Credential issuance and verification live outside this crate; callers
//! arrive with an already-authenticated [`Principal`] (or none). The gate
//! evaluates a single declarative policy table mapping operations to access
//! policies, so the one asymmetry in the system - user management is
//! admin-only while every other operation is open to any authenticated
//! principal - is explicit configuration rather than scattered checks.
//!
//! Do not add role requirements to client or delivery operations here; the
//! open policy on those surfaces is contract, not an oversight.

use serde::{Deserialize, Serialize};

use dispatch_core::{Principal, Role};

use crate::error::{EngineError, Result};

/// Every operation the gate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ClientCreate,
    ClientRead,
    ClientUpdate,
    ClientDelete,
    ClientSearch,
    DeliveryCreate,
    DeliveryRead,
    DeliveryUpdate,
    DeliveryDelete,
    DeliveryTransition,
    DeliverySearch,
    Reports,
    /// The separate admin-only user-account CRUD surface.
    UserManagement,
}

/// What an operation demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPolicy {
    /// Any authenticated principal, regardless of role.
    AuthenticatedOnly,
    /// An authenticated principal holding this exact role.
    RequireRole(Role),
}

impl Operation {
    /// The policy table.
    #[must_use]
    pub const fn policy(self) -> AccessPolicy {
        match self {
            Self::UserManagement => AccessPolicy::RequireRole(Role::Admin),
            Self::ClientCreate
            | Self::ClientRead
            | Self::ClientUpdate
            | Self::ClientDelete
            | Self::ClientSearch
            | Self::DeliveryCreate
            | Self::DeliveryRead
            | Self::DeliveryUpdate
            | Self::DeliveryDelete
            | Self::DeliveryTransition
            | Self::DeliverySearch
            | Self::Reports => AccessPolicy::AuthenticatedOnly,
        }
    }
}

/// Evaluates the policy table against a caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Check a caller against an operation's policy and hand back the
    /// principal for audit stamping.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Unauthenticated`] when no principal is
    /// supplied and [`EngineError::Unauthorized`] when the policy demands
    /// a role the principal does not hold.
    pub fn authorize<'p>(
        &self,
        principal: Option<&'p Principal>,
        operation: Operation,
    ) -> Result<&'p Principal> {
        let principal = principal.ok_or(EngineError::Unauthenticated)?;
        match operation.policy() {
            AccessPolicy::AuthenticatedOnly => Ok(principal),
            AccessPolicy::RequireRole(role) if principal.role == role => Ok(principal),
            AccessPolicy::RequireRole(role) => Err(EngineError::Unauthorized(format!(
                "requires role {role}"
            ))),
        }
    }
}
