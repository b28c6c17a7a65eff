//! Authenticated caller identity.
//!
//! Principals are issued by an external authentication layer; the engine
//! never creates or verifies them, it only consumes the id for audit
//! stamping and the role for the user-management policy check.

use serde::{Deserialize, Serialize};

use super::id::PrincipalId;

/// Role carried by an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access including the user-management surface.
    Admin,
    /// Day-to-day operations management.
    Manager,
    /// Field and dispatch operations.
    Operator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Operator => write!(f, "operator"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "operator" => Ok(Self::Operator),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// An authenticated caller, supplied per call by the authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity stamped onto records on create/update/status transition.
    pub id: PrincipalId,
    /// Role, consulted only by the authorization policy table.
    pub role: Role,
}

impl Principal {
    /// Create a principal from its parts.
    #[must_use]
    pub const fn new(id: PrincipalId, role: Role) -> Self {
        Self { id, role }
    }
}
