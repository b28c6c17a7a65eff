//! Delivery status enum.

use serde::{Deserialize, Serialize};

/// Error returned when a status literal is not one of the four known values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid status: {0}")]
pub struct InvalidStatus(pub String);

/// Lifecycle status of a delivery.
///
/// This is a flat enumeration, not a state machine: any status may move to
/// any other status, including reopening a delivered or canceled record.
/// Guarded transitions must not be introduced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Booked for a future date; the initial status when none is supplied.
    #[default]
    Scheduled,
    /// Out with a driver.
    InTransit,
    /// Completed.
    Delivered,
    /// Called off; the record is kept.
    Canceled,
}

impl DeliveryStatus {
    /// All statuses in declaration order.
    ///
    /// Reports iterate this to zero-fill per-status breakdowns.
    pub const ALL: [Self; 4] = [
        Self::Scheduled,
        Self::InTransit,
        Self::Delivered,
        Self::Canceled,
    ];

    /// The snake_case wire form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "canceled" => Ok(Self::Canceled),
            _ => Err(InvalidStatus(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_scheduled() {
        assert_eq!(DeliveryStatus::default(), DeliveryStatus::Scheduled);
    }

    #[test]
    fn test_from_str_accepts_all_wire_forms() {
        for status in DeliveryStatus::ALL {
            let parsed: DeliveryStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "unknown".parse::<DeliveryStatus>().unwrap_err();
        assert_eq!(err, InvalidStatus("unknown".to_owned()));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&DeliveryStatus::InTransit).unwrap();
        assert_eq!(json, "\"in_transit\"");

        let parsed: DeliveryStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(parsed, DeliveryStatus::Canceled);
    }
}
