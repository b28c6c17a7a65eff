//! Delivery record types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dispatch_core::{ClientId, DeliveryId, DeliveryStatus, PrincipalId};

use super::client::{Client, ClientSummary};

/// A quantity/unit-price entry embedded in a delivery.
///
/// Value object with no identity of its own; it exists only inside its
/// parent delivery and is never separately addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Required, non-empty.
    pub name: String,
    /// At least 1.
    pub quantity: u32,
    /// Non-negative.
    pub unit_price: Decimal,
}

/// A delivery order record.
///
/// `client` is a weak by-id reference: it resolved to a registered client
/// when it was set, but nothing prevents that client from being deleted
/// afterward. `total_value` is stored exactly as supplied and is never
/// recomputed from the line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: DeliveryId,
    pub client: ClientId,
    pub scheduled_date: DateTime<Utc>,
    pub driver: Option<String>,
    pub status: DeliveryStatus,
    pub total_value: Decimal,
    pub line_items: Vec<LineItem>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: PrincipalId,
    pub updated_by: PrincipalId,
}

/// Input for [`crate::deliveries::DeliveryStore::create`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    pub client: ClientId,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub driver: Option<String>,
    /// Defaults to `scheduled` when omitted.
    #[serde(default)]
    pub status: Option<DeliveryStatus>,
    pub total_value: Decimal,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for a delivery. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPatch {
    pub client: Option<ClientId>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub driver: Option<String>,
    pub status: Option<DeliveryStatus>,
    pub total_value: Option<Decimal>,
    pub line_items: Option<Vec<LineItem>>,
    pub notes: Option<String>,
}

/// A delivery row joined with the short client projection.
///
/// `client` is `None` when the referenced client no longer resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryWithClient {
    pub delivery: Delivery,
    pub client: Option<ClientSummary>,
}

/// A delivery joined with the full client record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetail {
    pub delivery: Delivery,
    pub client: Option<Client>,
}

impl Delivery {
    /// Materialize a record from create input: generated id, default
    /// status, fresh timestamps, audit stamps from the caller.
    #[must_use]
    pub fn from_new(data: NewDelivery, principal: PrincipalId) -> Self {
        let now = Utc::now();
        Self {
            id: DeliveryId::generate(),
            client: data.client,
            scheduled_date: data.scheduled_date,
            driver: data.driver,
            status: data.status.unwrap_or_default(),
            total_value: data.total_value,
            line_items: data.line_items,
            notes: data.notes,
            created_at: now,
            updated_at: now,
            created_by: principal,
            updated_by: principal,
        }
    }

    /// Merge a partial update, refresh `updated_at`, and stamp the caller
    /// as `updated_by`.
    pub fn apply(&mut self, patch: DeliveryPatch, principal: PrincipalId) {
        if let Some(client) = patch.client {
            self.client = client;
        }
        if let Some(scheduled_date) = patch.scheduled_date {
            self.scheduled_date = scheduled_date;
        }
        if let Some(driver) = patch.driver {
            self.driver = Some(driver);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(total_value) = patch.total_value {
            self.total_value = total_value;
        }
        if let Some(line_items) = patch.line_items {
            self.line_items = line_items;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now();
        self.updated_by = principal;
    }
}
