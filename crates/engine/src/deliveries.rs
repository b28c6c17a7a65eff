//! Delivery lifecycle store.
//!
//! Owns delivery aggregate records (line items embedded), validates client
//! references through the [`ClientRegistry`], applies status changes, and
//! stamps actor ids on every mutation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};

use dispatch_core::{ClientId, DeliveryId, DeliveryStatus, Principal};

use crate::clients::ClientRegistry;
use crate::error::{EngineError, Result};
use crate::filter::SearchFilter;
use crate::models::{
    Delivery, DeliveryDetail, DeliveryPatch, DeliveryWithClient, LineItem, NewDelivery,
};
use crate::store::MemoryStore;

/// Optional predicates for [`DeliveryStore::list`].
#[derive(Debug, Clone, Default)]
pub struct DeliveryFilters {
    /// Exact status match.
    pub status: Option<DeliveryStatus>,
    /// Inclusive lower bound on the scheduled date.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the scheduled date.
    pub date_to: Option<DateTime<Utc>>,
    /// Exact client match.
    pub client: Option<ClientId>,
}

impl DeliveryFilters {
    /// Whether a delivery passes every configured predicate.
    #[must_use]
    pub fn accepts(&self, delivery: &Delivery) -> bool {
        if let Some(status) = self.status
            && delivery.status != status
        {
            return false;
        }
        if let Some(from) = self.date_from
            && delivery.scheduled_date < from
        {
            return false;
        }
        if let Some(to) = self.date_to
            && delivery.scheduled_date > to
        {
            return false;
        }
        if let Some(client) = self.client
            && delivery.client != client
        {
            return false;
        }
        true
    }
}

/// Store of delivery records and their lifecycle operations.
#[derive(Debug, Clone)]
pub struct DeliveryStore {
    store: MemoryStore,
    clients: ClientRegistry,
}

impl DeliveryStore {
    /// Create a delivery store over the shared store.
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        let clients = ClientRegistry::new(store.clone());
        Self { store, clients }
    }

    /// Create a delivery.
    ///
    /// The client reference must resolve at call time; status defaults to
    /// `scheduled` when omitted; the caller is stamped as creator and
    /// updater. Nothing is persisted when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the client does not resolve
    /// and [`EngineError::Validation`] for a negative total value or a
    /// malformed line item.
    #[instrument(skip(self, data, principal), fields(client = %data.client))]
    pub fn create(&self, data: NewDelivery, principal: &Principal) -> Result<DeliveryWithClient> {
        let client = self
            .clients
            .resolve(data.client)?
            .ok_or_else(|| EngineError::not_found("client not found"))?;
        validate_total_value(data.total_value)?;
        validate_line_items(&data.line_items)?;

        let delivery = Delivery::from_new(data, principal.id);
        self.store.deliveries.insert(delivery.clone())?;
        info!(delivery_id = %delivery.id, "delivery created");

        Ok(DeliveryWithClient {
            client: Some((&client).into()),
            delivery,
        })
    }

    /// Merge a partial update into an existing delivery.
    ///
    /// The client reference is re-validated only when the patch actually
    /// changes it. The caller is stamped as updater.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the delivery (or a changed
    /// client reference) does not resolve, and [`EngineError::Validation`]
    /// for a negative total value or malformed line items in the patch.
    #[instrument(skip(self, patch, principal))]
    pub fn update(
        &self,
        id: DeliveryId,
        patch: DeliveryPatch,
        principal: &Principal,
    ) -> Result<DeliveryWithClient> {
        let existing = self
            .store
            .deliveries
            .get(id)?
            .ok_or_else(|| EngineError::not_found("delivery not found"))?;

        if let Some(client) = patch.client
            && client != existing.client
            && self.clients.resolve(client)?.is_none()
        {
            return Err(EngineError::not_found("client not found"));
        }
        if let Some(total_value) = patch.total_value {
            validate_total_value(total_value)?;
        }
        if let Some(line_items) = &patch.line_items {
            validate_line_items(line_items)?;
        }

        let updated = self
            .store
            .deliveries
            .modify(id, |delivery| delivery.apply(patch, principal.id))?
            .ok_or_else(|| EngineError::not_found("delivery not found"))?;
        info!(delivery_id = %id, "delivery updated");

        self.join(updated)
    }

    /// Hard-delete a delivery unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the id does not resolve.
    #[instrument(skip(self))]
    pub fn delete(&self, id: DeliveryId) -> Result<()> {
        if !self.store.deliveries.remove(id)? {
            return Err(EngineError::not_found("delivery not found"));
        }
        info!(delivery_id = %id, "delivery deleted");
        Ok(())
    }

    /// Set a delivery's status from its wire literal.
    ///
    /// The status enum is flat: any status may move to any other status,
    /// including reopening a delivered or canceled record. The literal is
    /// validated before the record is looked up, so an unknown literal
    /// fails the same way regardless of the record's current status.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for a literal outside the four
    /// enum values and [`EngineError::NotFound`] when the id does not
    /// resolve.
    #[instrument(skip(self, principal))]
    pub fn transition_status(
        &self,
        id: DeliveryId,
        status: &str,
        principal: &Principal,
    ) -> Result<DeliveryWithClient> {
        let status: DeliveryStatus = status
            .parse()
            .map_err(|_| EngineError::validation("invalid status"))?;

        let updated = self
            .store
            .deliveries
            .modify(id, |delivery| {
                delivery.status = status;
                delivery.updated_at = Utc::now();
                delivery.updated_by = principal.id;
            })?
            .ok_or_else(|| EngineError::not_found("delivery not found"))?;
        info!(delivery_id = %id, status = %status, "delivery status changed");

        self.join(updated)
    }

    /// Deliveries passing the filters, newest scheduled date first, each
    /// joined with the short client projection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on store failure.
    #[instrument(skip(self, filters))]
    pub fn list(&self, filters: &DeliveryFilters) -> Result<Vec<DeliveryWithClient>> {
        let mut matched: Vec<Delivery> = self
            .store
            .deliveries
            .scan()?
            .into_iter()
            .filter(|d| filters.accepts(d))
            .collect();
        matched.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));

        matched.into_iter().map(|d| self.join(d)).collect()
    }

    /// Fetch a delivery joined with the full client record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the id does not resolve.
    pub fn get(&self, id: DeliveryId) -> Result<DeliveryDetail> {
        let delivery = self
            .store
            .deliveries
            .get(id)?
            .ok_or_else(|| EngineError::not_found("delivery not found"))?;
        let client = self.clients.resolve(delivery.client)?;
        Ok(DeliveryDetail { delivery, client })
    }

    /// Substring search over the joined client name, the notes, and the
    /// decimal string form of the total value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when the term is missing or
    /// blank.
    #[instrument(skip(self))]
    pub fn search(&self, term: Option<&str>) -> Result<Vec<DeliveryWithClient>> {
        let filter = SearchFilter::new(term)?;
        let clients = self.store.clients.scan()?;
        let matched = filter.apply(self.store.deliveries.scan()?, |delivery| {
            let mut fields = vec![delivery.total_value.to_string()];
            fields.extend(delivery.notes.clone());
            if let Some(client) = clients.iter().find(|c| c.id == delivery.client) {
                fields.push(client.name.clone());
            }
            fields
        });

        matched.into_iter().map(|d| self.join(d)).collect()
    }

    /// Join a delivery with the short client projection, tolerating stale
    /// references.
    fn join(&self, delivery: Delivery) -> Result<DeliveryWithClient> {
        let client = self.clients.resolve(delivery.client)?;
        Ok(DeliveryWithClient {
            client: client.as_ref().map(Into::into),
            delivery,
        })
    }
}

fn validate_total_value(total_value: Decimal) -> Result<()> {
    if total_value < Decimal::ZERO {
        return Err(EngineError::validation("total value cannot be negative"));
    }
    Ok(())
}

fn validate_line_items(line_items: &[LineItem]) -> Result<()> {
    for item in line_items {
        if item.name.trim().is_empty() {
            return Err(EngineError::validation("line item name is required"));
        }
        if item.quantity < 1 {
            return Err(EngineError::validation(
                "line item quantity must be at least 1",
            ));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(EngineError::validation(
                "line item unit price cannot be negative",
            ));
        }
    }
    Ok(())
}
