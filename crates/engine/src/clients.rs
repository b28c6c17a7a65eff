//! Client registry.
//!
//! Owns client records and the existence lookups the delivery lifecycle
//! depends on. Deletion is unconditional: no check is made for deliveries
//! still referencing the client, so their references go stale and report
//! joins surface the "client not found" sentinel instead.

use tracing::{info, instrument};

use dispatch_core::ClientId;

use crate::error::{EngineError, Result};
use crate::filter::SearchFilter;
use crate::models::{Client, ClientPatch, NewClient};
use crate::store::MemoryStore;

/// Registry of clients that deliveries may reference.
#[derive(Debug, Clone)]
pub struct ClientRegistry {
    store: MemoryStore,
}

impl ClientRegistry {
    /// Create a registry over the shared store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Register a new client.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when the name is empty, and
    /// [`EngineError::Store`] on store failure.
    #[instrument(skip(self, data), fields(name = %data.name))]
    pub fn create(&self, data: NewClient) -> Result<Client> {
        if data.name.trim().is_empty() {
            return Err(EngineError::validation("name is required"));
        }

        let client = Client::from_new(data);
        self.store.clients.insert(client.clone())?;
        info!(client_id = %client.id, "client created");
        Ok(client)
    }

    /// Fetch a client by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the id does not resolve.
    pub fn get(&self, id: ClientId) -> Result<Client> {
        self.store
            .clients
            .get(id)?
            .ok_or_else(|| EngineError::not_found("client not found"))
    }

    /// Merge a partial update into an existing client.
    ///
    /// Only existence is re-validated; the patch fields themselves are
    /// applied as supplied.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the id does not resolve.
    #[instrument(skip(self, patch))]
    pub fn update(&self, id: ClientId, patch: ClientPatch) -> Result<Client> {
        let updated = self
            .store
            .clients
            .modify(id, |client| client.apply(patch))?
            .ok_or_else(|| EngineError::not_found("client not found"))?;
        info!(client_id = %id, "client updated");
        Ok(updated)
    }

    /// Remove a client unconditionally.
    ///
    /// Deliveries referencing the client are neither blocked, modified, nor
    /// cascaded; their references simply stop resolving.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the id does not resolve.
    #[instrument(skip(self))]
    pub fn delete(&self, id: ClientId) -> Result<()> {
        if !self.store.clients.remove(id)? {
            return Err(EngineError::not_found("client not found"));
        }
        info!(client_id = %id, "client deleted");
        Ok(())
    }

    /// All clients in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on store failure.
    pub fn list(&self) -> Result<Vec<Client>> {
        Ok(self.store.clients.scan()?)
    }

    /// Case-insensitive substring search over name, email, phone, tax id,
    /// and address city/state. Results keep the collection order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when the term is missing or
    /// blank.
    #[instrument(skip(self))]
    pub fn search(&self, term: Option<&str>) -> Result<Vec<Client>> {
        let filter = SearchFilter::new(term)?;
        Ok(filter.apply(self.store.clients.scan()?, search_fields))
    }

    /// Existence probe used by the delivery lifecycle when a reference is
    /// set or changed.
    pub(crate) fn resolve(&self, id: ClientId) -> Result<Option<Client>> {
        Ok(self.store.clients.get(id)?)
    }
}

/// The configured field set for client search.
fn search_fields(client: &Client) -> Vec<String> {
    let mut fields = vec![client.name.clone()];
    fields.extend(client.email.clone());
    fields.extend(client.phone.clone());
    fields.extend(client.tax_id.clone());
    if let Some(address) = &client.address {
        fields.extend(address.city.clone());
        fields.extend(address.state.clone());
    }
    fields
}
