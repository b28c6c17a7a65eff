//! In-memory record store.
//!
//! Stands in for the externally owned persistence engine, which is assumed
//! to provide atomic per-record create/read/update/delete plus a
//! whole-collection scan. Collections keep insertion order, which `list`
//! operations and search results rely on.
//!
//! Concurrent writers follow last-writer-wins semantics: there are no
//! version tokens and no snapshot isolation for scans. A report scanning a
//! collection may observe a record modified mid-scan.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use dispatch_core::{ClientId, DeliveryId};

use crate::models::{Client, Delivery};

/// Errors surfaced by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A lock was poisoned by a panicking writer.
    #[error("record store lock poisoned")]
    Poisoned,
}

/// A record that can be addressed by a typed id.
pub trait Keyed {
    /// Id type for this record.
    type Id: Copy + PartialEq;

    /// The record's id.
    fn id(&self) -> Self::Id;
}

impl Keyed for Client {
    type Id = ClientId;

    fn id(&self) -> ClientId {
        self.id
    }
}

impl Keyed for Delivery {
    type Id = DeliveryId;

    fn id(&self) -> DeliveryId {
        self.id
    }
}

/// An insertion-ordered collection of records with atomic per-record
/// operations.
///
/// Cheap to clone; clones share the same underlying records.
#[derive(Debug)]
pub struct Collection<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Keyed + Clone> Collection<T> {
    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the collection lock is poisoned.
    pub fn insert(&self, record: T) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .push(record);
        Ok(())
    }

    /// Fetch a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the collection lock is poisoned.
    pub fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        Ok(self
            .records
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    /// Atomically read-modify-write a record in place.
    ///
    /// Returns the updated record, or `None` if the id does not resolve.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the collection lock is poisoned.
    pub fn modify(
        &self,
        id: T::Id,
        apply: impl FnOnce(&mut T),
    ) -> Result<Option<T>, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        match records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                apply(record);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    /// Remove a record by id. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the collection lock is poisoned.
    pub fn remove(&self, id: T::Id) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() < before)
    }

    /// Snapshot every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the collection lock is poisoned.
    pub fn scan(&self) -> Result<Vec<T>, StoreError> {
        Ok(self
            .records
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone())
    }

    /// Number of records currently held.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the collection lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    /// Whether the collection holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the collection lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// The shared record store: one collection per entity.
///
/// Cloning is cheap and shares state, so the client registry, delivery
/// store, and report engine all observe the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Registered clients.
    pub clients: Collection<Client>,
    /// Delivery aggregate records, line items embedded.
    pub deliveries: Collection<Delivery>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::NewClient;

    fn client(name: &str) -> Client {
        Client::from_new(NewClient {
            name: name.to_owned(),
            ..NewClient::default()
        })
    }

    #[test]
    fn test_insert_preserves_order() {
        let collection = Collection::default();
        collection.insert(client("a")).unwrap();
        collection.insert(client("b")).unwrap();
        collection.insert(client("c")).unwrap();

        let names: Vec<String> = collection
            .scan()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_get_and_remove() {
        let collection = Collection::default();
        let record = client("a");
        let id = record.id;
        collection.insert(record).unwrap();

        assert!(collection.get(id).unwrap().is_some());
        assert!(collection.remove(id).unwrap());
        assert!(collection.get(id).unwrap().is_none());
        assert!(!collection.remove(id).unwrap());
    }

    #[test]
    fn test_modify_in_place() {
        let collection = Collection::default();
        let record = client("before");
        let id = record.id;
        collection.insert(record).unwrap();

        let updated = collection
            .modify(id, |c| c.name = "after".to_owned())
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "after");
        assert_eq!(collection.get(id).unwrap().unwrap().name, "after");
    }

    #[test]
    fn test_clones_share_records() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.clients.insert(client("shared")).unwrap();
        assert_eq!(other.clients.len().unwrap(), 1);
    }
}
