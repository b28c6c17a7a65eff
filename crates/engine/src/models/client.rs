//! Client record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dispatch_core::ClientId;

/// Postal address, all parts optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub zip: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// A registered client that deliveries reference.
///
/// No uniqueness constraint exists on name or email; two clients with the
/// same name are distinct records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    /// Required, non-empty.
    pub name: String,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`crate::clients::ClientRegistry::create`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
}

/// Partial update for a client. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
}

impl ClientPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.tax_id.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
    }
}

/// The short client projection joined onto delivery rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<&Client> for ClientSummary {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
        }
    }
}

impl Client {
    /// Materialize a record from create input: generated id, fresh
    /// timestamps.
    #[must_use]
    pub fn from_new(data: NewClient) -> Self {
        let now = Utc::now();
        Self {
            id: ClientId::generate(),
            name: data.name,
            tax_id: data.tax_id,
            phone: data.phone,
            email: data.email,
            address: data.address,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update and refresh `updated_at`.
    pub fn apply(&mut self, patch: ClientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(tax_id) = patch.tax_id {
            self.tax_id = Some(tax_id);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        self.updated_at = Utc::now();
    }
}
