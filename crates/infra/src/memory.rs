//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use bazaar_auth::{Identity, NewIdentity};
use bazaar_core::ResourceId;
use bazaar_products::{Product, ProductDraft, ProductUpdate};

use crate::blob::{BlobError, BlobStore};
use crate::store::{IdentityStore, ProductStore, StoreError};

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

// ───────────────────────────── Identities ─────────────────────────────

/// In-memory identity store keyed by id; iteration follows id order, which
/// is roughly chronological.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    identities: RwLock<BTreeMap<ResourceId, Identity>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        let mut identities = self.identities.write().map_err(|_| poisoned())?;
        if identities
            .values()
            .any(|existing| existing.username == identity.username)
        {
            return Err(StoreError::Duplicate("username"));
        }
        if identities
            .values()
            .any(|existing| existing.email == identity.email)
        {
            return Err(StoreError::Duplicate("email"));
        }
        let stored = identity.into_identity(ResourceId::generate());
        identities.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read().map_err(|_| poisoned())?;
        Ok(identities.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read().map_err(|_| poisoned())?;
        Ok(identities
            .values()
            .find(|identity| identity.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Identity>, StoreError> {
        let identities = self.identities.read().map_err(|_| poisoned())?;
        Ok(identities.values().cloned().collect())
    }
}

// ───────────────────────────── Products ─────────────────────────────

/// In-memory product store keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<BTreeMap<ResourceId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        let stored = draft.into_product(ResourceId::generate());
        products.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.values().cloned().collect())
    }

    async fn update(
        &self,
        id: ResourceId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        let Some(existing) = products.get_mut(&id) else {
            return Ok(None);
        };
        *existing = existing.clone().with_update(update);
        Ok(Some(existing.clone()))
    }

    async fn attach_image(
        &self,
        id: ResourceId,
        reference: String,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        let Some(existing) = products.get_mut(&id) else {
            return Ok(None);
        };
        *existing = existing.clone().with_image(reference);
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: ResourceId) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        Ok(products.remove(&id))
    }
}

// ───────────────────────────── Blobs ─────────────────────────────

/// In-memory blob store. References take the form `mem://<key>`.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under `key`, if any.
    pub fn bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.read().ok()?.get(key).cloned()
    }
}

#[async_trait::async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, BlobError> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| BlobError::Unavailable("lock poisoned".to_string()))?;
        blobs.insert(key.to_string(), bytes);
        Ok(format!("mem://{key}"))
    }
}
