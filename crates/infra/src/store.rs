//! Resource store capability traits.

use thiserror::Error;

use bazaar_auth::{Identity, NewIdentity};
use bazaar_core::ResourceId;
use bazaar_products::{Product, ProductDraft, ProductUpdate};

/// Storage failure, as seen by the request pipeline.
///
/// `Duplicate` is the one storage outcome with its own response shape
/// (a conflict); everything else is an internal failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for unique field '{0}'")]
    Duplicate(&'static str),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for account identities.
///
/// `username` and `email` are unique keys. Both are stored lower-cased and
/// lookups expect that canonical form; callers normalize before reaching
/// the store.
#[async_trait::async_trait]
pub trait IdentityStore: Send + Sync {
    /// Persist a new identity, assigning its id.
    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError>;

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<Identity>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError>;

    async fn list(&self) -> Result<Vec<Identity>, StoreError>;
}

/// Persistence for products.
///
/// Mutations return `Ok(None)` when the id is unknown so callers can
/// distinguish "nothing there" from a storage failure.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product, assigning its id.
    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError>;

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<Product>, StoreError>;

    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Replace the caller-editable fields.
    async fn update(
        &self,
        id: ResourceId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StoreError>;

    /// Record a stored image reference.
    async fn attach_image(
        &self,
        id: ResourceId,
        reference: String,
    ) -> Result<Option<Product>, StoreError>;

    /// Remove and return the product.
    async fn delete(&self, id: ResourceId) -> Result<Option<Product>, StoreError>;
}
