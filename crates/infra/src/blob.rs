//! Blob store capability trait.

use thiserror::Error;

/// Failure writing to the blob store.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("blob write rejected: {0}")]
    Rejected(String),

    #[error("blob store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed blob persistence for uploaded images.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`, overwriting any previous content, and
    /// return a retrievable reference.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, BlobError>;
}
