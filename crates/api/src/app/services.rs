use std::sync::Arc;

use chrono::Duration;

use bazaar_auth::Credentials;
use bazaar_infra::{
    BlobStore, IdentityStore, InMemoryBlobStore, InMemoryIdentityStore, InMemoryProductStore,
    ProductStore,
};

use super::AppConfig;

/// Shared service handles, threaded to every handler via `Extension`.
///
/// Stores are trait objects so handlers never know which backend is wired
/// in; the in-memory implementations back dev runs and black-box tests.
pub struct AppServices {
    pub credentials: Credentials,
    pub identities: Arc<dyn IdentityStore>,
    pub products: Arc<dyn ProductStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub token_ttl: Duration,
}

/// In-memory infra wiring (dev/test): state lives for the process only.
pub fn build_services(config: &AppConfig) -> AppServices {
    AppServices {
        credentials: Credentials::new(config.token_secret.as_bytes(), config.bcrypt_cost),
        identities: Arc::new(InMemoryIdentityStore::new()),
        products: Arc::new(InMemoryProductStore::new()),
        blobs: Arc::new(InMemoryBlobStore::new()),
        token_ttl: config.token_ttl,
    }
}
