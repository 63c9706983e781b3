//! `bazaar-infra` — storage capabilities behind trait objects.
//!
//! The traits here are the seam between the request pipeline and whatever
//! actually persists data: handlers receive `Arc<dyn …>` at the composition
//! root and make no storage assumptions. The in-memory implementations back
//! dev runs and black-box tests; SQL/object-storage backends would implement
//! the same traits.

pub mod blob;
pub mod memory;
pub mod store;

pub use blob::{BlobError, BlobStore};
pub use memory::{InMemoryBlobStore, InMemoryIdentityStore, InMemoryProductStore};
pub use store::{IdentityStore, ProductStore, StoreError};
