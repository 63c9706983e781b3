//! `bazaar-auth` — identities, credentials, and the ownership guard.
//!
//! This crate is intentionally decoupled from HTTP and storage: it holds the
//! identity record, the password/token service, and the pure ownership
//! decision. Wiring them into a request pipeline is the API layer's job.

pub mod credentials;
pub mod identity;
pub mod ownership;

pub use credentials::{Claims, CredentialError, Credentials, TokenError};
pub use identity::{Identity, NewIdentity};
pub use ownership::{OwnerDecision, decide};
