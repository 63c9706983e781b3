use bazaar_core::ResourceId;

/// Authenticated identity for a request.
///
/// Built by the authentication step after the bearer token is verified
/// and its subject resolved against the identity store. Handlers thread
/// this into ownership checks; it is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    id: ResourceId,
    username: String,
}

impl AuthContext {
    pub fn new(id: ResourceId, username: String) -> Self {
        Self { id, username }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Canonical username; the ownership guard compares against this.
    pub fn username(&self) -> &str {
        &self.username
    }
}
