use bazaar_core::ResourceId;

/// A stored account identity.
///
/// Deliberately not `Serialize`: the password hash must never travel in a
/// response body, so client-facing projections are built field by field at
/// the API boundary instead of serializing this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: ResourceId,
    /// Unique, stored lower-cased.
    pub username: String,
    /// Unique, stored lower-cased.
    pub email: String,
    /// Adaptive salted hash, never the raw password.
    pub password_hash: String,
}

/// The fields an identity is created from; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewIdentity {
    pub fn into_identity(self, id: ResourceId) -> Identity {
        Identity {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}
