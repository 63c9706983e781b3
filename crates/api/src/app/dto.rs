use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use bazaar_auth::Identity;

// -------------------------
// Request DTOs
// -------------------------
//
// Deserialized from payloads that already passed their contract, so the
// field types here are guaranteed present and correctly typed.

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub title: String,
    pub price: f64,
    pub description: String,
}

// -------------------------
// Response DTOs / JSON mapping helpers
// -------------------------

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Client-facing projection of an identity, built field by field so the
/// password hash cannot leak through a derived `Serialize`.
pub fn identity_to_json(identity: &Identity) -> Value {
    json!({
        "id": identity.id,
        "username": identity.username,
        "email": identity.email,
    })
}
