//! Payload contracts, one per request body shape.
//!
//! Declaration order is the response order: violation messages come back in
//! the order fields are listed here.

use std::sync::OnceLock;

use bazaar_validate::{Field, Schema};

static REGISTRATION: OnceLock<Schema> = OnceLock::new();
static LOGIN: OnceLock<Schema> = OnceLock::new();
static PRODUCT: OnceLock<Schema> = OnceLock::new();

/// Body contract for `POST /users`.
pub fn registration() -> &'static Schema {
    REGISTRATION.get_or_init(|| {
        Schema::new(vec![
            Field::string("username").min_len(3).max_len(30).alphanumeric(),
            Field::string("password").min_len(6).max_len(200),
            Field::string("email").email(),
        ])
    })
}

/// Body contract for `POST /users/login`. Login only checks presence and
/// type; the stored rules already shaped whatever is in the identity store.
pub fn login() -> &'static Schema {
    LOGIN.get_or_init(|| Schema::new(vec![Field::string("username"), Field::string("password")]))
}

/// Body contract for `POST /products` and `PUT /products/{id}`.
pub fn product() -> &'static Schema {
    PRODUCT.get_or_init(|| {
        Schema::new(vec![
            Field::string("title").max_len(100),
            Field::number("price").positive(),
            Field::string("description"),
        ])
    })
}
