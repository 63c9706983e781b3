use axum::Router;

pub mod products;
pub mod system;
pub mod users;

/// Router for all domain endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/users", users::router())
        .nest("/products", products::router())
}
