use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;

use bazaar_auth::NewIdentity;
use bazaar_infra::StoreError;

use crate::app::errors::{self, ApiError};
use crate::app::services::AppServices;
use crate::app::{contracts, dto};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register).get(list))
        .route("/login", post(login))
}

// ───────────────────────────── Handlers ─────────────────────────────

async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    errors::normalize(errors::REGISTER_USER, register_pipeline(services, body).await)
}

async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    errors::normalize(errors::LOGIN_USER, login_pipeline(services, body).await)
}

async fn list(Extension(services): Extension<Arc<AppServices>>) -> Response {
    errors::normalize(errors::LIST_USERS, list_pipeline(services).await)
}

// ───────────────────────────── Pipelines ─────────────────────────────

async fn register_pipeline(
    services: Arc<AppServices>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let mut payload = errors::require_json(body)?;
    bazaar_validate::normalize::credentials(&mut payload);
    contracts::registration().validate(&payload)?;
    let request: dto::RegisterRequest =
        serde_json::from_value(payload).map_err(ApiError::unexpected)?;

    let password_hash = services
        .credentials
        .hash_password(&request.password)
        .await
        .map_err(ApiError::unexpected)?;

    let identity = services
        .identities
        .create(NewIdentity {
            username: request.username,
            email: request.email,
            password_hash,
        })
        .await
        .map_err(|err| match err {
            StoreError::Duplicate(field) => {
                tracing::warn!(field, "registration rejected: duplicate identity");
                ApiError::Conflict("User already exists")
            }
            other => ApiError::unexpected(other),
        })?;

    tracing::info!(id = %identity.id, username = %identity.username, "user registered");
    Ok((StatusCode::CREATED, Json(dto::identity_to_json(&identity))).into_response())
}

async fn login_pipeline(
    services: Arc<AppServices>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let mut payload = errors::require_json(body)?;
    bazaar_validate::normalize::credentials(&mut payload);
    contracts::login().validate(&payload)?;
    let request: dto::LoginRequest =
        serde_json::from_value(payload).map_err(ApiError::unexpected)?;

    let identity = services
        .identities
        .find_by_username(&request.username)
        .await
        .map_err(ApiError::unexpected)?
        .ok_or_else(|| {
            tracing::warn!(username = %request.username, "login rejected: unknown user");
            ApiError::Unauthenticated("User not found")
        })?;

    let password_matches = services
        .credentials
        .verify_password(&request.password, &identity.password_hash)
        .await
        .map_err(ApiError::unexpected)?;
    if !password_matches {
        tracing::warn!(username = %identity.username, "login rejected: wrong password");
        return Err(ApiError::Unauthenticated("Invalid password"));
    }

    let token = services
        .credentials
        .issue_token(identity.id, services.token_ttl)
        .map_err(ApiError::unexpected)?;

    tracing::info!(id = %identity.id, username = %identity.username, "user logged in");
    Ok(Json(dto::TokenResponse { token }).into_response())
}

async fn list_pipeline(services: Arc<AppServices>) -> Result<Response, ApiError> {
    let identities = services
        .identities
        .list()
        .await
        .map_err(ApiError::unexpected)?;
    let users: Vec<Value> = identities.iter().map(dto::identity_to_json).collect();
    Ok(Json(users).into_response())
}
