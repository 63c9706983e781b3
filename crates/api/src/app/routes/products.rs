use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::rejection::JsonRejection,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use bazaar_auth::ownership;
use bazaar_core::ResourceId;
use bazaar_products::{Product, ProductDraft, ProductUpdate};

use crate::app::errors::{self, ApiError, Operation};
use crate::app::services::AppServices;
use crate::app::{contracts, dto};
use crate::context::AuthContext;
use crate::middleware;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete_one))
        .route("/:id/image", put(attach_image))
}

// ───────────────────────────── Handlers ─────────────────────────────

async fn list(Extension(services): Extension<Arc<AppServices>>) -> Response {
    errors::normalize(errors::LIST_PRODUCTS, list_pipeline(services).await)
}

async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    errors::normalize(errors::GET_PRODUCT, get_pipeline(services, id).await)
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    errors::normalize(
        errors::CREATE_PRODUCT,
        create_pipeline(services, headers, body).await,
    )
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    errors::normalize(
        errors::UPDATE_PRODUCT,
        update_pipeline(services, id, headers, body).await,
    )
}

async fn delete_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    errors::normalize(
        errors::DELETE_PRODUCT,
        delete_pipeline(services, id, headers).await,
    )
}

async fn attach_image(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    errors::normalize(
        errors::ATTACH_IMAGE,
        attach_image_pipeline(services, id, headers, body).await,
    )
}

// ───────────────────────────── Pipelines ─────────────────────────────

async fn list_pipeline(services: Arc<AppServices>) -> Result<Response, ApiError> {
    let products = services
        .products
        .list()
        .await
        .map_err(ApiError::unexpected)?;
    Ok(Json(products).into_response())
}

async fn get_pipeline(services: Arc<AppServices>, id: String) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let product = services
        .products
        .find_by_id(id)
        .await
        .map_err(ApiError::unexpected)?
        .ok_or_else(|| not_found(errors::GET_PRODUCT, id))?;
    Ok(Json(product).into_response())
}

async fn create_pipeline(
    services: Arc<AppServices>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = errors::require_json(body)?;
    contracts::product().validate(&payload)?;
    let body: dto::ProductBody = serde_json::from_value(payload).map_err(ApiError::unexpected)?;

    let requester =
        middleware::authenticate(&services.credentials, services.identities.as_ref(), &headers)
            .await?;

    let product = services
        .products
        .create(ProductDraft {
            owner: requester.username().to_string(),
            title: body.title,
            price: body.price,
            description: body.description,
        })
        .await
        .map_err(ApiError::unexpected)?;

    tracing::info!(id = %product.id, owner = %product.owner, "product created");
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

async fn update_pipeline(
    services: Arc<AppServices>,
    id: String,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let payload = errors::require_json(body)?;
    contracts::product().validate(&payload)?;
    let body: dto::ProductBody = serde_json::from_value(payload).map_err(ApiError::unexpected)?;

    let requester =
        middleware::authenticate(&services.credentials, services.identities.as_ref(), &headers)
            .await?;

    let product = services
        .products
        .find_by_id(id)
        .await
        .map_err(ApiError::unexpected)?
        .ok_or_else(|| not_found(errors::UPDATE_PRODUCT, id))?;
    ensure_owner(errors::UPDATE_PRODUCT, &requester, &product)?;

    let updated = services
        .products
        .update(
            id,
            ProductUpdate {
                title: body.title,
                price: body.price,
                description: body.description,
            },
        )
        .await
        .map_err(ApiError::unexpected)?
        .ok_or_else(|| not_found(errors::UPDATE_PRODUCT, id))?;

    tracing::info!(id = %updated.id, "product updated");
    Ok(Json(updated).into_response())
}

async fn delete_pipeline(
    services: Arc<AppServices>,
    id: String,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    let requester =
        middleware::authenticate(&services.credentials, services.identities.as_ref(), &headers)
            .await?;

    let product = services
        .products
        .find_by_id(id)
        .await
        .map_err(ApiError::unexpected)?
        .ok_or_else(|| not_found(errors::DELETE_PRODUCT, id))?;
    ensure_owner(errors::DELETE_PRODUCT, &requester, &product)?;

    let removed = services
        .products
        .delete(id)
        .await
        .map_err(ApiError::unexpected)?
        .ok_or_else(|| not_found(errors::DELETE_PRODUCT, id))?;

    tracing::info!(id = %removed.id, "product deleted");
    Ok(Json(removed).into_response())
}

async fn attach_image_pipeline(
    services: Arc<AppServices>,
    id: String,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let extension = image_extension(&headers)?;

    let requester =
        middleware::authenticate(&services.credentials, services.identities.as_ref(), &headers)
            .await?;

    let product = services
        .products
        .find_by_id(id)
        .await
        .map_err(ApiError::unexpected)?
        .ok_or_else(|| not_found(errors::ATTACH_IMAGE, id))?;
    ensure_owner(errors::ATTACH_IMAGE, &requester, &product)?;

    let key = format!("images/{}/{}.{}", product.owner, id, extension);
    let reference = services
        .blobs
        .put(&key, body.to_vec())
        .await
        .map_err(ApiError::unexpected)?;

    let updated = services
        .products
        .attach_image(id, reference)
        .await
        .map_err(ApiError::unexpected)?
        .ok_or_else(|| not_found(errors::ATTACH_IMAGE, id))?;

    tracing::info!(id = %updated.id, "image attached");
    Ok(Json(updated).into_response())
}

// ───────────────────────────── Helpers ─────────────────────────────

/// Path ids must parse before any store access.
fn parse_id(id: &str) -> Result<ResourceId, ApiError> {
    id.parse().map_err(|_| ApiError::invalid_id())
}

fn not_found(op: Operation, id: ResourceId) -> ApiError {
    tracing::warn!(operation = op.name, %id, "product not found");
    ApiError::NotFound("Product doesnt exists")
}

/// Ownership guard. Runs only after the product has been located, so a
/// missing product reads as 404 rather than 403.
fn ensure_owner(
    op: Operation,
    requester: &AuthContext,
    product: &Product,
) -> Result<(), ApiError> {
    if ownership::decide(requester.username(), &product.owner).is_allowed() {
        return Ok(());
    }
    tracing::warn!(
        operation = op.name,
        id = %product.id,
        requester = requester.username(),
        owner = %product.owner,
        "requester does not own the product"
    );
    Err(ApiError::Forbidden)
}

/// Stored-file extension for the upload, from the request content type.
fn image_extension(headers: &HeaderMap) -> Result<&'static str, ApiError> {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    match media_type {
        "image/png" => Ok("png"),
        "image/jpeg" => Ok("jpg"),
        "image/gif" => Ok("gif"),
        "image/webp" => Ok("webp"),
        _ => Err(ApiError::Validation(vec![
            "Unsupported image type".to_string(),
        ])),
    }
}
