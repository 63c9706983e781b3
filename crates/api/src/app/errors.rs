//! Consistent error responses.
//!
//! Every non-2xx outcome renders the same body shape, `{"messages": [...]}`,
//! so clients parse one envelope regardless of which pipeline step refused
//! the request. Handlers return `Result<Response, ApiError>` and wrap the
//! whole pipeline in [`normalize`], which is the only place status codes,
//! bodies, and failure logs are produced.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use bazaar_validate::Violations;

/// Body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub messages: Vec<String>,
}

pub fn envelope(status: StatusCode, messages: Vec<String>) -> Response {
    (status, Json(ErrorEnvelope { messages })).into_response()
}

/// Everything a request pipeline can refuse or fail with.
///
/// The first five variants are deliberate verdicts about the request; their
/// messages are chosen at the rejection site and rendered as-is.
/// `Unexpected` is for infrastructure giving out underneath us.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400, one message per failed field in schema order.
    #[error("validation failed")]
    Validation(Vec<String>),

    /// 401; the body never says which authentication step failed.
    #[error("unauthenticated")]
    Unauthenticated(&'static str),

    /// 403; the requester is known but does not own the resource.
    #[error("forbidden")]
    Forbidden,

    /// 404 with a resource-specific message.
    #[error("not found")]
    NotFound(&'static str),

    /// 409 with a resource-specific message.
    #[error("conflict")]
    Conflict(&'static str),

    /// 500; the body carries the operation fallback, not the source error.
    #[error(transparent)]
    Unexpected(anyhow::Error),
}

impl ApiError {
    /// Internal failure; detail goes to the log, not the response.
    pub fn unexpected(source: impl Into<anyhow::Error>) -> Self {
        ApiError::Unexpected(source.into())
    }

    /// The one body every authentication failure collapses to.
    pub fn unauthenticated() -> Self {
        ApiError::Unauthenticated("Unauthenticated")
    }

    /// Malformed id in the request path.
    pub fn invalid_id() -> Self {
        ApiError::Validation(vec!["Invalid ID".to_string()])
    }
}

impl From<Violations> for ApiError {
    fn from(violations: Violations) -> Self {
        ApiError::Validation(violations.into_messages())
    }
}

/// A named pipeline, for failure logs and 500 bodies.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    /// Body of a 500 when the source error must stay internal.
    pub fallback: &'static str,
    /// Let the source error's own message through on a 500. Only image
    /// uploads do this; their collaborator errors are safe to show.
    pub expose_source: bool,
}

pub const REGISTER_USER: Operation = Operation {
    name: "users.register",
    fallback: "Error creating user",
    expose_source: false,
};

pub const LOGIN_USER: Operation = Operation {
    name: "users.login",
    fallback: "Error logging in",
    expose_source: false,
};

pub const LIST_USERS: Operation = Operation {
    name: "users.list",
    fallback: "Error listing users",
    expose_source: false,
};

pub const LIST_PRODUCTS: Operation = Operation {
    name: "products.list",
    fallback: "Error listing products",
    expose_source: false,
};

pub const GET_PRODUCT: Operation = Operation {
    name: "products.get",
    fallback: "Error getting product",
    expose_source: false,
};

pub const CREATE_PRODUCT: Operation = Operation {
    name: "products.create",
    fallback: "Error creating product",
    expose_source: false,
};

pub const UPDATE_PRODUCT: Operation = Operation {
    name: "products.update",
    fallback: "Error updating product",
    expose_source: false,
};

pub const DELETE_PRODUCT: Operation = Operation {
    name: "products.delete",
    fallback: "Error deleting product",
    expose_source: false,
};

pub const ATTACH_IMAGE: Operation = Operation {
    name: "products.attach_image",
    fallback: "Error attaching image",
    expose_source: true,
};

/// Render a pipeline outcome, logging every failure under the operation name.
pub fn normalize(op: Operation, result: Result<Response, ApiError>) -> Response {
    match result {
        Ok(response) => response,
        Err(ApiError::Validation(messages)) => {
            tracing::warn!(operation = op.name, ?messages, "payload rejected");
            envelope(StatusCode::BAD_REQUEST, messages)
        }
        Err(ApiError::Unauthenticated(message)) => {
            tracing::warn!(operation = op.name, "request unauthenticated");
            envelope(StatusCode::UNAUTHORIZED, vec![message.to_string()])
        }
        Err(ApiError::Forbidden) => {
            tracing::warn!(operation = op.name, "requester is not the owner");
            envelope(StatusCode::FORBIDDEN, vec!["Forbidden".to_string()])
        }
        Err(ApiError::NotFound(message)) => {
            tracing::warn!(operation = op.name, "resource not found");
            envelope(StatusCode::NOT_FOUND, vec![message.to_string()])
        }
        Err(ApiError::Conflict(message)) => {
            tracing::warn!(operation = op.name, "conflict");
            envelope(StatusCode::CONFLICT, vec![message.to_string()])
        }
        Err(ApiError::Unexpected(source)) => {
            tracing::error!(operation = op.name, error = ?source, "operation failed");
            let message = if op.expose_source {
                source.to_string()
            } else {
                op.fallback.to_string()
            };
            envelope(StatusCode::INTERNAL_SERVER_ERROR, vec![message])
        }
    }
}

/// Unwrap the body extractor; unparseable JSON is a validation failure.
pub fn require_json(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "request body rejected");
            Err(ApiError::Validation(vec!["Invalid request body".to_string()]))
        }
    }
}
