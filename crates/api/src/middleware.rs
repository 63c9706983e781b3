use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use bazaar_auth::Credentials;
use bazaar_infra::IdentityStore;

use crate::app::errors::ApiError;
use crate::context::AuthContext;

/// Authenticate a request from its `Authorization` header.
///
/// Handlers call this explicitly once the payload has passed validation,
/// so a malformed body is reported as a 400 even when the caller is
/// anonymous. Every failure here collapses to the same 401: a caller must
/// not be able to tell a bad token from an unknown subject.
pub async fn authenticate(
    credentials: &Credentials,
    identities: &dyn IdentityStore,
    headers: &HeaderMap,
) -> Result<AuthContext, ApiError> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::warn!(step = "authenticate", "missing or malformed Authorization header");
        ApiError::unauthenticated()
    })?;

    let subject = credentials.verify_token(token).map_err(|err| {
        tracing::warn!(step = "authenticate", error = %err, "token rejected");
        ApiError::unauthenticated()
    })?;

    let identity = match identities.find_by_id(subject).await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            tracing::warn!(step = "authenticate", subject = %subject, "token subject unknown");
            return Err(ApiError::unauthenticated());
        }
        Err(err) => {
            tracing::error!(step = "authenticate", error = %err, "identity lookup failed");
            return Err(ApiError::unauthenticated());
        }
    };

    Ok(AuthContext::new(identity.id, identity.username))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;

    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}

/// One log line per request: method, path, status, elapsed time.
pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );

    response
}
