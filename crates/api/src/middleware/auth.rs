//! Authentication gate for protected routes.
//!
//! The gate performs exactly one verification attempt per request and
//! never retries a token itself; retry, if any, is the caller's concern
//! on the next request. A wrapped handler only ever runs with a resolved
//! identity attached to the request.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use kredia_core::auth::AuthError;
use kredia_core::identity::UserIdentity;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn auth_failure(error: &AuthError) -> Response {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": error.to_string(),
        })),
    )
        .into_response()
}

/// Authentication middleware guarding every protected operation.
///
/// 1. Extracts the Bearer token from the Authorization header; if absent,
///    short-circuits without invoking the verifier.
/// 2. Delegates to the token verifier (signature, expiry, identity).
/// 3. On success, stores the resolved identity in request extensions for
///    handlers to access; on failure, responds unauthorized and never
///    invokes the wrapped operation.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return auth_failure(&AuthError::NoToken);
    };

    match state.verifier.verify(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => auth_failure(&e),
    }
}

/// Extractor for the authenticated user's identity.
///
/// Use this in handlers behind the auth gate:
///
/// ```ignore
/// async fn handler(user: CurrentUser) -> impl IntoResponse {
///     let loans = state.loans.list(user.identity()).await;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserIdentity);

impl CurrentUser {
    /// Returns the resolved identity record.
    #[must_use]
    pub const fn identity(&self) -> &UserIdentity {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserIdentity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}
