//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod health;
pub mod loans;
pub mod savings;

/// Creates the API router: every loan and savings route sits behind the
/// authentication gate.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(loans::routes())
        .merge(savings::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
