//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for loans and savings
//! - The authentication gate middleware
//! - Request extractors and response types

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use kredia_core::auth::TokenVerifier;
use kredia_core::loan::LoanEngine;
use kredia_core::savings::SavingsLedger;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Token verifier consulted by the auth gate.
    pub verifier: TokenVerifier,
    /// Loan engine.
    pub loans: Arc<LoanEngine>,
    /// Savings ledger.
    pub savings: Arc<SavingsLedger>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .merge(routes::health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
