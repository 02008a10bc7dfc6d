//! Savings routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::{AppState, middleware::CurrentUser};
use kredia_core::savings::{SavingsAccount, SavingsError, TransactionKind, TransactionRecord};

/// Creates the savings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/savings", get(get_savings))
        .route("/savings/deposit", post(deposit))
        .route("/savings/withdraw", post(withdraw))
        .route("/savings/transactions", get(list_transactions))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for deposits and withdrawals.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount to move. Must be strictly positive.
    pub amount: Decimal,
}

/// Response for the savings account.
#[derive(Debug, Serialize)]
pub struct SavingsResponse {
    /// Account ID.
    pub account_id: Uuid,
    /// Current balance.
    pub balance: Decimal,
    /// Account creation timestamp.
    pub created_at: String,
}

impl From<SavingsAccount> for SavingsResponse {
    fn from(account: SavingsAccount) -> Self {
        Self {
            account_id: account.id,
            balance: account.balance,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

/// Response for one transaction record.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Record ID.
    pub id: Uuid,
    /// Movement direction.
    pub kind: TransactionKind,
    /// Amount moved.
    pub amount: Decimal,
    /// Balance snapshot after this record.
    pub balance_after: Decimal,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            amount: record.amount,
            balance_after: record.balance_after,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

fn savings_failure(err: &SavingsError) -> Response {
    warn!(error = %err, "Savings operation failed");
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/savings` - The caller's account and balance, created lazily.
async fn get_savings(State(state): State<AppState>, user: CurrentUser) -> Response {
    match state.savings.account(user.identity()).await {
        Ok(account) => (StatusCode::OK, Json(SavingsResponse::from(account))).into_response(),
        Err(e) => savings_failure(&e),
    }
}

/// POST `/savings/deposit` - Deposit into the caller's account.
async fn deposit(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AmountRequest>,
) -> Response {
    match state.savings.deposit(user.identity(), payload.amount).await {
        Ok(account) => (StatusCode::OK, Json(SavingsResponse::from(account))).into_response(),
        Err(e) => savings_failure(&e),
    }
}

/// POST `/savings/withdraw` - Withdraw from the caller's account.
async fn withdraw(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AmountRequest>,
) -> Response {
    match state.savings.withdraw(user.identity(), payload.amount).await {
        Ok(account) => (StatusCode::OK, Json(SavingsResponse::from(account))).into_response(),
        Err(e) => savings_failure(&e),
    }
}

/// GET `/savings/transactions` - Full transaction history, oldest first.
async fn list_transactions(State(state): State<AppState>, user: CurrentUser) -> Response {
    match state.savings.transactions(user.identity()).await {
        Ok(records) => {
            let items: Vec<TransactionResponse> =
                records.into_iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(json!({ "transactions": items }))).into_response()
        }
        Err(e) => savings_failure(&e),
    }
}
