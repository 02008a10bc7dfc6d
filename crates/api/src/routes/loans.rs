//! Loan application routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::{AppState, middleware::CurrentUser};
use kredia_core::loan::{Loan, LoanApplication, LoanError, LoanStatus, LoanUpdate};

/// Creates the loan routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/loans", post(submit_loan))
        .route("/loans", get(list_loans))
        .route("/loans/{id}", get(get_loan))
        .route("/loans/{id}", patch(update_loan))
        .route("/loans/{id}", delete(delete_loan))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for submitting a loan application.
#[derive(Debug, Deserialize)]
pub struct SubmitLoanRequest {
    /// Requested principal.
    pub amount: Decimal,
    /// Free-text purpose.
    pub purpose: String,
    /// Duration in months (3/6/12/18/24).
    pub duration_months: u32,
}

/// Request body for updating a loan.
#[derive(Debug, Deserialize)]
pub struct UpdateLoanRequest {
    /// Requested status transition.
    pub status: Option<LoanStatus>,
    /// Amended purpose (only while submitted).
    pub purpose: Option<String>,
}

/// Response for a loan record.
#[derive(Debug, Serialize)]
pub struct LoanResponse {
    /// Loan ID.
    pub id: Uuid,
    /// Principal amount.
    pub amount: Decimal,
    /// Purpose.
    pub purpose: String,
    /// Duration in months.
    pub duration_months: u32,
    /// Status.
    pub status: LoanStatus,
    /// Monthly payment.
    pub monthly_payment: Decimal,
    /// Upfront processing fee.
    pub processing_fee: Decimal,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id,
            amount: loan.amount,
            purpose: loan.purpose,
            duration_months: loan.duration_months,
            status: loan.status,
            monthly_payment: loan.monthly_payment,
            processing_fee: loan.processing_fee,
            created_at: loan.created_at.to_rfc3339(),
            updated_at: loan.updated_at.to_rfc3339(),
        }
    }
}

fn loan_failure(err: &LoanError) -> Response {
    warn!(error = %err, "Loan operation failed");
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

/// POST `/loans` - Submit a loan application.
async fn submit_loan(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<SubmitLoanRequest>,
) -> Response {
    let application = LoanApplication {
        amount: payload.amount,
        purpose: payload.purpose,
        duration_months: payload.duration_months,
    };

    match state.loans.submit(user.identity(), application).await {
        Ok(loan) => (StatusCode::CREATED, Json(LoanResponse::from(loan))).into_response(),
        Err(e) => loan_failure(&e),
    }
}

/// GET `/loans` - List the caller's loans, most recent first.
async fn list_loans(State(state): State<AppState>, user: CurrentUser) -> Response {
    match state.loans.list(user.identity()).await {
        Ok(loans) => {
            let items: Vec<LoanResponse> = loans.into_iter().map(LoanResponse::from).collect();
            (StatusCode::OK, Json(json!({ "loans": items }))).into_response()
        }
        Err(e) => loan_failure(&e),
    }
}

/// GET `/loans/{id}` - Fetch one loan.
async fn get_loan(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Response {
    match state.loans.get(user.identity(), id).await {
        Ok(loan) => (StatusCode::OK, Json(LoanResponse::from(loan))).into_response(),
        Err(e) => loan_failure(&e),
    }
}

/// PATCH `/loans/{id}` - Apply a status transition or amend the purpose.
async fn update_loan(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLoanRequest>,
) -> Response {
    let update = LoanUpdate {
        status: payload.status,
        purpose: payload.purpose,
    };

    match state.loans.update(user.identity(), id, update).await {
        Ok(loan) => (StatusCode::OK, Json(LoanResponse::from(loan))).into_response(),
        Err(e) => loan_failure(&e),
    }
}

/// DELETE `/loans/{id}` - Delete a loan in a terminal state.
async fn delete_loan(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Response {
    match state.loans.delete(user.identity(), id).await {
        Ok(()) => (StatusCode::NO_CONTENT, ()).into_response(),
        Err(e) => loan_failure(&e),
    }
}
