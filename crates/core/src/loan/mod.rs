//! Loan application lifecycle and repayment terms.
//!
//! A loan application moves along a fixed set of edges:
//! `submitted -> under_review -> {approved | rejected}`,
//! `approved -> disbursed`, `disbursed -> repaying -> closed`.
//! `rejected` and `closed` are terminal. The engine enforces that
//! transitions only occur along these edges and that only the owner
//! (or an administrative reviewer) may act on a loan.

mod engine;
mod error;
mod terms;
mod types;

pub use engine::LoanEngine;
pub use error::LoanError;
pub use terms::{ALLOWED_DURATIONS, LoanTerms, max_principal, min_principal};
pub use types::{Loan, LoanApplication, LoanStatus, LoanUpdate};
