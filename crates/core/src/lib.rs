//! Core business logic for Kredia.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! All domain types, state machines, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Stateless bearer token verification
//! - `identity` - User identity records
//! - `loan` - Loan application lifecycle and repayment terms
//! - `savings` - Savings accounts and the append-only transaction ledger
//! - `store` - Domain store contracts consumed by the engines

pub mod auth;
pub mod identity;
pub mod loan;
pub mod savings;
pub mod store;

mod sync;
