//! Stateless bearer token verification.

mod error;
mod verifier;

pub use error::AuthError;
pub use verifier::TokenVerifier;
