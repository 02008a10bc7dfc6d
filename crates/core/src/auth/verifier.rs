//! Token verification against the signing key and the identity store.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use kredia_shared::{JwtError, JwtService};

use super::error::AuthError;
use crate::identity::UserIdentity;
use crate::store::{IdentityStore, StoreError};

/// Verifies bearer credentials and resolves them to identity records.
///
/// Verification is read-only and stateless: signature, then expiry, then
/// identity resolution. No revocation list is consulted.
#[derive(Clone)]
pub struct TokenVerifier {
    jwt: Arc<JwtService>,
    identities: Arc<dyn IdentityStore>,
}

impl TokenVerifier {
    /// Creates a verifier over the given JWT service and identity store.
    #[must_use]
    pub fn new(jwt: Arc<JwtService>, identities: Arc<dyn IdentityStore>) -> Self {
        Self { jwt, identities }
    }

    /// Verifies a raw credential string and resolves the embedded user id.
    ///
    /// # Errors
    ///
    /// - `AuthError::InvalidToken` if the string is malformed or the
    ///   signature does not verify
    /// - `AuthError::ExpiredToken` if the expiry has passed, regardless of
    ///   signature validity
    /// - `AuthError::UnknownUser` if the embedded user id does not resolve
    /// - `AuthError::Unavailable` if the identity store cannot be reached
    pub async fn verify(&self, raw: &str) -> Result<UserIdentity, AuthError> {
        let claims = self.jwt.validate_token(raw).map_err(|e| match e {
            JwtError::Expired => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        self.resolve(claims.user_id()).await
    }

    async fn resolve(&self, user_id: Uuid) -> Result<UserIdentity, AuthError> {
        match self.identities.resolve_user(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                debug!(%user_id, "token subject has no identity record");
                Err(AuthError::UnknownUser(user_id))
            }
            Err(StoreError::Unavailable(reason)) => Err(AuthError::Unavailable(reason)),
            Err(e) => Err(AuthError::Unavailable(e.to_string())),
        }
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}
