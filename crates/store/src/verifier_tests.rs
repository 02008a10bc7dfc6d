//! Token verifier tests against the in-memory identity store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use kredia_core::auth::{AuthError, TokenVerifier};
use kredia_core::identity::{Role, UserIdentity};
use kredia_shared::{JwtConfig, JwtService};

use crate::MemoryStore;

fn jwt() -> Arc<JwtService> {
    Arc::new(JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: 60,
    }))
}

fn known_user(store: &MemoryStore) -> UserIdentity {
    let user = UserIdentity {
        id: Uuid::new_v4(),
        name: "amina".to_string(),
        email: "amina@example.com".to_string(),
        role: Role::Member,
    };
    store.seed_user(user.clone());
    user
}

#[tokio::test]
async fn test_valid_token_resolves_identity() {
    let store = Arc::new(MemoryStore::new());
    let user = known_user(&store);
    let jwt = jwt();
    let verifier = TokenVerifier::new(Arc::clone(&jwt), store);

    let token = jwt.issue_token(user.id).unwrap();
    let resolved = verifier.verify(&token).await.unwrap();

    assert_eq!(resolved.id, user.id);
    assert_eq!(resolved.email, user.email);
}

#[tokio::test]
async fn test_malformed_token_is_invalid() {
    let store = Arc::new(MemoryStore::new());
    let verifier = TokenVerifier::new(jwt(), store);

    assert!(matches!(
        verifier.verify("not.a.token").await,
        Err(AuthError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_expired_token_beats_signature_validity() {
    let store = Arc::new(MemoryStore::new());
    let user = known_user(&store);
    let jwt = jwt();
    let verifier = TokenVerifier::new(Arc::clone(&jwt), store);

    // Correctly signed, expired an hour ago.
    let token = jwt
        .issue_token_expiring_at(user.id, Utc::now() - Duration::hours(1))
        .unwrap();

    assert!(matches!(
        verifier.verify(&token).await,
        Err(AuthError::ExpiredToken)
    ));
}

#[tokio::test]
async fn test_token_for_unseeded_user_is_unknown() {
    let store = Arc::new(MemoryStore::new());
    let jwt = jwt();
    let verifier = TokenVerifier::new(Arc::clone(&jwt), store);

    let ghost = Uuid::new_v4();
    let token = jwt.issue_token(ghost).unwrap();

    assert!(matches!(
        verifier.verify(&token).await,
        Err(AuthError::UnknownUser(id)) if id == ghost
    ));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_invalid() {
    let store = Arc::new(MemoryStore::new());
    let user = known_user(&store);
    let verifier = TokenVerifier::new(jwt(), store);

    let foreign = JwtService::new(JwtConfig {
        secret: "a-different-secret".to_string(),
        access_token_expires_minutes: 60,
    });
    let token = foreign.issue_token(user.id).unwrap();

    assert!(matches!(
        verifier.verify(&token).await,
        Err(AuthError::InvalidToken)
    ));
}
