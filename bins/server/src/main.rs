//! Kredia API Server
//!
//! Main entry point for the Kredia backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use kredia_api::{AppState, create_router};
use kredia_core::auth::TokenVerifier;
use kredia_core::identity::{Role, UserIdentity};
use kredia_core::loan::LoanEngine;
use kredia_core::savings::SavingsLedger;
use kredia_shared::{AppConfig, JwtConfig, JwtService};
use kredia_store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kredia=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        #[allow(clippy::cast_possible_wrap)]
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
    };
    let jwt_service = Arc::new(JwtService::new(jwt_config));
    info!(
        expires_in_secs = jwt_service.access_token_expires_in(),
        "JWT service configured"
    );

    // Identity provisioning and the durable store are external
    // collaborators; the in-memory store stands in behind the same traits.
    let store = Arc::new(MemoryStore::new());
    seed_demo_users(&store, &jwt_service)?;

    // Create application state
    let state = AppState {
        verifier: TokenVerifier::new(Arc::clone(&jwt_service), store.clone()),
        loans: Arc::new(LoanEngine::new(store.clone())),
        savings: Arc::new(SavingsLedger::new(store.clone())),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Seeds demo identities and logs ready-to-use bearer tokens so the API
/// can be exercised without an external identity provider.
fn seed_demo_users(store: &MemoryStore, jwt: &JwtService) -> anyhow::Result<()> {
    let users = [
        UserIdentity {
            id: Uuid::new_v4(),
            name: "Demo Member".to_string(),
            email: "member@kredia.dev".to_string(),
            role: Role::Member,
        },
        UserIdentity {
            id: Uuid::new_v4(),
            name: "Demo Reviewer".to_string(),
            email: "reviewer@kredia.dev".to_string(),
            role: Role::Admin,
        },
    ];

    for user in users {
        let token = jwt.issue_token(user.id)?;
        info!(
            user_id = %user.id,
            email = %user.email,
            role = ?user.role,
            %token,
            "Seeded demo user"
        );
        store.seed_user(user);
    }
    Ok(())
}
