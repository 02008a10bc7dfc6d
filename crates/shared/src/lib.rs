//! Shared types, JWT handling, and configuration for Kredia.
//!
//! This crate provides the pieces used across all other crates:
//! - Bearer token claims and the signing/verification service
//! - Application configuration management
//!
//! Nothing in here touches the web layer or the domain store.

pub mod auth;
pub mod config;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
