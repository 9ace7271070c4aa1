//! # Bodega POS Server
//!
//! REST API for small retail stores: authentication, inventory,
//! sale transactions, and dashboard reporting over SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                 │
//! │                                                                     │
//! │  Browser UI ───► axum (PORT) ───► handlers ───► bodega-db ──► SQLite│
//! │                     │                                               │
//! │                     ▼                                               │
//! │              AuthUser / AdminUser extractors (JWT bearer)           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use crate::auth::JwtManager;
use crate::config::ServerConfig;
use bodega_db::Database;

/// Shared application state, cloned behind an `Arc` into every handler.
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    pub jwt: JwtManager,
}

impl AppState {
    /// Builds the state, deriving the JWT manager from the config.
    pub fn new(db: Database, config: ServerConfig) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.token_lifetime_secs);
        AppState { db, config, jwt }
    }
}
