//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, once, at startup. Nothing else in the codebase reads the
//! environment.

use std::env;

use bodega_core::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_VAT_RATE_BPS};

/// Server configuration.
///
/// | Variable              | Default                                  |
/// |-----------------------|------------------------------------------|
/// | `PORT`                | `3000`                                   |
/// | `DATABASE_PATH`       | `./bodega.db`                            |
/// | `DB_MAX_CONNECTIONS`  | `5`                                      |
/// | `JWT_SECRET`          | dev-only placeholder                     |
/// | `TOKEN_LIFETIME_SECS` | `86400` (24 hours)                       |
/// | `LOW_STOCK_THRESHOLD` | `10`                                     |
/// | `VAT_RATE_BPS`        | `1200` (12%, display-level only)         |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub port: u16,

    /// Path to the SQLite database file.
    pub database_path: String,

    /// Upper bound on concurrent database connections. Requests past
    /// the bound queue on the pool's acquire timeout.
    pub db_max_connections: u32,

    /// Secret key for signing bearer tokens.
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds.
    pub token_lifetime_secs: i64,

    /// Stock level at or below which products appear in low-stock
    /// dashboard listings.
    pub low_stock_threshold: i64,

    /// Display-level VAT rate in basis points, served to the UI via
    /// GET /config. Never added to stored sale totals.
    pub vat_rate_bps: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./bodega.db".to_string()),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                // Development fallback only.
                // In production, this MUST be set via environment variable
                "bodega-dev-secret-change-in-production".to_string()
            }),

            token_lifetime_secs: env::var("TOKEN_LIFETIME_SECS")
                .unwrap_or_else(|_| "86400".to_string()) // 24 hours
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TOKEN_LIFETIME_SECS".to_string()))?,

            low_stock_threshold: env::var("LOW_STOCK_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_LOW_STOCK_THRESHOLD.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LOW_STOCK_THRESHOLD".to_string()))?,

            vat_rate_bps: env::var("VAT_RATE_BPS")
                .unwrap_or_else(|_| DEFAULT_VAT_RATE_BPS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("VAT_RATE_BPS".to_string()))?,
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
