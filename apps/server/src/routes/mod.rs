//! # REST Routes
//!
//! The full HTTP surface of the server. Handlers stay thin: extract,
//! validate, call a repository, map rows to DTOs.
//!
//! ## Surface
//! ```text
//! POST   /auth/login                  public
//! POST   /auth/register               public
//! GET    /products                    any authenticated user
//! GET    /products/:id                any authenticated user
//! POST   /products                    admin
//! PUT    /products/:id                admin
//! DELETE /products/:id                admin
//! POST   /sales                       any authenticated user
//! GET    /sales                       any authenticated user
//! GET    /sales/:id                   any authenticated user
//! GET    /dashboard/stats             any authenticated user
//! GET    /dashboard/reports/sales     any authenticated user
//! GET    /dashboard/reports/products  any authenticated user
//! GET    /config                      any authenticated user
//! *                                   404 {error}
//! ```

pub mod auth;
pub mod dashboard;
pub mod products;
pub mod sales;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/sales", post(sales::create_sale).get(sales::list_sales))
        .route("/sales/:id", get(sales::get_sale))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/reports/sales", get(dashboard::sales_report))
        .route(
            "/dashboard/reports/products",
            get(dashboard::products_report),
        )
        .route("/config", get(store_config))
        .fallback(not_found)
        .with_state(state)
}

/// Catch-all for unmatched routes.
async fn not_found() -> ApiError {
    ApiError::not_found("Route")
}

/// Plain `{message}` body shared by the mutation endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Parses a `YYYY-MM-DD` query parameter.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("{} must be formatted as YYYY-MM-DD", field)))
}

// =============================================================================
// Store Config Endpoint
// =============================================================================

/// Display-level constants the UI needs; serving them here keeps the
/// VAT rate and the low-stock threshold out of frontend code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfigResponse {
    pub vat_rate_bps: u32,
    pub low_stock_threshold: i64,
}

async fn store_config(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Json<StoreConfigResponse> {
    Json(StoreConfigResponse {
        vat_rate_bps: state.config.vat_rate_bps,
        low_stock_threshold: state.config.low_stock_threshold,
    })
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use bodega_core::Role;
    use bodega_db::{Database, DbConfig};

    use crate::auth::{AdminUser, AuthUser, Claims};
    use crate::config::ServerConfig;
    use crate::AppState;

    /// Builds an AppState over a fresh in-memory database.
    pub async fn test_state() -> Arc<AppState> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = ServerConfig {
            port: 0,
            database_path: ":memory:".to_string(),
            db_max_connections: 1,
            jwt_secret: "test-secret".to_string(),
            token_lifetime_secs: 86400,
            low_stock_threshold: 10,
            vat_rate_bps: 1200,
        };
        Arc::new(AppState::new(db, config))
    }

    fn claims(id: i64, username: &str, role: Role) -> Claims {
        Claims {
            sub: id,
            username: username.to_string(),
            role,
            iat: 0,
            exp: i64::MAX,
            jti: "test".to_string(),
        }
    }

    /// An authenticated cashier identity for direct handler calls.
    pub fn cashier(id: i64) -> AuthUser {
        AuthUser(claims(id, "maria", Role::Cashier))
    }

    /// An authenticated admin identity for direct handler calls.
    pub fn admin(id: i64) -> AdminUser {
        AdminUser(claims(id, "admin", Role::Admin))
    }
}
