//! Login and registration handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password};
use crate::error::ApiError;
use crate::routes::MessageResponse;
use crate::AppState;
use bodega_core::validation::{validate_password, validate_username};
use bodega_core::Role;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user: never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (username, password) = match (req.username, req.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(ApiError::validation(
                "Username and password are required",
            ))
        }
    };

    let user = state.db.users().find_by_username(&username).await?;

    // Unknown user and wrong password get the same answer, so the
    // endpoint does not leak which usernames exist.
    let user = match user {
        Some(u) if verify_password(&password, &u.password_hash) => u,
        _ => {
            warn!(username = %username, "Failed login attempt");
            return Err(ApiError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }
    };

    let token = state.jwt.generate_token(&user)?;

    info!(user_id = %user.id, role = ?user.role, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserInfo {
            id: user.id,
            username: user.username,
            role: user.role,
        },
    }))
}

/// `POST /auth/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (username, password) = match (req.username, req.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(ApiError::validation(
                "Username and password are required",
            ))
        }
    };

    validate_username(&username)?;
    validate_password(&password)?;

    let role = match req.role.as_deref() {
        None => Role::default(),
        Some(value) => Role::parse(value)
            .ok_or_else(|| ApiError::validation("role must be one of: admin, cashier"))?,
    };

    let password_hash = hash_password(&password)?;
    let user_id = state
        .db
        .users()
        .create(username.trim(), &password_hash, role)
        .await?;

    info!(user_id = %user_id, role = ?role, "User registered");

    Ok(Json(MessageResponse::new("User created successfully")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::test_state;

    async fn register_user(
        state: &Arc<AppState>,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        register(
            State(state.clone()),
            Json(RegisterRequest {
                username: Some(username.to_string()),
                password: Some(password.to_string()),
                role: role.map(str::to_string),
            }),
        )
        .await
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = test_state().await;
        register_user(&state, "admin", "admin123", Some("admin"))
            .await
            .unwrap();

        let response = login(
            State(state.clone()),
            Json(LoginRequest {
                username: Some("admin".to_string()),
                password: Some("admin123".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.user.username, "admin");
        assert_eq!(response.0.user.role, Role::Admin);

        // The token decodes back to the same identity
        let claims = state.jwt.validate_token(&response.0.token).unwrap();
        assert_eq!(claims.sub, response.0.user.id);
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = test_state().await;
        register_user(&state, "maria", "secret", None).await.unwrap();

        let err = login(
            State(state.clone()),
            Json(LoginRequest {
                username: Some("maria".to_string()),
                password: Some("wrong".to_string()),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_same_message() {
        let state = test_state().await;

        let err = login(
            State(state.clone()),
            Json(LoginRequest {
                username: Some("ghost".to_string()),
                password: Some("whatever".to_string()),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Unauthorized(m) if m == "Invalid username or password"
        ));
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let state = test_state().await;

        let err = login(
            State(state.clone()),
            Json(LoginRequest {
                username: Some("maria".to_string()),
                password: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_defaults_to_cashier() {
        let state = test_state().await;
        register_user(&state, "maria", "secret", None).await.unwrap();

        let user = state
            .db
            .users()
            .find_by_username("maria")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, Role::Cashier);
        // The stored credential is a hash, never the cleartext
        assert_ne!(user.password_hash, "secret");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let state = test_state().await;
        register_user(&state, "maria", "secret", None).await.unwrap();

        let err = register_user(&state, "maria", "other", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Conflict(m) if m == "Username already exists"
        ));
    }

    #[tokio::test]
    async fn test_register_unknown_role() {
        let state = test_state().await;
        let err = register_user(&state, "maria", "secret", Some("owner"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
