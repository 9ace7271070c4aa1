//! # User Repository
//!
//! Database operations for login identities.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bodega_core::{Role, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user and returns its row id.
    ///
    /// The password must already be hashed by the caller; this layer
    /// never sees cleartext secrets. A duplicate username surfaces as
    /// `DbError::UniqueViolation`.
    pub async fn create(&self, username: &str, password_hash: &str, role: Role) -> DbResult<i64> {
        debug!(username = %username, role = ?role, "Creating user");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Looks a user up by username (login path).
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by row id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let db = test_db().await;
        let repo = db.users();

        let id = repo.create("admin", "fake-hash", Role::Admin).await.unwrap();
        assert!(id > 0);

        let user = repo.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "admin");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.password_hash, "fake-hash");

        let by_id = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "admin");
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let db = test_db().await;
        let repo = db.users();

        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
        assert!(repo.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = test_db().await;
        let repo = db.users();

        repo.create("maria", "h1", Role::Cashier).await.unwrap();
        let err = repo.create("maria", "h2", Role::Cashier).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
