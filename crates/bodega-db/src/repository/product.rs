//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD used by the inventory screens (create/update/delete are
//!   admin-gated at the API layer)
//! - Catalog listing ordered by name
//! - Low-stock listing for the dashboard
//!
//! Stock decrements do NOT happen here: they are part of the checkout
//! transaction in [`crate::repository::sale`], so the check and the
//! decrement cannot be torn apart.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bodega_core::Product;

/// Field set for creating a product, and for the full-row update
/// semantics of the edit endpoint (every column is rewritten).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub barcode: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalog, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, stock, category, description,
                   created_at, updated_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its row id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, stock, category, description,
                   created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns its row id.
    ///
    /// A duplicate barcode surfaces as `DbError::UniqueViolation`.
    pub async fn create(&self, product: &NewProduct) -> DbResult<i64> {
        debug!(name = %product.name, "Creating product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, barcode, price_cents, stock, category,
                                  description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(&product.name)
        .bind(&product.barcode)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.category)
        .bind(&product.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Rewrites every editable column of a product.
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<()> {
        debug!(id = %id, name = %product.name, "Updating product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, barcode = ?3, price_cents = ?4, stock = ?5,
                category = ?6, description = ?7, updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.barcode)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.category)
        .bind(&product.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Products referenced by historical sale items cannot be removed;
    /// the foreign key surfaces as `DbError::ForeignKeyViolation`.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists products at or below the given stock threshold,
    /// emptiest shelves first.
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, stock, category, description,
                   created_at, updated_at
            FROM products
            WHERE stock <= ?1
            ORDER BY stock ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample(name: &str, barcode: Option<&str>, price_cents: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            barcode: barcode.map(str::to_string),
            price_cents,
            stock,
            category: Some("Staples".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_get_list() {
        let db = test_db().await;
        let repo = db.products();

        let rice = repo
            .create(&sample("Rice (1kg)", Some("7901234567890"), 5500, 50))
            .await
            .unwrap();
        repo.create(&sample("Bread Loaf", None, 4500, 15))
            .await
            .unwrap();

        let product = repo.get_by_id(rice).await.unwrap().unwrap();
        assert_eq!(product.name, "Rice (1kg)");
        assert_eq!(product.price_cents, 5500);
        assert_eq!(product.stock, 50);

        // Listing is ordered by name
        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Bread Loaf");
        assert_eq!(all[1].name, "Rice (1kg)");
    }

    #[tokio::test]
    async fn test_duplicate_barcode_rejected() {
        let db = test_db().await;
        let repo = db.products();

        repo.create(&sample("Rice (1kg)", Some("7901234567890"), 5500, 50))
            .await
            .unwrap();
        let err = repo
            .create(&sample("Rice Copy", Some("7901234567890"), 5500, 50))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        // No second row was created
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = test_db().await;
        let repo = db.products();

        let id = repo
            .create(&sample("Sugar 1kg", None, 6000, 30))
            .await
            .unwrap();

        repo.update(id, &sample("Sugar 1kg", None, 6500, 28))
            .await
            .unwrap();
        let updated = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(updated.price_cents, 6500);
        assert_eq!(updated.stock, 28);

        repo.delete(id).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_product() {
        let db = test_db().await;
        let repo = db.products();

        let err = repo
            .update(999, &sample("Ghost", None, 100, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.delete(999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_low_stock_listing() {
        let db = test_db().await;
        let repo = db.products();

        repo.create(&sample("Plenty", None, 100, 50)).await.unwrap();
        repo.create(&sample("Low", None, 100, 5)).await.unwrap();
        repo.create(&sample("Lower", None, 100, 2)).await.unwrap();
        repo.create(&sample("Edge", None, 100, 10)).await.unwrap();

        let low = repo.low_stock(10).await.unwrap();
        let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
        // Threshold is inclusive, ordered by stock ascending
        assert_eq!(names, vec!["Lower", "Low", "Edge"]);
    }
}
