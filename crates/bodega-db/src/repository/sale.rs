//! # Sale Repository
//!
//! The checkout transaction and sale history queries.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Transaction                            │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    1. INSERT sale header (total = 0, fresh transaction id)          │
//! │    2. For each cart line, in cart order:                            │
//! │       a. SELECT product             → missing? ──► ROLLBACK         │
//! │       b. stock >= quantity?         → short?   ──► ROLLBACK         │
//! │       c. INSERT sale item (price snapshot, line total)              │
//! │       d. UPDATE stock = stock - qty WHERE stock >= qty              │
//! │          0 rows touched?            → raced?   ──► ROLLBACK         │
//! │    3. UPDATE sale header with the accumulated total                 │
//! │  COMMIT                                                             │
//! │                                                                     │
//! │  Every early return drops the transaction guard, which rolls        │
//! │  back all writes. Other connections never observe a partial sale.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Isolation
//! The decrement in step 2d is a compare-and-set: together with
//! SQLite's single-writer transactions it guarantees two concurrent
//! checkouts cannot both take the last unit of a product.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bodega_core::{CartLine, Money, Sale, SaleItem};

// =============================================================================
// Row & Result Types
// =============================================================================

/// What a committed checkout returns to the caller.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub sale_id: i64,
    pub transaction_id: String,
    pub total: Money,
}

/// A sale row with the cashier's username joined on.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleWithCashier {
    #[sqlx(flatten)]
    pub sale: Sale,
    pub cashier_name: Option<String>,
}

/// A sale item row with product name and barcode joined on.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleItemDetails {
    #[sqlx(flatten)]
    pub item: SaleItem,
    pub product_name: String,
    pub barcode: Option<String>,
}

/// A sale with all of its line items.
#[derive(Debug, Clone)]
pub struct SaleDetails {
    pub sale: SaleWithCashier,
    pub items: Vec<SaleItemDetails>,
}

/// Filter for the sale history listing.
#[derive(Debug, Clone)]
pub struct SaleHistoryFilter {
    /// Inclusive date range; applied only when both ends are present.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: i64,
    pub limit: i64,
}

impl Default for SaleHistoryFilter {
    fn default() -> Self {
        SaleHistoryFilter {
            start_date: None,
            end_date: None,
            page: 1,
            limit: 20,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Processes a cart into a committed sale, atomically.
    ///
    /// ## Contract
    /// - `lines` must already be validated (non-empty, positive
    ///   quantities); this function enforces the stock preconditions.
    /// - On success: one sale row, one item row per line in cart order,
    ///   stock decremented per line, header total = sum of line totals.
    /// - On any failure: nothing is persisted and stock is untouched.
    ///   The error names the product and the shortfall where relevant.
    /// - Resubmitting the same cart after a failure creates a new,
    ///   independent sale; there is no payload dedup.
    pub async fn checkout(
        &self,
        cashier_id: i64,
        lines: &[CartLine],
        payment_method: &str,
    ) -> DbResult<CheckoutReceipt> {
        debug!(
            cashier_id = %cashier_id,
            line_count = lines.len(),
            "Starting checkout"
        );

        // The guard rolls back on drop, so every `?` below aborts cleanly.
        let mut tx = self.pool.begin().await?;

        let transaction_id = generate_transaction_id();
        let now = Utc::now();

        // Header first so line items can reference it; the total is
        // written once after all lines are priced.
        let header = sqlx::query(
            r#"
            INSERT INTO sales (transaction_id, cashier_id, total_amount_cents,
                               payment_method, created_at)
            VALUES (?1, ?2, 0, ?3, ?4)
            "#,
        )
        .bind(&transaction_id)
        .bind(cashier_id)
        .bind(payment_method)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let sale_id = header.last_insert_rowid();
        let mut total = Money::zero();

        for line in lines {
            let row = sqlx::query_as::<_, (String, i64, i64)>(
                "SELECT name, price_cents, stock FROM products WHERE id = ?1",
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let (name, price_cents, stock) =
                row.ok_or_else(|| DbError::not_found("Product", line.product_id))?;

            if stock < line.quantity {
                return Err(DbError::insufficient_stock(name, stock, line.quantity));
            }

            // Snapshot the price: later catalog edits must not change
            // this sale's totals.
            let unit_price = Money::from_cents(price_cents);
            let line_total = unit_price.multiply_quantity(line.quantity);
            total += line_total;

            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity,
                                        unit_price_cents, line_total_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(unit_price.cents())
            .bind(line_total.cents())
            .execute(&mut *tx)
            .await?;

            // Compare-and-set decrement: the WHERE clause re-checks the
            // stock so a concurrent sale cannot push it below zero.
            let updated = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - ?1, updated_at = ?2
                WHERE id = ?3 AND stock >= ?1
                "#,
            )
            .bind(line.quantity)
            .bind(now)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                return Err(DbError::insufficient_stock(name, stock, line.quantity));
            }
        }

        sqlx::query("UPDATE sales SET total_amount_cents = ?2 WHERE id = ?1")
            .bind(sale_id)
            .bind(total.cents())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            sale_id = %sale_id,
            transaction_id = %transaction_id,
            total = %total,
            "Sale committed"
        );

        Ok(CheckoutReceipt {
            sale_id,
            transaction_id,
            total,
        })
    }

    /// Lists sales newest-first, optionally filtered to a date range,
    /// paginated.
    pub async fn list(&self, filter: &SaleHistoryFilter) -> DbResult<Vec<SaleWithCashier>> {
        let page = filter.page.max(1);
        let limit = filter.limit.max(1);
        let offset = (page - 1) * limit;

        let sales = match (filter.start_date, filter.end_date) {
            (Some(start), Some(end)) => {
                sqlx::query_as::<_, SaleWithCashier>(
                    r#"
                    SELECT s.id, s.transaction_id, s.cashier_id,
                           s.total_amount_cents, s.payment_method, s.created_at,
                           u.username AS cashier_name
                    FROM sales s
                    LEFT JOIN users u ON s.cashier_id = u.id
                    WHERE DATE(s.created_at) BETWEEN ?1 AND ?2
                    ORDER BY s.created_at DESC
                    LIMIT ?3 OFFSET ?4
                    "#,
                )
                .bind(start)
                .bind(end)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, SaleWithCashier>(
                    r#"
                    SELECT s.id, s.transaction_id, s.cashier_id,
                           s.total_amount_cents, s.payment_method, s.created_at,
                           u.username AS cashier_name
                    FROM sales s
                    LEFT JOIN users u ON s.cashier_id = u.id
                    ORDER BY s.created_at DESC
                    LIMIT ?1 OFFSET ?2
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(sales)
    }

    /// Gets a sale with its line items, or None if the sale id is unknown.
    pub async fn get_with_items(&self, id: i64) -> DbResult<Option<SaleDetails>> {
        let sale = sqlx::query_as::<_, SaleWithCashier>(
            r#"
            SELECT s.id, s.transaction_id, s.cashier_id,
                   s.total_amount_cents, s.payment_method, s.created_at,
                   u.username AS cashier_name
            FROM sales s
            LEFT JOIN users u ON s.cashier_id = u.id
            WHERE s.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(sale) = sale else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SaleItemDetails>(
            r#"
            SELECT si.id, si.sale_id, si.product_id, si.quantity,
                   si.unit_price_cents, si.line_total_cents,
                   p.name AS product_name, p.barcode
            FROM sale_items si
            JOIN products p ON si.product_id = p.id
            WHERE si.sale_id = ?1
            ORDER BY si.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(SaleDetails { sale, items }))
    }
}

/// Generates a transaction identifier: `TXN-<UTC timestamp>-<suffix>`.
///
/// A timestamp alone is not guaranteed unique under concurrent
/// requests, so the suffix carries 8 hex chars of a UUIDv4.
fn generate_transaction_id() -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let entropy = Uuid::new_v4().simple().to_string();
    format!("TXN-{}-{}", timestamp, &entropy[..8])
}

// =============================================================================
// Unit Tests
// =============================================================================
