//! # Report Repository
//!
//! Read-only SQL aggregations for the dashboard. No mutation happens
//! here; every method is a plain read over committed sales.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::repository::sale::SaleWithCashier;
use bodega_core::{Product, ReportGrouping};

// =============================================================================
// Result Types
// =============================================================================

/// Transaction count and revenue for one time bucket.
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct PeriodTotals {
    pub transactions: i64,
    pub revenue_cents: i64,
}

/// Everything the dashboard landing page needs in one fetch.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub today: PeriodTotals,
    pub month: PeriodTotals,
    pub total_products: i64,
    pub low_stock: Vec<Product>,
    pub recent_sales: Vec<SaleWithCashier>,
}

/// One bucket of the grouped sales report.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SalesPeriodRow {
    pub period: String,
    pub transactions: i64,
    pub revenue_cents: i64,
}

/// One row of the top-sellers report.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopProductRow {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub total_sold: i64,
    pub total_revenue_cents: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for dashboard aggregations.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Collects the dashboard landing-page numbers: today's and this
    /// month's totals, catalog size, low-stock products, and the ten
    /// most recent sales.
    pub async fn dashboard_stats(&self, low_stock_threshold: i64) -> DbResult<DashboardStats> {
        let today = sqlx::query_as::<_, PeriodTotals>(
            r#"
            SELECT COUNT(*) AS transactions,
                   COALESCE(SUM(total_amount_cents), 0) AS revenue_cents
            FROM sales
            WHERE DATE(created_at) = DATE('now')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let month = sqlx::query_as::<_, PeriodTotals>(
            r#"
            SELECT COUNT(*) AS transactions,
                   COALESCE(SUM(total_amount_cents), 0) AS revenue_cents
            FROM sales
            WHERE strftime('%Y-%m', created_at) = strftime('%Y-%m', 'now')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let total_products = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let low_stock = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, stock, category, description,
                   created_at, updated_at
            FROM products
            WHERE stock <= ?1
            ORDER BY stock ASC
            "#,
        )
        .bind(low_stock_threshold)
        .fetch_all(&self.pool)
        .await?;

        let recent_sales = sqlx::query_as::<_, SaleWithCashier>(
            r#"
            SELECT s.id, s.transaction_id, s.cashier_id,
                   s.total_amount_cents, s.payment_method, s.created_at,
                   u.username AS cashier_name
            FROM sales s
            LEFT JOIN users u ON s.cashier_id = u.id
            ORDER BY s.created_at DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardStats {
            today,
            month,
            total_products,
            low_stock,
            recent_sales,
        })
    }

    /// Sales grouped into day/week/month buckets over an inclusive
    /// date range, oldest bucket first.
    pub async fn sales_by_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        grouping: ReportGrouping,
    ) -> DbResult<Vec<SalesPeriodRow>> {
        let date_format = match grouping {
            ReportGrouping::Day => "%Y-%m-%d",
            ReportGrouping::Week => "%Y-%W",
            ReportGrouping::Month => "%Y-%m",
        };

        let rows = sqlx::query_as::<_, SalesPeriodRow>(
            r#"
            SELECT strftime(?1, created_at) AS period,
                   COUNT(*) AS transactions,
                   SUM(total_amount_cents) AS revenue_cents
            FROM sales
            WHERE DATE(created_at) BETWEEN ?2 AND ?3
            GROUP BY period
            ORDER BY period ASC
            "#,
        )
        .bind(date_format)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Top products by quantity sold, optionally restricted to a date
    /// range on the owning sale.
    pub async fn top_products(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
        limit: i64,
    ) -> DbResult<Vec<TopProductRow>> {
        let limit = limit.max(1);

        let rows = match range {
            Some((start, end)) => {
                sqlx::query_as::<_, TopProductRow>(
                    r#"
                    SELECT p.id, p.name, p.price_cents,
                           SUM(si.quantity) AS total_sold,
                           SUM(si.line_total_cents) AS total_revenue_cents
                    FROM sale_items si
                    JOIN products p ON si.product_id = p.id
                    JOIN sales s ON si.sale_id = s.id
                    WHERE DATE(s.created_at) BETWEEN ?1 AND ?2
                    GROUP BY p.id, p.name, p.price_cents
                    ORDER BY total_sold DESC
                    LIMIT ?3
                    "#,
                )
                .bind(start)
                .bind(end)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TopProductRow>(
                    r#"
                    SELECT p.id, p.name, p.price_cents,
                           SUM(si.quantity) AS total_sold,
                           SUM(si.line_total_cents) AS total_revenue_cents
                    FROM sale_items si
                    JOIN products p ON si.product_id = p.id
                    JOIN sales s ON si.sale_id = s.id
                    GROUP BY p.id, p.name, p.price_cents
                    ORDER BY total_sold DESC
                    LIMIT ?1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
