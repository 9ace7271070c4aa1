//! Dashboard handlers: landing-page stats and the two reports.
//! Read-only; all numbers come from the report repository.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::routes::parse_date;
use crate::routes::products::ProductResponse;
use crate::routes::sales::SaleResponse;
use crate::AppState;
use bodega_core::{Money, ReportGrouping};
use bodega_db::repository::report::PeriodTotals;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PeriodTotalsResponse {
    pub transactions: i64,
    pub revenue: f64,
}

impl From<PeriodTotals> for PeriodTotalsResponse {
    fn from(totals: PeriodTotals) -> Self {
        PeriodTotalsResponse {
            transactions: totals.transactions,
            revenue: Money::from_cents(totals.revenue_cents).to_decimal(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub today_sales: PeriodTotalsResponse,
    pub month_sales: PeriodTotalsResponse,
    pub total_products: i64,
    pub low_stock_products: Vec<ProductResponse>,
    pub recent_sales: Vec<SaleResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SalesReportRow {
    pub period: String,
    pub transactions: i64,
    pub revenue: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

/// Row of the top-sellers report. The aggregate columns keep their
/// SQL names on the wire (`total_sold`, `total_revenue`).
#[derive(Debug, Serialize)]
pub struct ProductsReportRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub total_sold: i64,
    pub total_revenue: f64,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /dashboard/stats`
pub async fn stats(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Json<DashboardStatsResponse>, ApiError> {
    let stats = state
        .db
        .reports()
        .dashboard_stats(state.config.low_stock_threshold)
        .await?;

    Ok(Json(DashboardStatsResponse {
        today_sales: stats.today.into(),
        month_sales: stats.month.into(),
        total_products: stats.total_products,
        low_stock_products: stats.low_stock.into_iter().map(Into::into).collect(),
        recent_sales: stats.recent_sales.into_iter().map(Into::into).collect(),
    }))
}

/// `GET /dashboard/reports/sales`
pub async fn sales_report(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<SalesReportQuery>,
) -> Result<Json<Vec<SalesReportRow>>, ApiError> {
    let (start, end) = match (&query.start_date, &query.end_date) {
        (Some(start), Some(end)) => (
            parse_date("startDate", start)?,
            parse_date("endDate", end)?,
        ),
        _ => {
            return Err(ApiError::validation(
                "Start date and end date are required",
            ))
        }
    };

    let grouping = match query.group_by.as_deref() {
        None => ReportGrouping::default(),
        Some(value) => ReportGrouping::parse(value)
            .ok_or_else(|| ApiError::validation("groupBy must be one of: day, week, month"))?,
    };

    let rows = state
        .db
        .reports()
        .sales_by_period(start, end, grouping)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| SalesReportRow {
                period: row.period,
                transactions: row.transactions,
                revenue: Money::from_cents(row.revenue_cents).to_decimal(),
            })
            .collect(),
    ))
}

/// `GET /dashboard/reports/products`
pub async fn products_report(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ProductsReportQuery>,
) -> Result<Json<Vec<ProductsReportRow>>, ApiError> {
    // Unlike the sales report, the range here is optional.
    let range = match (&query.start_date, &query.end_date) {
        (Some(start), Some(end)) => Some((
            parse_date("startDate", start)?,
            parse_date("endDate", end)?,
        )),
        _ => None,
    };

    let rows = state
        .db
        .reports()
        .top_products(range, query.limit.unwrap_or(10))
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| ProductsReportRow {
                id: row.id,
                name: row.name,
                price: Money::from_cents(row.price_cents).to_decimal(),
                total_sold: row.total_sold,
                total_revenue: Money::from_cents(row.total_revenue_cents).to_decimal(),
            })
            .collect(),
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::sales::{create_sale, CreateSaleRequest};
    use crate::routes::testing::{cashier, test_state};
    use axum::extract::State;
    use bodega_core::{CartLine, Role};
    use bodega_db::NewProduct;
    use chrono::{Duration, Utc};

    async fn seed(state: &Arc<AppState>) -> i64 {
        let cashier_id = state
            .db
            .users()
            .create("maria", "fake-hash", Role::Cashier)
            .await
            .unwrap();
        let rice = state
            .db
            .products()
            .create(&NewProduct {
                name: "Rice (1kg)".to_string(),
                barcode: None,
                price_cents: 5500,
                stock: 50,
                category: None,
                description: None,
            })
            .await
            .unwrap();

        create_sale(
            State(state.clone()),
            cashier(cashier_id),
            Json(CreateSaleRequest {
                items: Some(vec![CartLine {
                    product_id: rice,
                    quantity: 2,
                }]),
                payment_method: None,
            }),
        )
        .await
        .unwrap();

        cashier_id
    }

    #[tokio::test]
    async fn test_stats() {
        let state = test_state().await;
        let cashier_id = seed(&state).await;

        let response = stats(State(state.clone()), cashier(cashier_id))
            .await
            .unwrap();

        assert_eq!(response.0.today_sales.transactions, 1);
        assert_eq!(response.0.today_sales.revenue, 110.0);
        assert_eq!(response.0.month_sales.transactions, 1);
        assert_eq!(response.0.total_products, 1);
        // Rice is at 48 after the sale, above the threshold of 10
        assert!(response.0.low_stock_products.is_empty());
        assert_eq!(response.0.recent_sales.len(), 1);
    }

    #[tokio::test]
    async fn test_sales_report_requires_dates() {
        let state = test_state().await;

        let err = sales_report(
            State(state.clone()),
            cashier(1),
            Query(SalesReportQuery {
                start_date: Some("2026-08-01".to_string()),
                end_date: None,
                group_by: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            &err,
            ApiError::Validation(m) if m == "Start date and end date are required"
        ));
    }

    #[tokio::test]
    async fn test_sales_report_rejects_unknown_grouping() {
        let state = test_state().await;

        let err = sales_report(
            State(state.clone()),
            cashier(1),
            Query(SalesReportQuery {
                start_date: Some("2026-08-01".to_string()),
                end_date: Some("2026-08-07".to_string()),
                group_by: Some("year".to_string()),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_sales_report_day_buckets() {
        let state = test_state().await;
        let cashier_id = seed(&state).await;

        let today = Utc::now().date_naive();
        let response = sales_report(
            State(state.clone()),
            cashier(cashier_id),
            Query(SalesReportQuery {
                start_date: Some((today - Duration::days(1)).format("%Y-%m-%d").to_string()),
                end_date: Some((today + Duration::days(1)).format("%Y-%m-%d").to_string()),
                group_by: Some("day".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.len(), 1);
        assert_eq!(response.0[0].transactions, 1);
        assert_eq!(response.0[0].revenue, 110.0);
    }

    #[tokio::test]
    async fn test_products_report() {
        let state = test_state().await;
        let cashier_id = seed(&state).await;

        let response = products_report(
            State(state.clone()),
            cashier(cashier_id),
            Query(ProductsReportQuery {
                start_date: None,
                end_date: None,
                limit: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.len(), 1);
        assert_eq!(response.0[0].name, "Rice (1kg)");
        assert_eq!(response.0[0].total_sold, 2);
        assert_eq!(response.0[0].total_revenue, 110.0);
    }
}
