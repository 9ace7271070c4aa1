//! Sale handlers: checkout, history, and detail views.
//!
//! Checkout validation happens in two layers: shape checks here (empty
//! cart, bad quantities), then the stock preconditions inside the
//! checkout transaction where they are race-free.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::routes::parse_date;
use crate::AppState;
use bodega_core::validation::validate_cart;
use bodega_core::{CartLine, Money, DEFAULT_PAYMENT_METHOD};
use bodega_db::repository::sale::{SaleHistoryFilter, SaleItemDetails, SaleWithCashier};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub items: Option<Vec<CartLine>>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleResponse {
    pub message: String,
    pub transaction_id: String,
    pub sale_id: i64,
    pub total_amount: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub id: i64,
    pub transaction_id: String,
    pub cashier_id: Option<i64>,
    pub cashier_name: Option<String>,
    pub total_amount: f64,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

impl From<SaleWithCashier> for SaleResponse {
    fn from(row: SaleWithCashier) -> Self {
        SaleResponse {
            id: row.sale.id,
            transaction_id: row.sale.transaction_id,
            cashier_id: row.sale.cashier_id,
            cashier_name: row.cashier_name,
            total_amount: Money::from_cents(row.sale.total_amount_cents).to_decimal(),
            payment_method: row.sale.payment_method,
            created_at: row.sale.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemResponse {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub barcode: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

impl From<SaleItemDetails> for SaleItemResponse {
    fn from(row: SaleItemDetails) -> Self {
        SaleItemResponse {
            id: row.item.id,
            product_id: row.item.product_id,
            product_name: row.product_name,
            barcode: row.barcode,
            quantity: row.item.quantity,
            unit_price: Money::from_cents(row.item.unit_price_cents).to_decimal(),
            line_total: Money::from_cents(row.item.line_total_cents).to_decimal(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleDetailResponse {
    #[serde(flatten)]
    pub sale: SaleResponse,
    pub items: Vec<SaleItemResponse>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /sales`
pub async fn create_sale(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateSaleRequest>,
) -> Result<Json<CreateSaleResponse>, ApiError> {
    let items = req.items.unwrap_or_default();
    if items.is_empty() {
        return Err(ApiError::validation("Items are required"));
    }
    validate_cart(&items)?;

    let payment_method = req
        .payment_method
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

    let receipt = state
        .db
        .sales()
        .checkout(user.0.sub, &items, &payment_method)
        .await?;

    info!(
        sale_id = %receipt.sale_id,
        transaction_id = %receipt.transaction_id,
        cashier_id = %user.0.sub,
        "Sale completed"
    );

    Ok(Json(CreateSaleResponse {
        message: "Sale completed successfully".to_string(),
        transaction_id: receipt.transaction_id,
        sale_id: receipt.sale_id,
        total_amount: receipt.total.to_decimal(),
    }))
}

/// `GET /sales`
pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<SalesQuery>,
) -> Result<Json<Vec<SaleResponse>>, ApiError> {
    // The date filter only applies when both ends are supplied.
    let (start_date, end_date) = match (&query.start_date, &query.end_date) {
        (Some(start), Some(end)) => (
            Some(parse_date("startDate", start)?),
            Some(parse_date("endDate", end)?),
        ),
        _ => (None, None),
    };

    let filter = SaleHistoryFilter {
        start_date,
        end_date,
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(20),
    };

    let sales = state.db.sales().list(&filter).await?;
    Ok(Json(sales.into_iter().map(Into::into).collect()))
}

/// `GET /sales/:id`
pub async fn get_sale(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<SaleDetailResponse>, ApiError> {
    let details = state
        .db
        .sales()
        .get_with_items(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale"))?;

    Ok(Json(SaleDetailResponse {
        sale: details.sale.into(),
        items: details.items.into_iter().map(Into::into).collect(),
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{cashier, test_state};
    use bodega_core::Role;
    use bodega_db::NewProduct;

    async fn seed_cashier(state: &Arc<AppState>) -> i64 {
        state
            .db
            .users()
            .create("maria", "fake-hash", Role::Cashier)
            .await
            .unwrap()
    }

    async fn seed_product(state: &Arc<AppState>, name: &str, price_cents: i64, stock: i64) -> i64 {
        state
            .db
            .products()
            .create(&NewProduct {
                name: name.to_string(),
                barcode: None,
                price_cents,
                stock,
                category: None,
                description: None,
            })
            .await
            .unwrap()
    }

    fn cart(product_id: i64, quantity: i64) -> CreateSaleRequest {
        CreateSaleRequest {
            items: Some(vec![CartLine {
                product_id,
                quantity,
            }]),
            payment_method: None,
        }
    }

    #[tokio::test]
    async fn test_create_sale_success() {
        let state = test_state().await;
        let cashier_id = seed_cashier(&state).await;
        let rice = seed_product(&state, "Rice (1kg)", 5500, 50).await;

        let response = create_sale(State(state.clone()), cashier(cashier_id), Json(cart(rice, 2)))
            .await
            .unwrap();

        assert_eq!(response.0.total_amount, 110.0);
        assert!(response.0.transaction_id.starts_with("TXN-"));

        let product = state
            .db
            .products()
            .get_by_id(rice)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.stock, 48);
    }

    #[tokio::test]
    async fn test_create_sale_insufficient_stock() {
        let state = test_state().await;
        let cashier_id = seed_cashier(&state).await;
        let noodles = seed_product(&state, "Instant Noodles", 1200, 30).await;

        let err = create_sale(
            State(state.clone()),
            cashier(cashier_id),
            Json(cart(noodles, 1000)),
        )
        .await
        .unwrap_err();

        assert!(matches!(&err, ApiError::InsufficientStock(m)
            if m.contains("Insufficient stock") && m.contains("Available: 30")));

        // Nothing was persisted
        let product = state
            .db
            .products()
            .get_by_id(noodles)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.stock, 30);
        assert!(list_sales(
            State(state.clone()),
            cashier(cashier_id),
            Query(SalesQuery {
                start_date: None,
                end_date: None,
                page: None,
                limit: None,
            }),
        )
        .await
        .unwrap()
        .0
        .is_empty());
    }

    #[tokio::test]
    async fn test_create_sale_empty_items() {
        let state = test_state().await;
        let cashier_id = seed_cashier(&state).await;

        for items in [None, Some(vec![])] {
            let err = create_sale(
                State(state.clone()),
                cashier(cashier_id),
                Json(CreateSaleRequest {
                    items,
                    payment_method: None,
                }),
            )
            .await
            .unwrap_err();
            assert!(matches!(&err, ApiError::Validation(m) if m == "Items are required"));
        }
    }

    #[tokio::test]
    async fn test_payment_method_defaults_to_cash() {
        let state = test_state().await;
        let cashier_id = seed_cashier(&state).await;
        let rice = seed_product(&state, "Rice (1kg)", 5500, 50).await;

        let created = create_sale(State(state.clone()), cashier(cashier_id), Json(cart(rice, 1)))
            .await
            .unwrap();

        let detail = get_sale(
            State(state.clone()),
            cashier(cashier_id),
            Path(created.0.sale_id),
        )
        .await
        .unwrap();
        assert_eq!(detail.0.sale.payment_method, "cash");
    }

    #[tokio::test]
    async fn test_get_sale_with_items_and_cashier_name() {
        let state = test_state().await;
        let cashier_id = seed_cashier(&state).await;
        let rice = seed_product(&state, "Rice (1kg)", 5500, 50).await;

        let created = create_sale(State(state.clone()), cashier(cashier_id), Json(cart(rice, 2)))
            .await
            .unwrap();

        let detail = get_sale(
            State(state.clone()),
            cashier(cashier_id),
            Path(created.0.sale_id),
        )
        .await
        .unwrap();

        assert_eq!(detail.0.sale.total_amount, 110.0);
        assert_eq!(detail.0.sale.cashier_name.as_deref(), Some("maria"));
        assert_eq!(detail.0.items.len(), 1);
        assert_eq!(detail.0.items[0].product_name, "Rice (1kg)");
        assert_eq!(detail.0.items[0].unit_price, 55.0);
        assert_eq!(detail.0.items[0].line_total, 110.0);
    }

    #[tokio::test]
    async fn test_get_sale_missing_is_404() {
        let state = test_state().await;
        let err = get_sale(State(state.clone()), cashier(1), Path(999))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_sales_rejects_bad_date() {
        let state = test_state().await;

        let err = list_sales(
            State(state.clone()),
            cashier(1),
            Query(SalesQuery {
                start_date: Some("07-08-2026".to_string()),
                end_date: Some("2026-08-07".to_string()),
                page: None,
                limit: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }
}
