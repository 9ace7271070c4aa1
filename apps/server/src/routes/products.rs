//! Product catalog handlers. Reads are open to any authenticated user;
//! mutations require the admin role (enforced by the `AdminUser`
//! extractor, not inside the handlers).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{AdminUser, AuthUser};
use crate::error::ApiError;
use crate::routes::MessageResponse;
use crate::AppState;
use bodega_core::validation::{
    validate_barcode, validate_price_cents, validate_product_name, validate_stock,
};
use bodega_core::{Money, Product};
use bodega_db::NewProduct;

// =============================================================================
// DTOs
// =============================================================================

/// Wire shape of a product. Monetary fields travel as 2-decimal
/// numbers; internally everything is cents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub barcode: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            barcode: p.barcode,
            price: Money::from_cents(p.price_cents).to_decimal(),
            stock: p.stock,
            category: p.category,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Create/update payload. The edit endpoint rewrites the full row, so
/// the same shape serves both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub id: i64,
    pub message: String,
}

fn to_new_product(payload: ProductPayload) -> Result<NewProduct, ApiError> {
    let (name, price) = match (payload.name, payload.price) {
        (Some(name), Some(price)) => (name, price),
        _ => return Err(ApiError::validation("Name and price are required")),
    };

    validate_product_name(&name)?;

    let price = Money::from_decimal(price)
        .ok_or_else(|| ApiError::validation("price has invalid format"))?;
    validate_price_cents(price.cents())?;

    let stock = payload.stock.unwrap_or(0);
    validate_stock(stock)?;

    if let Some(barcode) = &payload.barcode {
        validate_barcode(barcode)?;
    }

    Ok(NewProduct {
        name: name.trim().to_string(),
        barcode: payload.barcode,
        price_cents: price.cents(),
        stock,
        category: payload.category,
        description: payload.description,
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /products`
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.db.products().list_all().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// `GET /products/:id`
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;

    Ok(Json(product.into()))
}

/// `POST /products` (admin)
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<CreateProductResponse>, ApiError> {
    let product = to_new_product(payload)?;
    let id = state.db.products().create(&product).await?;

    info!(product_id = %id, name = %product.name, "Product created");

    Ok(Json(CreateProductResponse {
        id,
        message: "Product created successfully".to_string(),
    }))
}

/// `PUT /products/:id` (admin)
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let product = to_new_product(payload)?;
    state.db.products().update(id, &product).await?;

    info!(product_id = %id, "Product updated");

    Ok(Json(MessageResponse::new("Product updated successfully")))
}

/// `DELETE /products/:id` (admin)
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.products().delete(id).await?;

    info!(product_id = %id, "Product deleted");

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{admin, cashier, test_state};

    fn payload(name: &str, price: f64, stock: Option<i64>) -> ProductPayload {
        ProductPayload {
            name: Some(name.to_string()),
            barcode: None,
            price: Some(price),
            stock,
            category: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let state = test_state().await;

        let created = create_product(
            State(state.clone()),
            admin(1),
            Json(payload("Rice (1kg)", 55.0, Some(50))),
        )
        .await
        .unwrap();

        let fetched = get_product(State(state.clone()), cashier(2), Path(created.0.id))
            .await
            .unwrap();

        assert_eq!(fetched.0.name, "Rice (1kg)");
        assert_eq!(fetched.0.price, 55.0);
        assert_eq!(fetched.0.stock, 50);
    }

    #[tokio::test]
    async fn test_create_requires_name_and_price() {
        let state = test_state().await;

        let err = create_product(
            State(state.clone()),
            admin(1),
            Json(ProductPayload {
                name: Some("Rice".to_string()),
                barcode: None,
                price: None,
                stock: None,
                category: None,
                description: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Validation(m) if m == "Name and price are required"
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let state = test_state().await;

        let err = create_product(
            State(state.clone()),
            admin(1),
            Json(payload("Rice", -1.0, None)),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_barcode_conflict() {
        let state = test_state().await;

        let mut first = payload("Rice (1kg)", 55.0, Some(50));
        first.barcode = Some("7901234567890".to_string());
        create_product(State(state.clone()), admin(1), Json(first))
            .await
            .unwrap();

        let mut second = payload("Rice Copy", 60.0, Some(10));
        second.barcode = Some("7901234567890".to_string());
        let err = create_product(State(state.clone()), admin(1), Json(second))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Conflict(m) if m == "Barcode already exists"
        ));

        // The second row never landed
        let all = list_products(State(state.clone()), cashier(2)).await.unwrap();
        assert_eq!(all.0.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_product_is_404() {
        let state = test_state().await;
        let err = get_product(State(state.clone()), cashier(1), Path(999))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let state = test_state().await;

        let created = create_product(
            State(state.clone()),
            admin(1),
            Json(payload("Sugar 1kg", 60.0, Some(30))),
        )
        .await
        .unwrap();
        let id = created.0.id;

        update_product(
            State(state.clone()),
            admin(1),
            Path(id),
            Json(payload("Sugar 1kg", 65.0, Some(28))),
        )
        .await
        .unwrap();

        let fetched = get_product(State(state.clone()), cashier(2), Path(id))
            .await
            .unwrap();
        assert_eq!(fetched.0.price, 65.0);

        delete_product(State(state.clone()), admin(1), Path(id))
            .await
            .unwrap();

        let err = get_product(State(state.clone()), cashier(2), Path(id))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_404() {
        let state = test_state().await;
        let err = update_product(
            State(state.clone()),
            admin(1),
            Path(999),
            Json(payload("Ghost", 1.0, None)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
