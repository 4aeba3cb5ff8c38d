//! Product catalog route handlers.
//!
//! Reads are open to any logged-in user; mutations require the admin role.
//! Drafts are validated locally before anything is sent to the backend, so
//! a rejected payload never results in a partial write.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::{info, instrument};

use condo_market_core::{Product, ProductId};

use crate::backend::ListQuery;
use crate::backend::types::ProductDraft;
use crate::error::AppError;
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Collection holding product documents.
pub(crate) const PRODUCTS_COLLECTION: &str = "products";

/// List the catalog, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<Product>>, AppError> {
    let query = ListQuery::new().order_by_desc("created_at");
    let products = state
        .documents()
        .list(PRODUCTS_COLLECTION, &query)
        .await?;

    Ok(Json(products))
}

/// Fetch one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .documents()
        .get(PRODUCTS_COLLECTION, id.as_str())
        .await?;

    Ok(Json(product))
}

/// Create a product (admin).
#[instrument(skip(state, draft))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(draft): Json<ProductDraft>,
) -> Result<impl IntoResponse, AppError> {
    draft
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let product: Product = state
        .documents()
        .create(PRODUCTS_COLLECTION, &draft)
        .await?;

    info!(id = %product.id, admin = %user.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product (admin).
#[instrument(skip(state, draft))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, AppError> {
    draft
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let product: Product = state
        .documents()
        .put(PRODUCTS_COLLECTION, id.as_str(), &draft)
        .await?;

    info!(id = %product.id, admin = %user.id, "product updated");
    Ok(Json(product))
}

/// Delete a product (admin).
///
/// Carts that already hold the product keep their snapshot; only the
/// catalog entry is removed.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    state
        .documents()
        .delete(PRODUCTS_COLLECTION, id.as_str())
        .await?;

    info!(id = %id, admin = %user.id, "product deleted");
    Ok(Json(json!({ "message": "Product deleted" })))
}

/// Upload a product image (admin).
///
/// Takes the raw image bytes and returns the public URL to put in a
/// product draft.
#[instrument(skip(state, body), fields(size = body.len()))]
pub async fn upload_image(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("image payload is empty".to_owned()));
    }

    let url = state.images().upload(&body).await?;
    Ok(Json(json!({ "url": url })))
}
