//! Order history route handlers.
//!
//! Residents only ever see their own orders; the unfiltered listing is
//! admin-only. Both come back newest first.

use axum::{Json, extract::State};
use tracing::instrument;

use condo_market_core::Order;

use crate::backend::ListQuery;
use crate::error::AppError;
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Collection holding order documents.
pub(crate) const ORDERS_COLLECTION: &str = "orders";

/// The caller's order history, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>, AppError> {
    let query = ListQuery::new()
        .filter_eq("user_id", user.id.as_str())
        .order_by_desc("created_at");

    let orders = state.documents().list(ORDERS_COLLECTION, &query).await?;
    Ok(Json(orders))
}

/// Every order, newest first (admin).
#[instrument(skip(state))]
pub async fn all(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<Vec<Order>>, AppError> {
    let query = ListQuery::new().order_by_desc("created_at");

    let orders = state.documents().list(ORDERS_COLLECTION, &query).await?;
    Ok(Json(orders))
}
