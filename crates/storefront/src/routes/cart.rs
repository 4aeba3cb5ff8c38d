//! Cart route handlers.
//!
//! The cart lives in the session; every mutation loads it, applies one
//! cart operation, and stores it back. Checkout snapshots the cart into an
//! order document and empties it only after the write succeeds.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{info, instrument};

use condo_market_core::{Cart, Order, OrderDraft, Price, Product, ProductId};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::session_keys;
use crate::routes::orders::ORDERS_COLLECTION;
use crate::routes::products::PRODUCTS_COLLECTION;
use crate::state::AppState;

/// One cart line as returned to clients.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Price,
}

/// The cart as returned to clients.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub total: Price,
    pub item_count: u32,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    product: line.product.clone(),
                    quantity: line.quantity,
                    line_total: line.line_total(),
                })
                .collect(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
}

/// Load the session's cart, empty if none was stored yet.
async fn load_cart(session: &Session) -> Result<Cart, AppError> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart back into the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<(), AppError> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Current cart.
#[instrument(skip(session))]
pub async fn show(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Result<Json<CartResponse>, AppError> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// Add one unit of a product.
///
/// The product is fetched from the catalog at add time so the cart holds a
/// current snapshot. Out-of-stock products are rejected.
#[instrument(skip(state, session, body))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let product: Product = state
        .documents()
        .get(PRODUCTS_COLLECTION, body.product_id.as_str())
        .await?;

    if !product.in_stock() {
        return Err(AppError::BadRequest("product is out of stock".to_owned()));
    }

    let mut cart = load_cart(&session).await?;
    cart.add(product);
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// Increment a line's quantity. No-op if the product is not in the cart.
#[instrument(skip(session))]
pub async fn increase(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<CartResponse>, AppError> {
    let mut cart = load_cart(&session).await?;
    cart.increase(&id);
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// Decrement a line's quantity, removing the line at zero.
#[instrument(skip(session))]
pub async fn decrease(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<CartResponse>, AppError> {
    let mut cart = load_cart(&session).await?;
    cart.decrease(&id);
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// Remove a line unconditionally.
#[instrument(skip(session))]
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<CartResponse>, AppError> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&id);
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Result<Json<CartResponse>, AppError> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// Place an order from the cart.
///
/// An empty cart is rejected before anything is written. The cart is
/// emptied only after the backend confirms the order, so a failed write
/// leaves it intact for a retry.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let mut cart = load_cart(&session).await?;

    let draft = OrderDraft::from_cart(user.id.clone(), &cart)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let order: Order = state.documents().create(ORDERS_COLLECTION, &draft).await?;

    cart.clear();
    save_cart(&session, &cart).await?;

    info!(order = %order.id, user = %user.id, total = %order.total, "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::new(Decimal::new(cents, 2)),
            description: None,
            stock: 10,
            image_url: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cart_response_totals() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.increase(&ProductId::new("a"));
        cart.add(product("b", 500));

        let response = CartResponse::from(&cart);
        assert_eq!(response.lines.len(), 2);
        assert_eq!(response.item_count, 3);
        assert_eq!(response.total, Price::new(Decimal::new(2500, 2)));
        assert_eq!(
            response.lines.first().unwrap().line_total,
            Price::new(Decimal::new(2000, 2))
        );
    }

    #[test]
    fn test_empty_cart_response() {
        let response = CartResponse::from(&Cart::new());
        assert!(response.lines.is_empty());
        assert_eq!(response.total, Price::ZERO);
        assert_eq!(response.item_count, 0);
    }
}
