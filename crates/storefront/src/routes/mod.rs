//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Auth
//! POST /auth/login             - Sign in, start a session
//! POST /auth/register          - Create an account (does not sign in)
//! POST /auth/logout            - End the session
//!
//! # Products
//! GET  /products               - Catalog, newest first
//! GET  /products/{id}          - Product detail
//! POST /products               - Create product (admin)
//! PUT  /products/{id}          - Edit product (admin)
//! DELETE /products/{id}        - Delete product (admin)
//! POST /products/image         - Upload a product image (admin)
//!
//! # Cart (session-scoped, requires auth)
//! GET    /cart                      - Current cart
//! POST   /cart/items                - Add one unit of a product
//! POST   /cart/items/{id}/increase  - Increment a line
//! POST   /cart/items/{id}/decrease  - Decrement a line (removes at zero)
//! DELETE /cart/items/{id}           - Remove a line
//! DELETE /cart                      - Empty the cart
//! POST   /cart/checkout             - Place the order
//!
//! # Orders
//! GET  /orders                 - Caller's order history, newest first
//! GET  /orders/all             - Every order (admin)
//!
//! # Account
//! GET  /account                - Session user and profile
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/image", post(products::upload_image))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}/increase", post(cart::increase))
        .route("/items/{id}/decrease", post(cart::decrease))
        .route("/items/{id}", delete(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/all", get(orders::all))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/orders", order_routes())
        .route("/account", get(account::show))
}
