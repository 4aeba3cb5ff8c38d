//! Immutable order snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};
use crate::types::{OrderId, Price, UserId};

/// Error returned when trying to check out an empty cart.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("cart is empty")]
pub struct EmptyCart;

/// An order submitted for fulfillment.
///
/// A snapshot of a cart plus the computed total, created once at checkout
/// and immutable thereafter. The document id and `created_at` timestamp are
/// assigned by the hosted backend at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Backend document id.
    pub id: OrderId,
    /// The user who placed the order.
    pub user_id: UserId,
    /// Snapshot of the cart lines at checkout.
    pub items: Vec<CartLine>,
    /// Total at checkout: sum of line totals.
    pub total: Price,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Order data sent to the backend at checkout, before the server assigns
/// an id and timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDraft {
    /// The user placing the order.
    pub user_id: UserId,
    /// Snapshot of the cart lines.
    pub items: Vec<CartLine>,
    /// Computed total.
    pub total: Price,
}

impl OrderDraft {
    /// Snapshot a cart into an order draft.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCart`] if the cart has no lines; checkout must not
    /// write anything in that case.
    pub fn from_cart(user_id: UserId, cart: &Cart) -> Result<Self, EmptyCart> {
        if cart.is_empty() {
            return Err(EmptyCart);
        }

        Ok(Self {
            user_id,
            total: cart.total(),
            items: cart.lines().to_vec(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::product::Product;
    use crate::types::ProductId;
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
    fn test_draft_from_empty_cart_is_rejected() {
        let cart = Cart::new();
        assert!(OrderDraft::from_cart(UserId::new("u-1"), &cart).is_err());
    }

    #[test]
    fn test_draft_snapshots_lines_and_total() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.increase(&ProductId::new("a"));
        cart.add(product("b", 500));

        let draft = OrderDraft::from_cart(UserId::new("u-1"), &cart).unwrap();
        assert_eq!(draft.total, Price::new(Decimal::new(2500, 2)));
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.user_id, UserId::new("u-1"));

        // Drafting does not consume or mutate the cart
        assert_eq!(cart.len(), 2);
    }
}
