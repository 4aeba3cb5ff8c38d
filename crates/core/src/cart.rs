//! In-memory cart aggregator.
//!
//! The cart is owned exclusively by one session and never persisted; orders
//! snapshot it at checkout. All operations are synchronous and infallible.
//!
//! Invariant: every line present in the cart has `quantity >= 1`. A decrease
//! that would reach zero removes the line instead.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId};

/// One product entry in a cart with its quantity.
///
/// Holds a snapshot of the product as it was when added; a later catalog
/// edit does not retroactively change lines already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product at add time.
    pub product: Product,
    /// Units of the product in the cart. Always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// A session's cart: cart lines keyed by product id, merge-by-id on add.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// If a line for the product already exists its quantity is incremented;
    /// otherwise a new line with quantity 1 is appended. Stock gating is the
    /// caller's concern (reject before calling when the product is out of
    /// stock).
    pub fn add(&mut self, product: Product) {
        match self.line_mut(&product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product,
                quantity: 1,
            }),
        }
    }

    /// Increment the quantity of the line for `id`. No-op if absent.
    pub fn increase(&mut self, id: &ProductId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity += 1;
        }
    }

    /// Decrement the quantity of the line for `id`, removing the line when
    /// it reaches zero. No-op if absent.
    pub fn decrease(&mut self, id: &ProductId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity -= 1;
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    /// Remove the line for `id` unconditionally. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.lines.retain(|line| &line.product.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consume the cart and return its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// Total price: sum of `price * quantity` over all lines.
    ///
    /// Recomputed on every call; never stored.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Quantity in the cart for a product id, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.line(id).map_or(0, |line| line.quantity)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == id)
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.product.id == id)
    }
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

    fn price(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2))
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("a")), 1);
    }

    #[test]
    fn test_add_merges_by_id() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.add(product("a", 1000));

        // One line with quantity 2, not two lines
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("a")), 2);
    }

    #[test]
    fn test_increase() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.increase(&ProductId::new("a"));

        assert_eq!(cart.quantity_of(&ProductId::new("a")), 2);
    }

    #[test]
    fn test_increase_absent_is_noop() {
        let mut cart = Cart::new();
        cart.increase(&ProductId::new("ghost"));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrease_removes_at_zero() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.decrease(&ProductId::new("a"));

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(&ProductId::new("a")), 0);
    }

    #[test]
    fn test_decrease_keeps_line_above_zero() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.increase(&ProductId::new("a"));
        cart.decrease(&ProductId::new("a"));

        assert_eq!(cart.quantity_of(&ProductId::new("a")), 1);
    }

    #[test]
    fn test_decrease_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.decrease(&ProductId::new("ghost"));

        assert_eq!(cart.quantity_of(&ProductId::new("a")), 1);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.add(product("b", 500));
        cart.remove(&ProductId::new("a"));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("b")), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.add(product("b", 500));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_total() {
        // [{price: 10, qty: 2}, {price: 5, qty: 1}] totals 25.00
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.increase(&ProductId::new("a"));
        cart.add(product("b", 500));

        assert_eq!(cart.total(), price(2500));
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        cart.add(product("a", 1990));
        cart.increase(&ProductId::new("a"));

        let line = cart.lines().first().unwrap();
        assert_eq!(line.line_total(), price(3980));
    }

    #[test]
    fn test_item_count() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.increase(&ProductId::new("a"));
        cart.add(product("b", 500));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_no_sequence_leaves_nonpositive_quantity() {
        // Mixed operation sequence; the quantity >= 1 invariant must hold
        // after every step.
        let mut cart = Cart::new();
        let a = ProductId::new("a");
        let b = ProductId::new("b");

        let ops: Vec<Box<dyn Fn(&mut Cart)>> = vec![
            Box::new(|c| c.add(product("a", 1000))),
            Box::new(|c: &mut Cart| c.decrease(&ProductId::new("a"))),
            Box::new(|c: &mut Cart| c.decrease(&ProductId::new("a"))),
            Box::new(|c| c.add(product("b", 500))),
            Box::new(|c: &mut Cart| c.increase(&ProductId::new("b"))),
            Box::new(|c: &mut Cart| c.decrease(&ProductId::new("b"))),
            Box::new(|c: &mut Cart| c.decrease(&ProductId::new("b"))),
            Box::new(|c: &mut Cart| c.remove(&ProductId::new("b"))),
            Box::new(|c| c.add(product("a", 1000))),
        ];

        for op in ops {
            op(&mut cart);
            assert!(cart.lines().iter().all(|line| line.quantity >= 1));
        }

        assert_eq!(cart.quantity_of(&a), 1);
        assert_eq!(cart.quantity_of(&b), 0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000));
        cart.increase(&ProductId::new("a"));

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
