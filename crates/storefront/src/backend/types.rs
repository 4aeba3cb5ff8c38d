//! Wire types for the document store collections.
//!
//! Domain entities (`Product`, `Order`) serialize directly as their
//! documents; this module holds the shapes that only exist on the wire:
//! the user profile document and the pre-creation product payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use condo_market_core::{Price, Role};

/// Profile document stored in the `users` collection, keyed by uid.
///
/// A missing `role` field defaults to resident, matching the role
/// resolution rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Apartment identifier, e.g. "302-B".
    pub apartment: String,
    /// Access role.
    #[serde(default)]
    pub role: Role,
}

/// Validation failures for a product payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidProduct {
    /// Name is empty or whitespace.
    #[error("product name is required")]
    MissingName,
    /// Price is not positive.
    #[error("product price must be greater than zero")]
    NonPositivePrice,
    /// Image URL is empty.
    #[error("product image is required")]
    MissingImage,
}

/// Product data sent to the backend on create or edit, before the server
/// assigns an id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Units in stock.
    pub stock: u32,
    /// Public URL of the product image.
    pub image_url: String,
}

impl ProductDraft {
    /// Required-field checks performed before submission.
    ///
    /// # Errors
    ///
    /// Returns the first failed check; nothing is written on failure.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if self.name.trim().is_empty() {
            return Err(InvalidProduct::MissingName);
        }
        if self.price <= Price::ZERO {
            return Err(InvalidProduct::NonPositivePrice);
        }
        if self.image_url.trim().is_empty() {
            return Err(InvalidProduct::MissingImage);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Coffee 500g".to_owned(),
            price: Price::new(Decimal::new(1890, 2)),
            description: Some("Ground, dark roast".to_owned()),
            stock: 6,
            image_url: "https://img.example/coffee.jpg".to_owned(),
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_missing_name() {
        let mut d = draft();
        d.name = "  ".to_owned();
        assert_eq!(d.validate(), Err(InvalidProduct::MissingName));
    }

    #[test]
    fn test_non_positive_price() {
        let mut d = draft();
        d.price = Price::ZERO;
        assert_eq!(d.validate(), Err(InvalidProduct::NonPositivePrice));
    }

    #[test]
    fn test_missing_image() {
        let mut d = draft();
        d.image_url = String::new();
        assert_eq!(d.validate(), Err(InvalidProduct::MissingImage));
    }

    #[test]
    fn test_profile_role_defaults_to_resident() {
        let json = r#"{
            "name": "Ana",
            "email": "ana@example.com",
            "apartment": "302-B"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, Role::Resident);
    }

    #[test]
    fn test_profile_with_admin_role() {
        let json = r#"{
            "name": "Ana",
            "email": "ana@example.com",
            "apartment": "302-B",
            "role": "admin"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, Role::Admin);
    }
}
