//! Catalog seeding command.
//!
//! # Usage
//!
//! ```bash
//! cm-cli seed products
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_API_URL` - Base URL of the hosted backend
//! - `BACKEND_API_KEY` - API key for the hosted backend

use rust_decimal::Decimal;
use thiserror::Error;

use condo_market_core::{Price, Product};
use condo_market_storefront::backend::types::ProductDraft;
use condo_market_storefront::backend::{BackendError, DocumentsClient};
use condo_market_storefront::config::{BackendConfig, ConfigError};

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend write failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

fn demo_products() -> Vec<ProductDraft> {
    let draft = |name: &str, cents: i64, stock: u32, image: &str| ProductDraft {
        name: name.to_owned(),
        price: Price::new(Decimal::new(cents, 2)),
        description: None,
        stock,
        image_url: image.to_owned(),
    };

    vec![
        draft("Mineral water 1.5L", 450, 24, "https://img.example/water.jpg"),
        draft("Whole milk 1L", 689, 12, "https://img.example/milk.jpg"),
        draft("Ground coffee 500g", 1890, 6, "https://img.example/coffee.jpg"),
        draft("French bread (unit)", 120, 40, "https://img.example/bread.jpg"),
        draft("Laundry soap bar", 349, 18, "https://img.example/soap.jpg"),
    ]
}

/// Write demo products to the catalog.
///
/// Products are created with server-assigned ids; running the command
/// twice creates duplicates.
pub async fn products() -> Result<(), SeedError> {
    let config = BackendConfig::from_env()?;
    let documents = DocumentsClient::new(&config);

    tracing::info!("Seeding demo products...");

    for draft in demo_products() {
        let product: Product = documents.create("products", &draft).await?;
        tracing::info!("  created {} ({})", product.name, product.id);
    }

    tracing::info!("Seeding complete");
    Ok(())
}
