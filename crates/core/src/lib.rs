//! Condo Market Core - Shared domain types library.
//!
//! This crate provides common types used across all Condo Market components:
//! - `storefront` - Headless storefront service for residents and admins
//! - `cli` - Command-line tools for seeding and role management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async. All persistence lives in the hosted backend, so the
//! only state this crate owns is the in-memory cart.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and roles
//! - [`product`] - Catalog product entity
//! - [`cart`] - In-memory cart aggregator
//! - [`order`] - Immutable order snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod product;
pub mod types;

pub use cart::{Cart, CartLine};
pub use order::{EmptyCart, Order, OrderDraft};
pub use product::Product;
pub use types::*;
