//! Service layer: session resolution and image uploads.

pub mod auth;
pub mod images;
