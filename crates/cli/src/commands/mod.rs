//! CLI command implementations.

pub mod role;
pub mod seed;
