//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod money;

pub use error::{CartError, CartResult};
pub use id::ProductId;
pub use money::Money;

/// Purchase quantity of a single product.
pub type Quantity = u32;
