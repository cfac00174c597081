//! `storefront-cart` — the cart domain.
//!
//! This crate is the single source of truth for cart invariants: no two
//! line-items share a product id, and a committed cart never holds a
//! zero-quantity line-item. All state transitions are pure (current cart in,
//! next cart out); persistence and stock verification live elsewhere.

pub mod cart;

pub use cart::{Cart, LineItem};
