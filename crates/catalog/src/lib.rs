//! `storefront-catalog` — contracts for the external catalog/inventory API.
//!
//! The cart core treats the catalog service as a black box with two read
//! surfaces: product metadata ([`CatalogLookup`]) and current availability
//! ([`StockOracle`]). This crate defines those seams plus in-memory
//! implementations for tests and development.

pub mod error;
pub mod lookup;
pub mod memory;
pub mod stock;

pub use error::CollaboratorError;
pub use lookup::{CatalogLookup, CatalogProduct};
pub use memory::{MemoryCatalog, MemoryStockOracle};
pub use stock::{StockLevel, StockOracle};
