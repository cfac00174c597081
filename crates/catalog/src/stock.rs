//! Stock oracle contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use storefront_core::{ProductId, Quantity};

use crate::error::CollaboratorError;

/// Point-in-time availability of one product.
///
/// Read-only snapshot fetched on demand; the cart core never caches it
/// (freshness gates correctness, not latency).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: ProductId,
    pub available: Quantity,
}

/// External authority for how many units of a product are purchasable.
#[async_trait]
pub trait StockOracle: Send + Sync {
    /// Current availability for `id`.
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CollaboratorError>;
}

#[async_trait]
impl<T: StockOracle + ?Sized> StockOracle for std::sync::Arc<T> {
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CollaboratorError> {
        (**self).stock(id).await
    }
}
