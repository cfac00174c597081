//! Catalog metadata contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use storefront_core::{Money, ProductId};

use crate::error::CollaboratorError;

/// Catalog metadata for a product not yet in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub image: String,
}

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Metadata for one product.
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CollaboratorError>;

    /// The whole catalog, for listing surfaces.
    async fn products(&self) -> Result<Vec<CatalogProduct>, CollaboratorError>;
}

#[async_trait]
impl<T: CatalogLookup + ?Sized> CatalogLookup for std::sync::Arc<T> {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CollaboratorError> {
        (**self).product(id).await
    }

    async fn products(&self) -> Result<Vec<CatalogProduct>, CollaboratorError> {
        (**self).products().await
    }
}
