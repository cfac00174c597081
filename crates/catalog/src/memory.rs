//! In-memory catalog/stock implementations.
//!
//! Intended for tests/dev. Not optimized for performance. Both carry an
//! "unreachable" switch so failure paths can be exercised without a network.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use storefront_core::{ProductId, Quantity};

use crate::error::CollaboratorError;
use crate::lookup::{CatalogLookup, CatalogProduct};
use crate::stock::{StockLevel, StockOracle};

/// In-memory stock oracle keyed by product id.
#[derive(Debug, Default)]
pub struct MemoryStockOracle {
    levels: RwLock<HashMap<ProductId, Quantity>>,
    unreachable: AtomicBool,
}

impl MemoryStockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the available quantity for a product.
    pub fn set(&self, id: ProductId, available: Quantity) {
        self.levels
            .write()
            .expect("stock levels lock poisoned")
            .insert(id, available);
    }

    /// Make subsequent lookups fail as if the service were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }
}

#[async_trait]
impl StockOracle for MemoryStockOracle {
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CollaboratorError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Unreachable(
                "stock service offline".to_string(),
            ));
        }

        let levels = self.levels.read().expect("stock levels lock poisoned");
        match levels.get(&id) {
            Some(&available) => Ok(StockLevel {
                product_id: id,
                available,
            }),
            None => Err(CollaboratorError::UnknownProduct(id)),
        }
    }
}

/// In-memory product catalog keyed by product id.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
    unreachable: AtomicBool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a catalog entry.
    pub fn insert(&self, product: CatalogProduct) {
        self.products
            .write()
            .expect("catalog lock poisoned")
            .insert(product.id, product);
    }

    /// Make subsequent lookups fail as if the service were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogLookup for MemoryCatalog {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CollaboratorError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Unreachable(
                "catalog service offline".to_string(),
            ));
        }

        let products = self.products.read().expect("catalog lock poisoned");
        products
            .get(&id)
            .cloned()
            .ok_or(CollaboratorError::UnknownProduct(id))
    }

    async fn products(&self) -> Result<Vec<CatalogProduct>, CollaboratorError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Unreachable(
                "catalog service offline".to_string(),
            ));
        }

        let products = self.products.read().expect("catalog lock poisoned");
        let mut all: Vec<CatalogProduct> = products.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Money;

    fn product(id: u64) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Money::from_cents(id * 100),
            image: format!("https://cdn.example/products/{id}.jpg"),
        }
    }

    #[tokio::test]
    async fn stock_oracle_returns_set_levels() {
        let oracle = MemoryStockOracle::new();
        oracle.set(ProductId::new(1), 5);

        let level = oracle.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(level.available, 5);
    }

    #[tokio::test]
    async fn stock_oracle_reports_unknown_products() {
        let oracle = MemoryStockOracle::new();
        let err = oracle.stock(ProductId::new(9)).await.unwrap_err();
        assert_eq!(err, CollaboratorError::UnknownProduct(ProductId::new(9)));
    }

    #[tokio::test]
    async fn stock_oracle_can_be_taken_offline() {
        let oracle = MemoryStockOracle::new();
        oracle.set(ProductId::new(1), 5);
        oracle.set_unreachable(true);

        let err = oracle.stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Unreachable(_)));
    }

    #[tokio::test]
    async fn catalog_lists_products_in_id_order() {
        let catalog = MemoryCatalog::new();
        catalog.insert(product(3));
        catalog.insert(product(1));
        catalog.insert(product(2));

        let all = catalog.products().await.unwrap();
        let ids: Vec<u64> = all.iter().map(|p| p.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn catalog_lookup_finds_inserted_product() {
        let catalog = MemoryCatalog::new();
        catalog.insert(product(1));

        let found = catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(found.title, "Product 1");
        assert_eq!(found.price, Money::from_cents(100));
    }
}
