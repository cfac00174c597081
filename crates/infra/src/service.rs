//! The mutation engine (application-level orchestration).
//!
//! `CartService` runs every mutation as one transaction:
//!
//! ```text
//! acquire cart lock
//!   ↓
//! read snapshot
//!   ↓
//! verify against the stock oracle / catalog (bounded wait)
//!   ↓
//! compute next cart (pure)
//!   ↓
//! commit to the store (persist, swap, notify)
//! ```
//!
//! The lock is held across the whole cycle, including the collaborator
//! suspension points, so the snapshot an operation verified is still the
//! committed state when it writes. Failures are caught at the operation
//! boundary and returned as a [`Rejection`] carrying a display string;
//! nothing unwinds past this layer and a failed operation never mutates the
//! store.

use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

use storefront_cart::{Cart, LineItem};
use storefront_catalog::{CatalogLookup, StockLevel, StockOracle};
use storefront_core::{CartError, CartResult, ProductId, Quantity};

use crate::config::CartConfig;
use crate::store::CartStore;

const MSG_OUT_OF_STOCK: &str = "Requested quantity not in stock";
const MSG_ADD_FAILED: &str = "Could not add product";
const MSG_REMOVE_FAILED: &str = "Could not remove product";
const MSG_UPDATE_FAILED: &str = "Could not change product quantity";

/// Tagged failure returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub error: CartError,
    /// Human-readable string for the notification sink.
    pub message: String,
}

impl Rejection {
    /// Out-of-stock gets its specific message; every other failure maps to
    /// the operation's generic one.
    fn new(error: CartError, generic: &str) -> Self {
        let message = match &error {
            CartError::OutOfStock { .. } => MSG_OUT_OF_STOCK.to_string(),
            _ => generic.to_string(),
        };
        Self { error, message }
    }
}

/// Result of one mutation: the committed snapshot, or a tagged failure.
pub type Outcome = Result<Cart, Rejection>;

/// The cart mutation engine.
///
/// Composes the store and the two collaborator seams; generic over their
/// implementations so tests run against in-memory ones.
pub struct CartService<S: StockOracle, C: CatalogLookup> {
    store: CartStore,
    stock: S,
    catalog: C,
    lookup_timeout: Duration,
    // Single-writer mutual exclusion for the whole read-verify-commit cycle.
    cart_lock: Mutex<()>,
}

impl<S: StockOracle, C: CatalogLookup> CartService<S, C> {
    pub fn new(store: CartStore, stock: S, catalog: C, config: &CartConfig) -> Self {
        Self {
            store,
            stock,
            catalog,
            lookup_timeout: config.lookup_timeout(),
            cart_lock: Mutex::new(()),
        }
    }

    /// Current cart snapshot (read-only, safe to call anytime).
    pub fn snapshot(&self) -> Cart {
        self.store.snapshot()
    }

    /// Observe every committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.store.subscribe()
    }

    /// Add one unit of a product, fetching catalog metadata when the product
    /// is not yet in the cart.
    pub async fn add_product(&self, id: ProductId) -> Outcome {
        let _guard = self.cart_lock.lock().await;
        let span = tracing::info_span!("add_product", op = %Uuid::now_v7(), product = %id);
        async {
            match self.try_add(id).await {
                Ok(cart) => {
                    debug!(items = cart.len(), total = %cart.total(), "committed");
                    Ok(cart)
                }
                Err(error) => {
                    warn!(%error, "rejected");
                    Err(Rejection::new(error, MSG_ADD_FAILED))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Remove a product entirely. Always stock-safe, so the oracle is never
    /// consulted.
    pub async fn remove_product(&self, id: ProductId) -> Outcome {
        let _guard = self.cart_lock.lock().await;
        let span = tracing::info_span!("remove_product", op = %Uuid::now_v7(), product = %id);
        async {
            match self.try_remove(id) {
                Ok(cart) => {
                    debug!(items = cart.len(), "committed");
                    Ok(cart)
                }
                Err(error) => {
                    warn!(%error, "rejected");
                    Err(Rejection::new(error, MSG_REMOVE_FAILED))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Set a product's quantity to an absolute value.
    ///
    /// `amount < 1` is a no-op success: clients must call `remove_product`
    /// to drop an item, and the cart never holds a zero-quantity line-item.
    pub async fn update_product_amount(&self, id: ProductId, amount: Quantity) -> Outcome {
        let _guard = self.cart_lock.lock().await;
        let span = tracing::info_span!(
            "update_product_amount",
            op = %Uuid::now_v7(),
            product = %id,
            amount,
        );
        async {
            if amount < 1 {
                debug!("ignoring non-positive amount");
                return Ok(self.store.snapshot());
            }
            match self.try_update(id, amount).await {
                Ok(cart) => {
                    debug!(items = cart.len(), total = %cart.total(), "committed");
                    Ok(cart)
                }
                Err(error) => {
                    warn!(%error, "rejected");
                    Err(Rejection::new(error, MSG_UPDATE_FAILED))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_add(&self, id: ProductId) -> CartResult<Cart> {
        let cart = self.store.snapshot();
        let line = match cart.get(id) {
            Some(existing) => existing.clone(),
            None => {
                let product = self.fetch_product(id).await?;
                LineItem {
                    id: product.id,
                    title: product.title,
                    price: product.price,
                    image: product.image,
                    amount: 0,
                }
            }
        };

        let requested = line.amount + 1;
        let level = self.fetch_stock(id).await?;
        if level.available < requested {
            return Err(CartError::out_of_stock(requested, level.available));
        }

        let next = cart.upsert(line.with_amount(requested))?;
        self.commit(next)
    }

    fn try_remove(&self, id: ProductId) -> CartResult<Cart> {
        let next = self.store.snapshot().remove(id)?;
        self.commit(next)
    }

    async fn try_update(&self, id: ProductId, amount: Quantity) -> CartResult<Cart> {
        let cart = self.store.snapshot();
        // Never creates a line-item; the product must already be in the cart.
        let line = cart.get(id).ok_or(CartError::NotFound(id))?.clone();

        let level = self.fetch_stock(id).await?;
        if level.available < amount {
            return Err(CartError::out_of_stock(amount, level.available));
        }

        let next = cart.upsert(line.with_amount(amount))?;
        self.commit(next)
    }

    fn commit(&self, next: Cart) -> CartResult<Cart> {
        self.store
            .commit(next)
            .map_err(|e| CartError::storage(e.to_string()))
    }

    async fn fetch_stock(&self, id: ProductId) -> CartResult<StockLevel> {
        match tokio::time::timeout(self.lookup_timeout, self.stock.stock(id)).await {
            Ok(Ok(level)) => Ok(level),
            Ok(Err(e)) => Err(CartError::unavailable(e.to_string())),
            Err(_) => Err(CartError::unavailable("stock lookup timed out")),
        }
    }

    async fn fetch_product(
        &self,
        id: ProductId,
    ) -> CartResult<storefront_catalog::CatalogProduct> {
        match tokio::time::timeout(self.lookup_timeout, self.catalog.product(id)).await {
            Ok(Ok(product)) => Ok(product),
            Ok(Err(e)) => Err(CartError::unavailable(e.to_string())),
            Err(_) => Err(CartError::unavailable("catalog lookup timed out")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_stock_keeps_its_specific_message() {
        let rejection = Rejection::new(CartError::out_of_stock(3, 1), MSG_ADD_FAILED);
        assert_eq!(rejection.message, MSG_OUT_OF_STOCK);
    }

    #[test]
    fn other_failures_use_the_generic_message() {
        let rejection = Rejection::new(
            CartError::unavailable("connection refused"),
            MSG_REMOVE_FAILED,
        );
        assert_eq!(rejection.message, MSG_REMOVE_FAILED);

        let rejection = Rejection::new(CartError::NotFound(ProductId::new(1)), MSG_UPDATE_FAILED);
        assert_eq!(rejection.message, MSG_UPDATE_FAILED);
    }
}
