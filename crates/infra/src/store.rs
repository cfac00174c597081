//! The cart store: current snapshot, commit path, change notification.

use tokio::sync::watch;
use tracing::{debug, warn};

use storefront_cart::Cart;

use crate::repository::{CartRepository, RepositoryError};

/// Holds the authoritative cart value and persists every committed snapshot.
///
/// `commit` is the single write path: the durable copy is written first,
/// then the in-memory value is swapped and subscribers are notified, so no
/// reader ever observes the store mid-update and a failed save leaves the
/// previous snapshot in place.
///
/// Change propagation is an explicit subscribe/notify mechanism (a watch
/// channel) rather than ambient shared state; the store is constructed once
/// per session and injected wherever it is read.
pub struct CartStore {
    repo: Box<dyn CartRepository>,
    current: watch::Sender<Cart>,
}

impl CartStore {
    /// Open the store, hydrating from the repository.
    ///
    /// A missing stored value starts an empty cart; a corrupt or unreadable
    /// one is logged and likewise degraded to empty rather than propagated.
    pub fn open(repo: Box<dyn CartRepository>) -> Self {
        let initial = match repo.load() {
            Ok(Some(cart)) => {
                debug!(items = cart.len(), "hydrated persisted cart");
                cart
            }
            Ok(None) => Cart::empty(),
            Err(RepositoryError::Corrupt(reason)) => {
                warn!(%reason, "persisted cart corrupt, starting empty");
                Cart::empty()
            }
            Err(RepositoryError::Io(reason)) => {
                warn!(%reason, "persisted cart unreadable, starting empty");
                Cart::empty()
            }
        };

        let (current, _) = watch::channel(initial);
        Self { repo, current }
    }

    /// Atomic read of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.current.borrow().clone()
    }

    /// Atomically replace the cart: persist, then swap and notify.
    pub fn commit(&self, next: Cart) -> Result<Cart, RepositoryError> {
        self.repo.save(&next)?;
        self.current.send_replace(next.clone());
        Ok(next)
    }

    /// Receiver that observes every committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use std::sync::Arc;

    use storefront_cart::LineItem;
    use storefront_core::{Money, ProductId};

    fn item(id: u64, amount: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Money::from_cents(1000),
            image: String::new(),
            amount,
        }
    }

    /// Repository handle that can be shared with the store and inspected
    /// afterwards.
    fn shared_repo() -> (Arc<MemoryRepository>, Box<dyn CartRepository>) {
        let repo = Arc::new(MemoryRepository::new());
        (repo.clone(), Box::new(repo))
    }

    #[test]
    fn opens_empty_without_prior_state() {
        let (_handle, repo) = shared_repo();
        let store = CartStore::open(repo);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn hydrates_persisted_cart() {
        let (handle, repo) = shared_repo();
        handle
            .save(&Cart::from_items(vec![item(1, 2)]).unwrap())
            .unwrap();

        let store = CartStore::open(repo);
        assert_eq!(store.snapshot().amount_of(ProductId::new(1)), 2);
    }

    #[test]
    fn corrupt_storage_degrades_to_empty() {
        let (handle, repo) = shared_repo();
        handle.inject_raw("definitely not a cart");

        let store = CartStore::open(repo);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn commit_persists_and_updates_snapshot() {
        let (handle, repo) = shared_repo();
        let store = CartStore::open(repo);

        let next = Cart::from_items(vec![item(1, 1)]).unwrap();
        store.commit(next.clone()).unwrap();

        assert_eq!(store.snapshot(), next);
        assert_eq!(handle.load().unwrap(), Some(next));
    }

    #[test]
    fn failed_save_leaves_snapshot_unchanged() {
        let (handle, repo) = shared_repo();
        let store = CartStore::open(repo);
        handle.set_fail_writes(true);

        let err = store
            .commit(Cart::from_items(vec![item(1, 1)]).unwrap())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Io(_)));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn subscribers_observe_commits() {
        let (_handle, repo) = shared_repo();
        let store = CartStore::open(repo);
        let mut rx = store.subscribe();

        assert!(!rx.has_changed().unwrap());
        let next = Cart::from_items(vec![item(1, 1)]).unwrap();
        store.commit(next.clone()).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), next);
    }
}
