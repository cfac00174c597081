//! In-memory persistence backend.
//!
//! Stand-in for browser local storage: holds the serialized document in a
//! single slot. Intended for tests/dev; also the injection point for
//! corruption and write-failure scenarios.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use storefront_cart::Cart;

use super::{decode, encode, CartRepository, RepositoryError};

#[derive(Debug, Default)]
pub struct MemoryRepository {
    slot: RwLock<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with a raw document (valid or not).
    pub fn inject_raw(&self, raw: impl Into<String>) {
        *self.slot.write().expect("storage slot lock poisoned") = Some(raw.into());
    }

    /// The raw document currently stored, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.read().expect("storage slot lock poisoned").clone()
    }

    /// Make subsequent saves fail as if the medium were full.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl CartRepository for MemoryRepository {
    fn load(&self) -> Result<Option<Cart>, RepositoryError> {
        let slot = self.slot.read().expect("storage slot lock poisoned");
        match slot.as_deref() {
            Some(raw) => decode(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Io("storage full".to_string()));
        }
        let raw = encode(cart)?;
        *self.slot.write().expect("storage slot lock poisoned") = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cart::LineItem;
    use storefront_core::{Money, ProductId};

    #[test]
    fn empty_repository_loads_none() {
        assert_eq!(MemoryRepository::new().load().unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let repo = MemoryRepository::new();
        let cart = Cart::from_items(vec![LineItem {
            id: ProductId::new(1),
            title: "Product 1".to_string(),
            price: Money::from_cents(1000),
            image: String::new(),
            amount: 3,
        }])
        .unwrap();

        repo.save(&cart).unwrap();
        assert_eq!(repo.load().unwrap(), Some(cart));
    }

    #[test]
    fn injected_garbage_loads_as_corrupt() {
        let repo = MemoryRepository::new();
        repo.inject_raw("][");
        assert!(matches!(repo.load(), Err(RepositoryError::Corrupt(_))));
    }

    #[test]
    fn failed_writes_surface_io_errors() {
        let repo = MemoryRepository::new();
        repo.set_fail_writes(true);
        assert!(matches!(
            repo.save(&Cart::empty()),
            Err(RepositoryError::Io(_))
        ));
    }
}
