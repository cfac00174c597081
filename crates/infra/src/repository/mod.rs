//! Durable cart storage.
//!
//! One serialized document per session under a namespaced key. The storage
//! mechanism is swappable behind [`CartRepository`] so the mutation engine
//! never touches it directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_cart::{Cart, LineItem};

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

/// Version tag of the stored document layout.
const SCHEMA: u32 = 1;

/// Storage-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The stored value exists but cannot be decoded into a valid cart.
    /// Recovered at load time as "no prior cart"; never user-surfaced.
    #[error("stored cart is corrupt: {0}")]
    Corrupt(String),

    /// The storage medium failed (filesystem error, permissions, ...).
    #[error("storage io failure: {0}")]
    Io(String),
}

/// Load-on-init, save-on-commit persistence contract.
pub trait CartRepository: Send + Sync {
    /// The previously persisted cart, `None` when nothing was stored.
    fn load(&self) -> Result<Option<Cart>, RepositoryError>;

    /// Persist `cart` as the new authoritative snapshot.
    fn save(&self, cart: &Cart) -> Result<(), RepositoryError>;
}

impl<T: CartRepository + ?Sized> CartRepository for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<Cart>, RepositoryError> {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        (**self).save(cart)
    }
}

/// Envelope actually written to storage.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCart {
    schema: u32,
    saved_at: DateTime<Utc>,
    items: Vec<LineItem>,
}

/// Serialize a cart into the stored document.
fn encode(cart: &Cart) -> Result<String, RepositoryError> {
    let doc = StoredCart {
        schema: SCHEMA,
        saved_at: Utc::now(),
        items: cart.items().to_vec(),
    };
    serde_json::to_string(&doc).map_err(|e| RepositoryError::Io(e.to_string()))
}

/// Decode a stored document back into a cart, re-validating the structural
/// invariants so a tampered document cannot smuggle in a broken state.
fn decode(raw: &str) -> Result<Cart, RepositoryError> {
    let doc: StoredCart =
        serde_json::from_str(raw).map_err(|e| RepositoryError::Corrupt(e.to_string()))?;
    if doc.schema != SCHEMA {
        return Err(RepositoryError::Corrupt(format!(
            "unsupported schema {}",
            doc.schema
        )));
    }
    Cart::from_items(doc.items).map_err(|e| RepositoryError::Corrupt(e.to_string()))
}
