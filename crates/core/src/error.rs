//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;
use crate::Quantity;

/// Result type used across the cart domain.
pub type CartResult<T> = Result<T, CartError>;

/// Cart-level error.
///
/// Keep this focused on deterministic, recoverable cart failures. Every
/// variant leaves the committed cart unchanged; none is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity exceeds what the stock oracle reports available.
    #[error("requested {requested} of product, only {available} in stock")]
    OutOfStock {
        requested: Quantity,
        available: Quantity,
    },

    /// The operation targets a product that is not in the cart.
    #[error("product {0} not in cart")]
    NotFound(ProductId),

    /// A stock or catalog lookup failed or timed out.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// The persisted cart could not be read at startup. Recovered silently
    /// by substituting an empty cart; never surfaced to the user.
    #[error("persisted cart unreadable: {0}")]
    PersistenceCorrupt(String),

    /// Writing the cart to durable storage failed at commit time.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A structural invariant of the cart would be violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl CartError {
    pub fn out_of_stock(requested: Quantity, available: Quantity) -> Self {
        Self::OutOfStock {
            requested,
            available,
        }
    }

    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::PersistenceCorrupt(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
