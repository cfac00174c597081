//! Failure modes of the catalog/inventory collaborators.

use thiserror::Error;

use storefront_core::ProductId;

/// Error returned by a stock or catalog lookup.
///
/// The cart core maps every variant to its generic per-operation failure
/// message; the distinction exists for logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The service could not be reached or answered with a transport error.
    #[error("catalog service unreachable: {0}")]
    Unreachable(String),

    /// The service does not know the product.
    #[error("product {0} unknown to the catalog")]
    UnknownProduct(ProductId),
}
