//! Infrastructure layer: persistence, the cart store, and the mutation engine.

pub mod config;
pub mod repository;
pub mod service;
pub mod store;


pub use config::CartConfig;
pub use repository::{CartRepository, JsonFileRepository, MemoryRepository, RepositoryError};
pub use service::{CartService, Outcome, Rejection};
pub use store::CartStore;
