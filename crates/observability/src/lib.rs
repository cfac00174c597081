//! Tracing/logging setup shared by anything embedding the cart core.

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
