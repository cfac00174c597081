//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// The catalog addresses products by small integer ids, so this wraps a
/// `u64` rather than a UUID. Prefer passing ids explicitly in tests for
/// determinism.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for u64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(u64::from_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_transparently() {
        let id = ProductId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(serde_json::from_str::<ProductId>("42").unwrap(), id);
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("7".parse::<ProductId>().unwrap(), ProductId::new(7));
        assert!("seven".parse::<ProductId>().is_err());
    }
}
