//! JSON file persistence backend.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use storefront_cart::Cart;

use super::{decode, encode, CartRepository, RepositoryError};

/// Stores the cart as one JSON document at `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Cart>, RepositoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepositoryError::Io(e.to_string())),
        };
        decode(&raw).map(Some)
    }

    fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let raw = encode(cart)?;

        // Write-then-rename so readers never observe a half-written document.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| RepositoryError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| RepositoryError::Io(e.to_string()))?;
        Ok(())
    }
}
