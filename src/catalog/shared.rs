//! Shared catalog handle
//!
//! Readers take an `Arc` snapshot and keep using it for as long as they like.
//! A rebuild produces a brand new [`Catalog`] and swaps it in; no reader ever
//! sees a half-built catalog.

use super::Catalog;
use std::sync::{Arc, RwLock};

/// Swappable reference to the current catalog
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// The catalog current at the time of the call
    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            // the lock only ever guards a pointer swap, so the value is intact
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap in a rebuilt catalog, returning the previous one
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let new = Arc::new(catalog);
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, new)
    }
}

impl From<Catalog> for SharedCatalog {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}
