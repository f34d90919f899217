//! Key-value substrate the repositories persist through.
//!
//! Each collection lives under one key as a single JSON array. Values are replaced whole; there
//! is no partial patching and no compare-and-swap, so two independent writers race with
//! last-writer-wins semantics.

mod sqlite;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::AppError;

pub use sqlite::SqliteStore;

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// `false` when the host has no persistent storage at all. Repositories then read every
    /// collection as empty and skip writes instead of failing.
    fn is_available(&self) -> bool {
        true
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Process-local substrate. Counts writes so callers can assert that an operation did not
/// persist anything.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, AppError> {
        self.entries.lock().map_err(|e| {
            AppError::new("STORE_LOCK_POISONED", "Memory store lock poisoned")
                .with_details(e.to_string())
        })
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Stand-in for an execution context without persistent storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KvStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}
