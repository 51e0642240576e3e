//! Local key-value storage contracts for the arcade autosave record.
//!
//! The shell keeps its whole persisted state in one entry, so the contract is a plain
//! text-per-key store. Browser builds back it with `localStorage`; tests use [`MemorySaveStore`].

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    future::Future,
    pin::Pin,
    rc::Rc,
};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`SaveStore`] async methods.
pub type SaveStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service holding raw JSON text per key.
pub trait SaveStore {
    /// Reads the raw text stored under `key`.
    fn read<'a>(&'a self, key: &'a str) -> SaveStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the text stored under `key`.
    fn write<'a>(&'a self, key: &'a str, raw_json: &'a str)
        -> SaveStoreFuture<'a, Result<(), String>>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove<'a>(&'a self, key: &'a str) -> SaveStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store for hosts without local storage. Reads are empty and writes are discarded.
pub struct NoopSaveStore;

impl SaveStore for NoopSaveStore {
    fn read<'a>(&'a self, _key: &'a str) -> SaveStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn write<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> SaveStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn remove<'a>(&'a self, _key: &'a str) -> SaveStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store. Clones share the same entries.
pub struct MemorySaveStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl MemorySaveStore {
    /// Creates a store pre-seeded with one entry.
    pub fn with_entry(key: &str, raw_json: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        store
    }

    /// Makes subsequent writes fail, as a full or disabled browser store would.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Returns the raw text under `key` without going through the async API.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SaveStore for MemorySaveStore {
    fn read<'a>(&'a self, key: &'a str) -> SaveStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.entries.borrow().get(key).cloned()) })
    }

    fn write<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> SaveStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if self.reject_writes.get() {
                return Err(format!("quota exceeded writing `{key}`"));
            }
            self.entries
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            self.writes.set(self.writes.get() + 1);
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> SaveStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.entries.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Reads and deserializes a typed value through a [`SaveStore`].
///
/// # Errors
///
/// Returns an error when the store read or JSON decoding fails.
pub async fn load_json_with<S: SaveStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.read(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| format!("`{key}` is not valid JSON: {e}"))
}

/// Serializes and writes a typed value through a [`SaveStore`].
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn save_json_with<S: SaveStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.write(key, &raw).await
}
