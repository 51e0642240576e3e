//! `localStorage`-backed [`SaveStore`] implementation.

use platform_host::{SaveStore, SaveStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Save store backed by `window.localStorage`.
///
/// Embedded frames can have storage disabled (third-party cookie policies); every operation then
/// reports an error instead of panicking.
pub struct WebSaveStore;

impl WebSaveStore {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .ok_or_else(|| "window unavailable".to_string())?
            .local_storage()
            .map_err(|e| format!("localStorage access denied: {e:?}"))?
            .ok_or_else(|| "localStorage unavailable".to_string())
    }

    /// Reads the raw text under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the read throws.
    pub fn read_text(self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    /// Replaces the raw text under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the quota is exceeded.
    pub fn write_text(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .set_item(key, raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete throws.
    pub fn remove_text(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl SaveStore for WebSaveStore {
    fn read<'a>(&'a self, key: &'a str) -> SaveStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { store.read_text(key) })
    }

    fn write<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> SaveStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.write_text(key, raw_json) })
    }

    fn remove<'a>(&'a self, key: &'a str) -> SaveStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.remove_text(key) })
    }
}
