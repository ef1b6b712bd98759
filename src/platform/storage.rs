//! Persistent storage backends for [`ScoreStore`]

use crate::highscores::ScoreStore;
#[cfg(not(target_arch = "wasm32"))]
use crate::highscores::MemoryStore;

/// Browser LocalStorage (WASM only)
///
/// Read and write failures are logged and otherwise ignored; a browser with
/// storage disabled just never keeps a record.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("LocalStorage rejected write of {}", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, {} not saved", key),
        }
    }
}

/// Store for the current platform
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> impl ScoreStore {
    LocalStorageStore
}

/// Native: nothing durable, the record lives for the process
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> impl ScoreStore {
    MemoryStore::new()
}
