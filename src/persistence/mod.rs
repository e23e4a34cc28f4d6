//! LocalStorage persistence
//!
//! Last write wins. Native builds have no storage: loads return `None` and
//! writes are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read the raw string stored under `key`
#[cfg(target_arch = "wasm32")]
pub fn load_string(key: &str) -> Option<String> {
    storage()?.get_item(key).ok()?
}

/// Write `value` under `key`. Returns false if storage is unavailable.
#[cfg(target_arch = "wasm32")]
pub fn store_string(key: &str, value: &str) -> bool {
    let Some(storage) = storage() else {
        log::warn!("LocalStorage unavailable, {} not saved", key);
        return false;
    };
    match storage.set_item(key, value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to save {}: {:?}", key, e);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_string(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn store_string(_key: &str, _value: &str) -> bool {
    // No-op for native
    false
}

/// Read and parse JSON stored under `key`. Corrupt data reads as absent.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = load_string(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt {}: {}", key, e);
            None
        }
    }
}

/// Serialize `value` as JSON under `key`
pub fn store_json<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => store_string(key, &json),
        Err(e) => {
            log::warn!("Failed to serialize {}: {}", key, e);
            false
        }
    }
}
