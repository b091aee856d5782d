//! Persistence of the signed-in user's identity.
//!
//! After a successful code/state exchange the backend's identity payload is
//! written verbatim, as JSON text, under a single key. It is read back only
//! to show the user's display name.
//!
//! ## Storage Strategy
//!
//! - On sign-in: overwrite the key, last write wins
//! - On page load: nothing is restored eagerly, readers parse lazily
//! - On logout: the key is left in place, the next sign-in overwrites it.
//!   Nothing deletes it, so the storage seam has no removal operation

use std::cell::RefCell;
use std::collections::HashMap;

use crate::AuthError;

/// Storage key for the persisted identity blob
pub const USER_INFO_STORAGE_KEY: &str = "userInfo";

/// Durable string key/value storage.
pub trait IdentityStorage {
    /// Returns the stored value, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;
}

/// Browser `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, AuthError> {
        let window = web_sys::window().ok_or(AuthError::Unavailable("window"))?;
        window
            .local_storage()
            .map_err(|e| AuthError::Storage(format!("{:?}", e)))?
            .ok_or(AuthError::Unavailable("localStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl IdentityStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| AuthError::Storage(format!("{:?}", e)))?;
        tracing::trace!("Stored '{}' in localStorage", key);
        Ok(())
    }
}

/// Non-WASM stub: reads nothing, refuses writes.
#[cfg(not(target_arch = "wasm32"))]
impl IdentityStorage for LocalStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), AuthError> {
        tracing::warn!("localStorage write skipped (non-WASM)");
        Err(AuthError::Unavailable("localStorage"))
    }
}

/// In-memory storage, for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage already holding `value` under `key`.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl IdentityStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
