//! Persisted credential storage and the read-only credential checks over it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bearer token and role label live in `localStorage` so they survive
//! reloads and are shared by every tab of the origin. The session core only
//! reads them through `has_token`/`has_admin_role`; login and logout flows
//! write them through `persist_login`/`clear_login`.
//!
//! ERROR HANDLING
//! ==============
//! Storage can be missing or refuse access (disabled storage, sandboxed
//! iframes). The checks fail closed: any error reads as "no credential" and is
//! logged rather than surfaced.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Storage key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key holding the role label returned at login.
pub const ROLE_KEY: &str = "role";
/// Role label granting elevated privilege, compared case-insensitively.
pub const ADMIN_ROLE: &str = "admin";

/// Failure to reach or use the credential store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No storage object is reachable (no window, storage disabled).
    #[error("credential storage unavailable")]
    Unavailable,

    /// The store refused a single operation.
    #[error("credential storage {op} failed for key {key}")]
    Access { op: &'static str, key: String },
}

/// Minimal string key-value store the credentials are persisted in.
pub trait CredentialStore {
    /// Read `key`, returning `None` when it is not set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store used while server rendering and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail, as a disabled browser store would.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.get() { Err(StoreError::Unavailable) } else { Ok(()) }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage`, resolved on every call so a store that becomes
/// unavailable mid-session degrades instead of holding a stale handle.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
impl CredentialStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Access { op: "read", key: key.to_owned() })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::Access { op: "write", key: key.to_owned() })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StoreError::Access { op: "remove", key: key.to_owned() })
    }
}

/// The store the application should use in the current build.
#[must_use]
pub fn default_store() -> Rc<dyn CredentialStore> {
    #[cfg(feature = "hydrate")]
    {
        Rc::new(BrowserStorage)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Rc::new(MemoryStore::new())
    }
}

/// True iff a non-empty token is stored. Fails closed.
pub fn has_token(store: &dyn CredentialStore) -> bool {
    bearer_token(store).is_some()
}

/// True iff the stored role equals [`ADMIN_ROLE`] ignoring case. Fails closed.
pub fn has_admin_role(store: &dyn CredentialStore) -> bool {
    match store.get(ROLE_KEY) {
        Ok(role) => role.is_some_and(|r| r.eq_ignore_ascii_case(ADMIN_ROLE)),
        Err(e) => {
            log::warn!("role lookup failed: {e}");
            false
        }
    }
}

/// The stored token when present and non-empty.
pub fn bearer_token(store: &dyn CredentialStore) -> Option<String> {
    match store.get(TOKEN_KEY) {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            log::warn!("token lookup failed: {e}");
            None
        }
    }
}

/// Store the credentials returned by a successful login.
///
/// A token is never left behind without its role: if the role write fails
/// the token is removed again.
///
/// # Errors
///
/// Returns [`StoreError`] if either field cannot be written.
pub fn persist_login(store: &dyn CredentialStore, token: &str, role: &str) -> Result<(), StoreError> {
    store.set(TOKEN_KEY, token)?;
    if let Err(e) = store.set(ROLE_KEY, role) {
        if let Err(undo) = store.remove(TOKEN_KEY) {
            log::warn!("token rollback failed: {undo}");
        }
        return Err(e);
    }
    Ok(())
}

/// Remove both credential fields. Failures are logged and otherwise ignored.
pub fn clear_login(store: &dyn CredentialStore) {
    for key in [TOKEN_KEY, ROLE_KEY] {
        if let Err(e) = store.remove(key) {
            log::warn!("credential removal failed: {e}");
        }
    }
}

/// Whether a storage-change notification for `key` concerns the credentials.
///
/// `None` is what browsers report for `localStorage.clear()`, which drops the
/// credentials along with everything else.
pub fn is_credential_key(key: Option<&str>) -> bool {
    match key {
        None => true,
        Some(k) => k == TOKEN_KEY || k == ROLE_KEY,
    }
}
