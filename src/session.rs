//! The logged-in user's identity, persisted in browser local storage.

use crate::error::Error;

pub const USER_ID_KEY: &str = "user_id";
pub const USER_NAME_KEY: &str = "user_name";

/// A string key-value area that outlives page reloads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    /// Removes every key, not just the ones this crate wrote.
    fn clear(&self);
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let storage =
            Self::storage().ok_or_else(|| Error::Storage("no localStorage".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|err| Error::Storage(format!("{err:?}")))
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.clear();
        }
    }
}

/// Who is logged in. Created at login, dropped at logout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    user_name: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}

/// Reads and writes the [`Session`] keys in a [`KeyValueStore`].
///
/// There is no expiry: a saved session is valid until [`SessionStore::clear`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn save(&self, user_id: &str, user_name: &str) -> Result<Session, Error> {
        self.storage.set(USER_ID_KEY, user_id)?;
        self.storage.set(USER_NAME_KEY, user_name)?;
        log::debug!("stored session for user {user_id}");
        Ok(Session::new(user_id, user_name))
    }

    /// The stored session, if a user id is present.
    pub fn load(&self) -> Option<Session> {
        let user_id = self
            .storage
            .get(USER_ID_KEY)
            .filter(|id| !id.trim().is_empty())?;
        let user_name = self.read_name().unwrap_or_default();
        Some(Session::new(user_id, user_name))
    }

    pub fn read_name(&self) -> Option<String> {
        self.storage.get(USER_NAME_KEY)
    }

    /// Ensures a session exists before an authenticated page loads.
    pub fn require(&self) -> Result<Session, Error> {
        self.load().ok_or(Error::NoSession)
    }

    pub fn clear(&self) {
        self.storage.clear();
        log::info!("session cleared");
    }
}
