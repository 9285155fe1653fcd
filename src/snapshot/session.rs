//! sessionStorage-backed store for the browser.

use super::{SnapshotError, StateStore};

/// `window.sessionStorage` behind the [`StateStore`] trait.
pub struct SessionStore {
    storage: web_sys::Storage,
}

impl SessionStore {
    pub fn open() -> Result<Self, SnapshotError> {
        let window =
            web_sys::window().ok_or_else(|| SnapshotError::Unavailable("no window".into()))?;
        let storage = window
            .session_storage()
            .map_err(|e| SnapshotError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| SnapshotError::Unavailable("sessionStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl StateStore for SessionStore {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        // set_item throws when the quota is exceeded.
        self.storage
            .set_item(key, value)
            .map_err(|e| SnapshotError::Write(format!("{e:?}")))
    }
}
