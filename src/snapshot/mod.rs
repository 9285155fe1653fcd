//! Session persistence of the playfield.
//!
//! One fixed string key holds a base64-encoded snapshot blob. Stored text
//! is client-controlled and may be corrupt or adversarial: loading
//! validates everything before touching the grid, and the grid keeps its
//! prior contents on any failure.

use std::collections::HashMap;

use base64::Engine;
use thiserror::Error;

use crate::playfield::{self, CodecError, Playfield};

#[cfg(target_arch = "wasm32")]
mod session;

#[cfg(target_arch = "wasm32")]
pub use session::SessionStore;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("snapshot is not valid base64: {0}")]
    Transport(String),
    #[error(transparent)]
    Corrupt(#[from] CodecError),
}

/// Pluggable key/value backend for the snapshot slot.
pub trait StateStore {
    /// Read the value under `key`, or None when no prior state exists.
    fn read(&self, key: &str) -> Option<String>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), SnapshotError>;
}

/// In-memory backend for tests and hosts without session storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Wraps the playfield codec with a fixed storage key and a transport
/// encoding, so the driver only ever says "save" and "restore".
pub struct SnapshotGateway {
    store: Box<dyn StateStore>,
    key: String,
}

impl SnapshotGateway {
    pub fn new(store: Box<dyn StateStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(Box::new(MemoryStore::new()), key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encode the playfield and write it under the fixed key.
    pub fn save(&mut self, field: &Playfield) -> Result<(), SnapshotError> {
        let blob = playfield::encode(field.cells());
        let text = base64::engine::general_purpose::STANDARD.encode(&blob);
        self.store.write(&self.key, &text)
    }

    /// Strict load: decode the stored snapshot into the playfield.
    ///
    /// Returns Ok(false) when no snapshot exists. The playfield is only
    /// written after the whole blob has validated.
    pub fn try_load(&self, field: &mut Playfield) -> Result<bool, SnapshotError> {
        let Some(text) = self.store.read(&self.key) else {
            return Ok(false);
        };
        let blob = base64::engine::general_purpose::STANDARD
            .decode(text.as_bytes())
            .map_err(|e| SnapshotError::Transport(e.to_string()))?;
        let cells = playfield::decode(&blob, field.size())?;
        field.cells_mut().copy_from_slice(&cells);
        Ok(true)
    }

    /// Fail-soft load: a corrupt snapshot is discarded with a console
    /// warning and the playfield keeps its prior contents.
    pub fn load(&self, field: &mut Playfield) -> bool {
        match self.try_load(field) {
            Ok(loaded) => loaded,
            Err(e) => {
                console_warn!("discarding stored playfield snapshot: {e}");
                false
            }
        }
    }
}
