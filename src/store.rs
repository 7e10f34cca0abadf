//! Session persistence.
//!
//! The game talks to storage through [`KeyValueStore`], a namespaced string
//! store. An in-progress session lives under [`SESSION_KEY`] as JSON:
//!
//! ```json
//! {"solution":"CRANE","guesses":["SLATE"],"status":"playing"}
//! ```
//!
//! Anything that does not parse into a valid [`PersistedSession`] is treated as
//! no saved session at all.

use crate::debug_log;
use crate::error::StoreError;
use crate::game_state::MAX_ATTEMPTS;
use crate::word::Word;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SESSION_KEY: &str = "wordle_clone_v1";

const APP_DIR_NAME: &str = "wordle-clone";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Store that forgets everything when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// `<local data dir>/wordle-clone`, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Only in-progress sessions are ever written, so this has a single variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub solution: Word,
    pub guesses: Vec<Word>,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl PersistedSession {
    pub fn playing(solution: Word, guesses: Vec<Word>) -> Self {
        Self {
            solution,
            guesses,
            status: SessionStatus::Playing,
            saved_at: Some(Utc::now()),
        }
    }

    /// False for snapshots no game still in play could have written.
    pub fn is_resumable(&self) -> bool {
        self.guesses.len() < MAX_ATTEMPTS && !self.guesses.contains(&self.solution)
    }
}

/// Read the saved session; missing, unreadable or malformed values give `None`.
pub fn load_session<S: KeyValueStore + ?Sized>(store: &S) -> Option<PersistedSession> {
    let raw = match store.get(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read saved session: {e}");
            return None;
        }
    };

    match serde_json::from_str::<PersistedSession>(&raw) {
        Ok(session) if session.is_resumable() => {
            debug_log!(
                "load_session() - restored {} guesses, saved at {:?}",
                session.guesses.len(),
                session.saved_at
            );
            Some(session)
        }
        Ok(_) => {
            log::warn!("Ignoring saved session that is not in play");
            None
        }
        Err(e) => {
            log::warn!("Ignoring malformed saved session: {e}");
            None
        }
    }
}

pub fn save_session<S: KeyValueStore + ?Sized>(
    store: &mut S,
    session: &PersistedSession,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(session)?;
    store.set(SESSION_KEY, &json)
}

pub fn clear_session<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(SESSION_KEY)
}
