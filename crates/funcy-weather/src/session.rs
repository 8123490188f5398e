//! Last successful query, kept across runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Key the query is stored under.
pub const LOCATION_KEY: &str = "location";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

/// One-slot persistence for the last location string.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored location. Missing or unreadable files read as `None`.
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }

        match self.read() {
            Ok(session) => session.location,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {:#}", self.path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, location: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create session directory")?;
        }

        let session = SessionFile {
            location: Some(location.to_string()),
        };
        let json = serde_json::to_string_pretty(&session).context("Failed to serialize session")?;
        fs::write(&self.path, json).context("Failed to write session file")?;

        tracing::debug!("Stored {} = {:?}", LOCATION_KEY, location);
        Ok(())
    }

    fn read(&self) -> Result<SessionFile> {
        let json = fs::read_to_string(&self.path).context("Failed to read session file")?;
        serde_json::from_str(&json).context("Failed to deserialize session file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SessionStore::new(dir.path()).load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.save("Berlin").unwrap();
        store.save("Lisbon").unwrap();

        assert_eq!(SessionStore::new(dir.path()).load().as_deref(), Some("Lisbon"));
    }

    #[test]
    fn test_file_uses_location_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.save("Berlin").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[LOCATION_KEY], "Berlin");
    }

    #[test]
    fn test_corrupt_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(&dir.path().join("nested").join("funcy"));
        store.save("Oslo").unwrap();
        assert_eq!(store.load().as_deref(), Some("Oslo"));
    }
}
