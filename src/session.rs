//! Session id persistence between runs.
//!
//! The conductor groups requests by session id. The CLI keeps the id of its
//! last session on disk so consecutive invocations continue the same
//! conversation.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const SESSION_DIR: &str = "spoq-stream";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionRecord {
    session_id: Option<String>,
}

/// Manages the stored session id.
#[derive(Debug)]
pub struct SessionStore {
    /// Path to the session file.
    session_path: PathBuf,
}

impl SessionStore {
    /// Create a store in the platform data directory.
    ///
    /// Returns `None` if the data directory cannot be determined.
    pub fn new() -> Option<Self> {
        let data_dir = dirs::data_dir()?;
        Some(Self::in_dir(data_dir.join(SESSION_DIR)))
    }

    /// Create a store keeping its file in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            session_path: dir.as_ref().join(SESSION_FILE),
        }
    }

    /// Get the path to the session file.
    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    /// Load the stored session id.
    ///
    /// Returns `None` if nothing is stored or the file can't be read.
    pub fn load(&self) -> Option<String> {
        let file = File::open(&self.session_path).ok()?;
        let record: SessionRecord = match serde_json::from_reader(BufReader::new(file)) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(path = ?self.session_path, error = %err, "Ignoring unreadable session file");
                return None;
            }
        };
        record.session_id.filter(|id| !id.is_empty())
    }

    /// Store a session id.
    ///
    /// Creates the parent directory if it doesn't exist.
    /// Returns `true` if successful, `false` otherwise.
    pub fn save(&self, session_id: &str) -> bool {
        if let Some(parent) = self.session_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.session_path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let record = SessionRecord {
            session_id: Some(session_id.to_string()),
        };
        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, &record).is_err() {
            return false;
        }

        writer.flush().is_ok()
    }

    /// Forget the stored session id.
    ///
    /// Returns `true` if a file was removed.
    pub fn clear(&self) -> bool {
        fs::remove_file(&self.session_path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::in_dir(temp_dir.path());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::in_dir(temp_dir.path().join("nested"));

        assert!(store.save("sess-123"));
        assert!(store.session_path().exists());
        assert_eq!(store.load().as_deref(), Some("sess-123"));

        assert!(store.save("sess-456"));
        assert_eq!(store.load().as_deref(), Some("sess-456"));
    }

    #[test]
    fn test_clear_removes_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::in_dir(temp_dir.path());

        assert!(!store.clear());
        store.save("sess");
        assert!(store.clear());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_invalid_json_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::in_dir(temp_dir.path());
        fs::write(store.session_path(), "not valid json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_empty_session_id_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::in_dir(temp_dir.path());
        fs::write(store.session_path(), r#"{"session_id": ""}"#).unwrap();
        assert!(store.load().is_none());
    }
}
