//! Session token storage.
//!
//! The file-backed store keeps the token in `<base>/session.json` under the
//! well-known `token` key, written with restricted permissions (0600).
//! Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Persistent holder of the current authentication token.
///
/// Only the login/logout actions write to the store; the API client and
/// the navigation guard read from it.
pub trait SessionStore: Send + Sync {
    /// Persists `token`, overwriting any prior token.
    ///
    /// # Errors
    /// Returns an error if the token cannot be persisted.
    fn set_token(&self, token: &str) -> Result<()>;

    /// Returns the current token, if any.
    fn token(&self) -> Option<String>;

    /// Removes the token. Clearing an empty store is not an error.
    ///
    /// # Errors
    /// Returns an error if persisted state cannot be removed.
    fn clear_token(&self) -> Result<()>;

    fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

/// On-disk session file layout.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Session store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at the default location (`${ARTDESK_HOME}/session.json`).
    pub fn new() -> Self {
        Self::at(paths::session_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<SessionFile> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    fn save(&self, session: &SessionFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSessionStore {
    fn set_token(&self, token: &str) -> Result<()> {
        let mut session = self.load().unwrap_or_default();
        session.token = Some(token.to_string());
        self.save(&session)
    }

    fn token(&self) -> Option<String> {
        match self.load() {
            Ok(session) => session.token.filter(|t| !t.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable session file, treating as logged out");
                None
            }
        }
    }

    fn clear_token(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))
    }
}

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn set_token(&self, token: &str) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_poisoned| anyhow::anyhow!("session lock poisoned"))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|slot| slot.clone())
    }

    fn clear_token(&self) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_poisoned| anyhow::anyhow!("session lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_file_store_set_get_clear() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join("session.json"));

        assert!(store.token().is_none());
        store.set_token("abc").unwrap();
        assert_eq!(store.token().as_deref(), Some("abc"));

        store.set_token("def").unwrap();
        assert_eq!(store.token().as_deref(), Some("def"));

        store.clear_token().unwrap();
        assert!(store.token().is_none());
        assert!(!store.has_token());
    }

    #[test]
    fn test_file_store_uses_token_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::at(&path);
        store.set_token("secret-token").unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["token"], "secret-token");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::at(&path).set_token("abc").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join("nested").join("session.json"));
        store.clear_token().unwrap();
        store.clear_token().unwrap();

        let memory = MemorySessionStore::new();
        memory.clear_token().unwrap();
        memory.clear_token().unwrap();
        assert!(memory.token().is_none());
    }

    #[test]
    fn test_corrupt_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::at(&path);
        assert!(store.token().is_none());
        store.set_token("fresh").unwrap();
        assert_eq!(store.token().as_deref(), Some("fresh"));
    }
}
