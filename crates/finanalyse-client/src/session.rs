//! Persistent chat session id.
//!
//! Small key/value store kept as a JSON object on disk. The chat session id
//! lives under [`SESSION_KEY`] and is created on first use.

use finanalyse_core::{DashboardError, Result};
use rand::Rng;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const SESSION_KEY: &str = "finanalyse_session_id";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `session_<unix millis>_<9 base-36 chars>`
pub fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("session_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
}

fn resolve_path(storage: Option<String>, data_dir: Option<PathBuf>) -> PathBuf {
    match storage.filter(|path| !path.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => data_dir
            .unwrap_or_else(|| PathBuf::from("."))
            .join("finanalyse")
            .join("storage.json"),
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `FINANALYSE_STORAGE`, else `<data dir>/finanalyse/storage.json`.
    pub fn default_path() -> PathBuf {
        resolve_path(std::env::var("FINANALYSE_STORAGE").ok(), dirs::data_dir())
    }

    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                DashboardError::Storage(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(DashboardError::Storage(format!("{}: {}", self.path.display(), e))),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DashboardError::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| DashboardError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| DashboardError::Storage(format!("{}: {}", self.path.display(), e)))
    }

    /// Returns the stored session id, creating and persisting one if absent.
    pub fn session_id(&self) -> Result<String> {
        if let Some(id) = self.get(SESSION_KEY)?.filter(|id| !id.is_empty()) {
            return Ok(id);
        }
        let id = generate_session_id();
        self.set(SESSION_KEY, &id)?;
        tracing::debug!(session_id = %id, path = %self.path.display(), "Created chat session id");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_format() {
        let id = generate_session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_resolve_path() {
        let data = PathBuf::from("/home/me/.local/share");
        assert_eq!(
            resolve_path(Some("/tmp/custom.json".into()), Some(data.clone())),
            PathBuf::from("/tmp/custom.json")
        );
        assert_eq!(
            resolve_path(Some("  ".into()), Some(data.clone())),
            data.join("finanalyse").join("storage.json")
        );
        assert_eq!(
            resolve_path(None, None),
            PathBuf::from(".").join("finanalyse").join("storage.json")
        );
    }

    // The only test in the crate that touches FINANALYSE_STORAGE.
    #[test]
    fn test_default_path_honours_storage_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::env::set_var("FINANALYSE_STORAGE", &path);
        let resolved = SessionStore::open_default();
        std::env::remove_var("FINANALYSE_STORAGE");

        assert_eq!(resolved.path(), path.as_path());
        let id = resolved.session_id().unwrap();
        assert!(path.exists());
        assert_eq!(SessionStore::new(&path).session_id().unwrap(), id);
    }

    #[test]
    fn test_session_id_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("storage.json"));

        let first = store.session_id().unwrap();
        let second = store.session_id().unwrap();
        assert_eq!(first, second);

        let reopened = SessionStore::new(store.path().to_path_buf());
        assert_eq!(reopened.session_id().unwrap(), first);
        assert_eq!(reopened.get(SESSION_KEY).unwrap(), Some(first));
    }

    #[test]
    fn test_set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("storage.json"));
        store.set("theme", "dark").unwrap();
        store.session_id().unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = SessionStore::new(path).session_id().unwrap_err();
        assert!(matches!(err, DashboardError::Storage(_)));
    }
}
