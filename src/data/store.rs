use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const STATE_FILENAME: &str = ".culler_state.json";

/// The persisted blob for one root: cursor plus the two decision lists.
/// An identity absent from both lists is undecided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub kept: Vec<String>,
    #[serde(default)]
    pub deleted: Vec<String>,
}

pub struct StateStore;

impl StateStore {
    pub fn state_path(root: &Path) -> PathBuf {
        root.join(STATE_FILENAME)
    }

    /// Missing or unparsable state reads as a fresh session, never an error.
    pub fn load(root: &Path) -> SessionState {
        let path = Self::state_path(root);
        let Ok(raw) = fs::read_to_string(&path) else {
            return SessionState::default();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    /// Full overwrite via temp file + rename; a crash mid-write leaves the
    /// previous state intact.
    pub fn save(root: &Path, state: &SessionState) -> Result<(), AppError> {
        let path = Self::state_path(root);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(state)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn delete(root: &Path) -> Result<(), AppError> {
        let path = Self::state_path(root);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateStore::load(dir.path());
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState {
            index: 3,
            kept: vec!["a.jpg".to_string()],
            deleted: vec!["b.jpg".to_string(), "c.jpg".to_string()],
        };

        StateStore::save(dir.path(), &state).unwrap();
        let loaded = StateStore::load(dir.path());

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_corrupt_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(StateStore::state_path(dir.path()), "{not json at all").unwrap();

        let state = StateStore::load(dir.path());
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_load_empty_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(StateStore::state_path(dir.path()), "").unwrap();

        let state = StateStore::load(dir.path());
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_load_partial_fields_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(StateStore::state_path(dir.path()), r#"{"index": 2}"#).unwrap();

        let state = StateStore::load(dir.path());
        assert_eq!(state.index, 2);
        assert!(state.kept.is_empty());
        assert!(state.deleted.is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        StateStore::save(dir.path(), &SessionState::default()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_delete_removes_state_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        StateStore::save(dir.path(), &SessionState::default()).unwrap();
        assert!(StateStore::state_path(dir.path()).exists());

        StateStore::delete(dir.path()).unwrap();
        assert!(!StateStore::state_path(dir.path()).exists());

        // second delete is a no-op
        StateStore::delete(dir.path()).unwrap();
    }
}
