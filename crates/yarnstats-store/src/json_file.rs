//! JSON state file

use std::fs::Permissions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use yarnstats_core::ScriptState;

use crate::{StateStore, StoreError, StoreResult, decode_state, encode_state};

/// State kept in a single JSON file.
///
/// Saves write a sibling temporary file and rename it over the target, so a
/// reader never observes a partially written document. There is no locking:
/// invocations must not overlap.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode the saved file should carry: the current file's, so readers
    /// running as another user keep access, or a world-readable default.
    fn target_permissions(&self) -> StoreResult<Option<Permissions>> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.permissions())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(default_permissions()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

impl StateStore for JsonFileStore {
    fn load(&self) -> StoreResult<ScriptState> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Missing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let state = decode_state(&text)?;
        debug!(
            path = %self.path.display(),
            history_len = state.apps_history.len(),
            queues = state.queues_stats.len(),
            "State loaded"
        );
        Ok(state)
    }

    fn save(&self, state: &ScriptState) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let bytes = encode_state(state)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        if let Some(permissions) = self.target_permissions()? {
            tmp.as_file().set_permissions(permissions)?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "State saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
