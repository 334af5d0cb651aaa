use anyhow::Result;
use movie_log_models::WatchedEntry;
use std::path::PathBuf;
use tracing::{debug, warn};

/// File-backed persistence for the watched list. The whole list is one JSON
/// document under a fixed name; it is read once at startup and rewritten on
/// every mutation.
pub struct WatchedStorage {
    path: PathBuf,
}

impl WatchedStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<WatchedEntry>> {
        if !self.path.exists() {
            debug!("Watched list does not exist yet, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // An unreadable list must not take the app down. Keep the old
                // bytes around and start over.
                let backup_path = self.path.with_extension("json.bak");
                if let Err(backup_err) = std::fs::copy(&self.path, &backup_path) {
                    warn!(
                        "Watched list is unreadable ({}) and backing it up failed: {}. Starting empty.",
                        e, backup_err
                    );
                } else {
                    warn!(
                        "Watched list is unreadable ({}). Backed up to {:?} and starting empty.",
                        e, backup_path
                    );
                }
                Ok(Vec::new())
            }
        }
    }

    pub fn save(&self, entries: &[WatchedEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let serialized = serde_json::to_string_pretty(entries)?;

        // Write-then-rename so a crash never leaves a half-written list.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, serialized)?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}
