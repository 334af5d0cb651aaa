use anyhow::{bail, Result};
use movie_log_models::WatchedEntry;
use tracing::debug;

use crate::storage::WatchedStorage;

/// Aggregates for the summary display. Every mean is `None` when no value
/// contributes to it, so an empty list never produces NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: Option<f64>,
    pub avg_user_rating: Option<f64>,
    pub avg_runtime_min: Option<f64>,
}

/// The ordered watched list, unique by identifier, written through to its
/// storage on every mutation.
pub struct WatchedStore {
    entries: Vec<WatchedEntry>,
    storage: WatchedStorage,
}

impl WatchedStore {
    pub fn open(storage: WatchedStorage) -> Result<Self> {
        let entries = storage.load()?;
        debug!("Loaded {} watched entries", entries.len());
        Ok(Self { entries, storage })
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_watched(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.imdb_id == imdb_id)
    }

    pub fn user_rating(&self, imdb_id: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|entry| entry.imdb_id == imdb_id)
            .map(|entry| entry.user_rating)
    }

    /// Append to the end of the list. Identifiers are unique across the
    /// collection; a duplicate add is rejected.
    pub fn add(&mut self, entry: WatchedEntry) -> Result<()> {
        if self.is_watched(&entry.imdb_id) {
            bail!("{} is already on the watched list", entry.imdb_id);
        }

        self.entries.push(entry);
        self.storage.save(&self.entries)
    }

    /// Remove the matching entry if present. Returns whether anything was
    /// removed; removing an absent identifier is a no-op.
    pub fn remove(&mut self, imdb_id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.imdb_id != imdb_id);

        if self.entries.len() == before {
            return Ok(false);
        }

        self.storage.save(&self.entries)?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.entries.len();
        self.entries.clear();
        self.storage.save(&self.entries)?;
        Ok(removed)
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary {
            count: self.entries.len(),
            avg_imdb_rating: mean(self.entries.iter().filter_map(|e| e.imdb_rating)),
            avg_user_rating: mean(self.entries.iter().map(|e| f64::from(e.user_rating))),
            avg_runtime_min: mean(
                self.entries
                    .iter()
                    .filter_map(|e| e.runtime_min.map(f64::from)),
            ),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (count, sum) = values.fold((0u32, 0.0), |(count, sum), v| (count + 1, sum + v));
    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}
